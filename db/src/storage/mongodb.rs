use async_trait::async_trait;
use chrono::Utc;
use futures::TryStreamExt;
use hostwatch_common::params::CreateHostParams;
use mongodb::{
    Client, Collection, Database,
    bson::{doc, oid::ObjectId},
};
use tokio::sync::OnceCell;
use tracing::{debug, info, instrument};

use crate::{
    models::DbHost,
    storage::{HostStore, Storage, StoreError},
};

pub const MONGODB_COLLECTION_HOSTS: &str = "hosts";

/// Opens the MongoDB client on first use and hands out the shared handle
/// afterwards.
///
/// Construction does no I/O. The first [`connect`](Self::connect) builds the
/// client and confirms it with a `ping`; concurrent first callers wait on the
/// same initialisation. A failed initialisation is not cached, so the next
/// caller tries again. The client lives as long as the connector.
#[derive(Debug)]
pub struct MongoDBConnector {
    uri: String,
    fallback_database: String,
    client: OnceCell<Client>,
}

impl MongoDBConnector {
    pub fn new(uri: impl Into<String>, fallback_database: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            fallback_database: fallback_database.into(),
            client: OnceCell::new(),
        }
    }

    pub async fn connect(&self) -> Result<Database, StoreError> {
        let client = self
            .client
            .get_or_try_init(|| async {
                debug!("Opening MongoDB connection");

                let client = Client::with_uri_str(&self.uri).await?;
                self.database(&client)
                    .run_command(doc! { "ping": 1 })
                    .await?;

                info!("Connected to MongoDB");
                Ok::<_, StoreError>(client)
            })
            .await?;

        Ok(self.database(client))
    }

    pub fn is_connected(&self) -> bool {
        self.client.initialized()
    }

    fn database(&self, client: &Client) -> Database {
        client
            .default_database()
            .unwrap_or_else(|| client.database(&self.fallback_database))
    }
}

#[derive(Debug)]
pub struct MongoDBStorage {
    connector: MongoDBConnector,
}

impl MongoDBStorage {
    pub fn new(connector: MongoDBConnector) -> Self {
        Self { connector }
    }

    async fn hosts(&self) -> Result<Collection<DbHost>, StoreError> {
        Ok(self
            .connector
            .connect()
            .await?
            .collection::<DbHost>(MONGODB_COLLECTION_HOSTS))
    }
}

#[async_trait]
impl Storage for MongoDBStorage {
    async fn ping(&self) -> Result<(), StoreError> {
        self.connector
            .connect()
            .await?
            .run_command(doc! { "ping": 1 })
            .await?;
        Ok(())
    }
}

#[async_trait]
impl HostStore for MongoDBStorage {
    #[instrument(skip_all)]
    async fn create(&self, params: CreateHostParams) -> Result<DbHost, StoreError> {
        let collection = self.hosts().await?;
        let host = DbHost::create(params, Utc::now())?;

        collection.insert_one(&host).await?;

        debug!(host_id = %host.id, "Inserted host");
        Ok(host)
    }

    #[instrument(skip_all)]
    async fn list(&self) -> Result<Vec<DbHost>, StoreError> {
        self.hosts()
            .await?
            .find(doc! {})
            .await?
            .try_collect()
            .await
            .map_err(StoreError::MongoDB)
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: ObjectId) -> Result<(), StoreError> {
        let result = self.hosts().await?.delete_one(doc! { "_id": id }).await?;

        debug!(deleted = result.deleted_count, "Deleted host");
        Ok(())
    }
}
