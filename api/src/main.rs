use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use hostwatch_api::{config::HostwatchApiConfig, server};
use hostwatch_db::storage::{
    Storage,
    mongodb::{MongoDBConnector, MongoDBStorage},
};
use tokio::net::TcpListener;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = HostwatchApiConfig::parse();

    let connector = MongoDBConnector::new(&config.mongodb_uri, &config.mongodb_database);
    let db: Arc<dyn Storage> = Arc::new(MongoDBStorage::new(connector));

    let (router, api) = server::make(config.clone(), db);

    if config.dump_openapi {
        print!("{}", api.to_pretty_json()?);
        return Ok(());
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or("hostwatch_api=info,hostwatch_db=info".into()),
        )
        .pretty()
        .init();

    let listener = TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("failed to bind to {}", config.bind_addr))?;

    info!("Listening on http://{}", config.bind_addr);

    axum::serve(listener, router)
        .await
        .context("server exited unexpectedly")
}
