use async_trait::async_trait;
use hostwatch_common::params::CreateHostParams;
use ::mongodb::bson::oid::ObjectId;
use thiserror::Error;

use crate::models::DbHost;

pub mod mongodb;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Query Error: {0}")]
    MongoDB(#[from] ::mongodb::error::Error),

    #[error("Encoding Error: {0}")]
    Encode(#[from] ::mongodb::bson::ser::Error),

    /// The store refused the operation and says which HTTP status describes
    /// the refusal.
    #[error("Rejected with status {status_code}: {reason}")]
    Rejected { status_code: u16, reason: String },

    #[error(transparent)]
    Internal(#[from] Box<dyn std::error::Error + Send + Sync>),
}

impl StoreError {
    /// The HTTP status this error declares, if any. Only [`Self::Rejected`]
    /// carries one; callers fall back to 500 for everything else.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Rejected { status_code, .. } => Some(*status_code),
            Self::MongoDB(_) | Self::Encode(_) | Self::Internal(_) => None,
        }
    }
}

#[async_trait]
pub trait Storage: HostStore + Send + Sync + 'static {
    async fn ping(&self) -> Result<(), StoreError>;
}

#[async_trait]
pub trait HostStore {
    /// Insert a new host. The store assigns the id and both timestamps.
    async fn create(&self, params: CreateHostParams) -> Result<DbHost, StoreError>;

    /// Every host currently in the store, in natural order.
    async fn list(&self) -> Result<Vec<DbHost>, StoreError>;

    /// Remove a host by id. Removing a host that no longer exists succeeds.
    async fn delete(&self, id: ObjectId) -> Result<(), StoreError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_declares_its_status() {
        let err = StoreError::Rejected {
            status_code: 422,
            reason: "bad".into(),
        };
        assert_eq!(err.status_code(), Some(422));
    }

    #[test]
    fn test_other_errors_declare_nothing() {
        let err: StoreError = Box::<dyn std::error::Error + Send + Sync>::from("boom").into();
        assert_eq!(err.status_code(), None);
    }

    #[test]
    fn test_driver_errors_declare_nothing() {
        let io = std::io::Error::new(std::io::ErrorKind::ConnectionReset, "reset");
        let err = StoreError::from(::mongodb::error::Error::from(io));

        assert_eq!(err.status_code(), None);
    }
}
