use std::sync::Arc;

use hostwatch_db::storage::Storage;

#[derive(Clone)]
pub struct ApiContext {
    pub config: crate::config::HostwatchApiConfig,
    pub db: Arc<dyn Storage>,
}

impl ApiContext {
    pub fn new(config: crate::config::HostwatchApiConfig, db: Arc<dyn Storage>) -> Self {
        Self { config, db }
    }
}
