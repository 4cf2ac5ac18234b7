// Application state module
// Shared, read-only state handed to every connection

use std::sync::Arc;

use super::types::Config;
use crate::auth::Credentials;
use crate::storage::{LocalFs, Storage};

/// Application state
pub struct AppState {
    pub config: Config,
    pub credentials: Credentials,
    pub storage: Arc<dyn Storage>,
}

impl AppState {
    /// Create `AppState` backed by the local filesystem root from `config`
    pub fn new(config: &Config) -> Self {
        let storage = Arc::new(LocalFs::new(&config.storage.root));
        Self::with_storage(config, storage)
    }

    /// Create `AppState` with an explicit storage backend
    pub fn with_storage(config: &Config, storage: Arc<dyn Storage>) -> Self {
        Self {
            config: config.clone(),
            credentials: Credentials::from_config(&config.auth),
            storage,
        }
    }
}
