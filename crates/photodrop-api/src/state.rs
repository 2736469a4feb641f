use std::sync::Arc;

use photodrop_core::Config;
use photodrop_storage::{DropboxAuth, DropboxStore, ObjectStore, TokenSource};

/// Shared application state, cloned per request.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub auth: Arc<dyn TokenSource>,
    pub store: Arc<dyn ObjectStore>,
}

impl AppState {
    pub fn new(config: Config, auth: Arc<dyn TokenSource>, store: Arc<dyn ObjectStore>) -> Self {
        Self {
            config: Arc::new(config),
            auth,
            store,
        }
    }

    /// Production wiring: Dropbox for both the token source and the store.
    pub fn from_config(config: Config) -> Self {
        let auth = Arc::new(DropboxAuth::new(config.dropbox.clone()));
        let store = Arc::new(DropboxStore::new());
        Self::new(config, auth, store)
    }
}
