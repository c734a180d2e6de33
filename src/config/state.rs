// Application state module
// Everything a request handler needs, constructed once at startup

use std::time::Duration;
use tokio::sync::Mutex;

use super::types::Config;
use crate::dictionary::DictionaryStore;
use crate::error::ServerError;
use crate::http::CorsPolicy;
use crate::messages::Messages;

/// Application state
pub struct AppState {
    pub config: Config,
    /// Held only for a single synchronous add/lookup, never across an await
    pub store: Mutex<DictionaryStore>,
    pub messages: Messages,
    pub cors: CorsPolicy,
    pub body_read_timeout: Duration,
}

impl AppState {
    /// Build state around an empty store
    pub fn new(config: Config, messages: Messages) -> Result<Self, ServerError> {
        let cors = CorsPolicy::from_config(&config.cors)?;
        let body_read_timeout = config.body_read_timeout();

        Ok(Self {
            config,
            store: Mutex::new(DictionaryStore::new()),
            messages,
            cors,
            body_read_timeout,
        })
    }
}
