//! Application state.

use std::sync::Arc;

use facelens_client::{ClientResult, DetectionClient};

use crate::config::ApiConfig;

/// Shared, read-only application state.
///
/// Uploads never share data; only configuration and the detection client
/// (fixed endpoint and credentials) live here.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub client: Arc<DetectionClient>,
}

impl AppState {
    /// Create state from an existing client.
    pub fn new(config: ApiConfig, client: DetectionClient) -> Self {
        Self {
            config,
            client: Arc::new(client),
        }
    }

    /// Create state with the detection client configured from the environment.
    pub fn from_env(config: ApiConfig) -> ClientResult<Self> {
        Ok(Self::new(config, DetectionClient::from_env()?))
    }
}
