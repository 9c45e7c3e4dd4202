//! Shared application state

use anyhow::Result;
use std::sync::Arc;

use crate::config::AppConfig;
use crate::github::{GithubApi, GithubClient};

/// Shared application state
///
/// Read-only after construction: handlers may run concurrently without
/// any locking.
#[derive(Clone)]
pub struct AppState {
    /// Process configuration
    pub config: Arc<AppConfig>,
    /// Upstream API handle; a trait object so tests can inject a fake
    pub github: Arc<dyn GithubApi>,
}

impl AppState {
    /// Create app state backed by the real GitHub client
    pub fn new(config: AppConfig) -> Result<Self> {
        let github = GithubClient::new(&config)?;
        Ok(Self {
            config: Arc::new(config),
            github: Arc::new(github),
        })
    }

    /// Create app state with an explicit API implementation (used by tests)
    pub fn with_api(config: AppConfig, github: Arc<dyn GithubApi>) -> Self {
        Self {
            config: Arc::new(config),
            github,
        }
    }
}
