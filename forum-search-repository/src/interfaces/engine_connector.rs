//! Factory trait for building engine clients from configuration.

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::EngineConfig;
use crate::errors::SearchError;
use crate::interfaces::SearchEngineClient;

/// Builds a fresh `SearchEngineClient` for the given configuration.
///
/// Connecting does not contact the engine; use `SearchEngineClient::ping`
/// to verify reachability.
#[async_trait]
pub trait EngineConnector: Send + Sync {
    async fn connect(&self, config: &EngineConfig)
        -> Result<Arc<dyn SearchEngineClient>, SearchError>;
}
