//! Connector producing `OpenSearchClient` instances.

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::EngineConfig;
use crate::errors::SearchError;
use crate::interfaces::{EngineConnector, SearchEngineClient};
use crate::opensearch::OpenSearchClient;

/// Builds OpenSearch clients from engine configuration.
#[derive(Debug, Default, Clone)]
pub struct OpenSearchConnector;

impl OpenSearchConnector {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl EngineConnector for OpenSearchConnector {
    async fn connect(
        &self,
        config: &EngineConfig,
    ) -> Result<Arc<dyn SearchEngineClient>, SearchError> {
        let client = OpenSearchClient::new(config)?;
        Ok(Arc::new(client))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_builds_client_without_contacting_engine() {
        let connector = OpenSearchConnector::new();
        let result = connector.connect(&EngineConfig::default()).await;

        assert!(result.is_ok());
    }
}
