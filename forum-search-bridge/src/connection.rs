//! Ownership of the single search engine client handle.

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::errors::BridgeError;
use crate::settings::Settings;
use forum_search_repository::{EngineConnector, SearchEngineClient};

/// Holds at most one engine client, rebuilt whenever settings change.
pub struct ConnectionManager {
    connector: Arc<dyn EngineConnector>,
    client: RwLock<Option<Arc<dyn SearchEngineClient>>>,
}

impl ConnectionManager {
    pub fn new(connector: Arc<dyn EngineConnector>) -> Self {
        Self {
            connector,
            client: RwLock::new(None),
        }
    }

    /// Replace the current handle with one built from `settings`.
    ///
    /// The previous handle is dropped first, so a failed connect leaves the
    /// manager disconnected.
    pub async fn connect(&self, settings: &Settings) -> Result<(), BridgeError> {
        let mut slot = self.client.write().await;
        *slot = None;

        let Some(config) = settings.engine_config() else {
            warn!("No search host configured, staying disconnected");
            return Err(BridgeError::NotConnected);
        };

        let client = self.connector.connect(&config).await?;
        info!(url = %config.url, index = %config.index_name, "Search engine client created");
        *slot = Some(client);
        Ok(())
    }

    /// Drop the current handle.
    pub async fn disconnect(&self) {
        self.client.write().await.take();
    }

    /// The current handle.
    pub async fn client(&self) -> Result<Arc<dyn SearchEngineClient>, BridgeError> {
        self.client
            .read()
            .await
            .clone()
            .ok_or(BridgeError::NotConnected)
    }

    pub async fn is_connected(&self) -> bool {
        self.client.read().await.is_some()
    }

    /// Check that the engine answers.
    pub async fn ping(&self) -> Result<(), BridgeError> {
        let client = self.client().await?;
        client.ping().await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{EngineCall, MockConnector, MockEngine};
    use forum_search_repository::SearchError;

    #[tokio::test]
    async fn test_ping_without_handle() {
        let connector = Arc::new(MockConnector::new(Arc::new(MockEngine::new())));
        let manager = ConnectionManager::new(connector);

        assert!(!manager.is_connected().await);
        assert_eq!(manager.ping().await, Err(BridgeError::NotConnected));
    }

    #[tokio::test]
    async fn test_connect_then_ping() {
        let engine = Arc::new(MockEngine::new());
        let connector = Arc::new(MockConnector::new(engine.clone()));
        let manager = ConnectionManager::new(connector.clone());

        manager.connect(&Settings::default()).await.unwrap();
        assert!(manager.is_connected().await);
        manager.ping().await.unwrap();

        assert_eq!(engine.calls().await, vec![EngineCall::Ping]);
        let configs = connector.configs().await;
        assert_eq!(configs.len(), 1);
        assert_eq!(configs[0].url, "http://localhost:9200");
        assert_eq!(configs[0].index_name, "posts");
    }

    #[tokio::test]
    async fn test_reconnect_replaces_handle() {
        let connector = Arc::new(MockConnector::new(Arc::new(MockEngine::new())));
        let manager = ConnectionManager::new(connector.clone());

        manager.connect(&Settings::default()).await.unwrap();
        let settings = Settings {
            host: "other:9200".to_string(),
            ..Settings::default()
        };
        manager.connect(&settings).await.unwrap();

        let configs = connector.configs().await;
        assert_eq!(configs.len(), 2);
        assert_eq!(configs[1].url, "http://other:9200");
    }

    #[tokio::test]
    async fn test_connect_without_host_clears_handle() {
        let connector = Arc::new(MockConnector::new(Arc::new(MockEngine::new())));
        let manager = ConnectionManager::new(connector);
        manager.connect(&Settings::default()).await.unwrap();

        let settings = Settings {
            host: " ".to_string(),
            ..Settings::default()
        };
        assert_eq!(manager.connect(&settings).await, Err(BridgeError::NotConnected));
        assert!(!manager.is_connected().await);
    }

    #[tokio::test]
    async fn test_connect_failure() {
        let connector = Arc::new(MockConnector::failing(Arc::new(MockEngine::new())));
        let manager = ConnectionManager::new(connector);

        let err = manager.connect(&Settings::default()).await.unwrap_err();
        assert!(matches!(err, BridgeError::Engine(SearchError::ConnectionError(_))));
        assert!(manager.client().await.is_err());
    }

    #[tokio::test]
    async fn test_disconnect() {
        let connector = Arc::new(MockConnector::new(Arc::new(MockEngine::new())));
        let manager = ConnectionManager::new(connector);
        manager.connect(&Settings::default()).await.unwrap();

        manager.disconnect().await;
        assert!(!manager.is_connected().await);
    }
}
