//! Loader module for the forum search bridge.
//!
//! Writes documents into the search index through the current engine
//! handle and reads back index statistics.

use std::sync::Arc;
use tracing::{debug, error, info, instrument};

use crate::connection::ConnectionManager;
use crate::errors::BridgeError;
use forum_search_repository::CountScope;
use forum_search_shared::{IndexDocument, PostId};

/// Pass-through index writer.
///
/// Every call resolves the engine handle at call time, so a reconnect is
/// picked up without rebuilding the loader. Failures are logged with the
/// operation and affected id, then returned.
pub struct IndexLoader {
    connection: Arc<ConnectionManager>,
}

impl IndexLoader {
    pub fn new(connection: Arc<ConnectionManager>) -> Self {
        Self { connection }
    }

    /// Upsert documents in a single bulk request.
    ///
    /// An empty payload is a no-op.
    #[instrument(skip(self, documents), fields(count = documents.len()))]
    pub async fn add(&self, documents: &[IndexDocument]) -> Result<(), BridgeError> {
        if documents.is_empty() {
            return Ok(());
        }

        let client = self.connection.client().await?;
        match client.bulk_index(documents).await {
            Ok(()) => {
                debug!(count = documents.len(), "Indexed documents");
                Ok(())
            }
            Err(e) => {
                error!(
                    error = %e,
                    count = documents.len(),
                    first_pid = documents[0].id,
                    "Failed to index documents"
                );
                Err(e.into())
            }
        }
    }

    /// Remove a single post's document.
    pub async fn remove(&self, pid: PostId) -> Result<(), BridgeError> {
        let client = self.connection.client().await?;
        client.delete_document(pid).await.map_err(|e| {
            error!(pid = pid, error = %e, "Failed to remove document");
            BridgeError::from(e)
        })?;
        debug!(pid = pid, "Removed document");
        Ok(())
    }

    /// Delete every document, keeping the index.
    pub async fn flush(&self) -> Result<(), BridgeError> {
        let client = self.connection.client().await?;
        client.delete_all().await.map_err(|e| {
            error!(error = %e, "Failed to flush index");
            BridgeError::from(e)
        })?;
        info!("Flushed search index");
        Ok(())
    }

    /// Create the index with its mapping.
    ///
    /// An index that already exists is logged and treated as success.
    pub async fn create_index(&self) -> Result<(), BridgeError> {
        let client = self.connection.client().await?;
        match client.create_index().await {
            Ok(()) => {
                info!("Created search index");
                Ok(())
            }
            Err(e) if e.is_index_already_exists() => {
                error!(error = %e, "Search index already exists");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Failed to create search index");
                Err(e.into())
            }
        }
    }

    /// Delete the index.
    ///
    /// A missing index is logged and treated as success.
    pub async fn delete_index(&self) -> Result<(), BridgeError> {
        let client = self.connection.client().await?;
        match client.delete_index().await {
            Ok(()) => {
                info!("Deleted search index");
                Ok(())
            }
            Err(e) if e.is_index_missing() => {
                error!(error = %e, "Search index does not exist");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "Failed to delete search index");
                Err(e.into())
            }
        }
    }

    /// Number of documents in the index.
    pub async fn record_count(&self) -> Result<u64, BridgeError> {
        self.count(CountScope::All).await
    }

    /// Number of documents carrying a topic title.
    pub async fn topic_count(&self) -> Result<u64, BridgeError> {
        self.count(CountScope::Titled).await
    }

    pub async fn ping(&self) -> Result<(), BridgeError> {
        self.connection.ping().await
    }

    async fn count(&self, scope: CountScope) -> Result<u64, BridgeError> {
        let client = self.connection.client().await?;
        client.count(scope).await.map_err(|e| {
            error!(scope = ?scope, error = %e, "Failed to count documents");
            BridgeError::from(e)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::Settings;
    use crate::test_support::{EngineCall, MockConnector, MockEngine};
    use forum_search_repository::{EngineConnector, SearchError};

    async fn connected(engine: MockEngine) -> (IndexLoader, Arc<MockEngine>) {
        let engine = Arc::new(engine);
        let connector: Arc<dyn EngineConnector> = Arc::new(MockConnector::new(engine.clone()));
        let connection = Arc::new(ConnectionManager::new(connector));
        connection.connect(&Settings::default()).await.unwrap();
        (IndexLoader::new(connection), engine)
    }

    #[tokio::test]
    async fn test_add_and_remove() {
        let (loader, engine) = connected(MockEngine::new()).await;

        loader
            .add(&[IndexDocument::new(5, "hello world")])
            .await
            .unwrap();
        loader.remove(5).await.unwrap();

        assert_eq!(
            engine.calls().await,
            vec![
                EngineCall::BulkIndex(vec![IndexDocument::new(5, "hello world")]),
                EngineCall::Delete(5),
            ]
        );
    }

    #[tokio::test]
    async fn test_add_empty_is_noop() {
        let (loader, engine) = connected(MockEngine::new()).await;
        loader.add(&[]).await.unwrap();
        assert!(engine.calls().await.is_empty());
    }

    #[tokio::test]
    async fn test_disconnected_calls_fail() {
        let connector: Arc<dyn EngineConnector> =
            Arc::new(MockConnector::new(Arc::new(MockEngine::new())));
        let loader = IndexLoader::new(Arc::new(ConnectionManager::new(connector)));

        assert_eq!(loader.flush().await, Err(BridgeError::NotConnected));
        assert_eq!(loader.remove(1).await, Err(BridgeError::NotConnected));
        assert_eq!(loader.record_count().await, Err(BridgeError::NotConnected));
        assert_eq!(
            loader.add(&[IndexDocument::new(1, "x")]).await,
            Err(BridgeError::NotConnected)
        );
    }

    #[tokio::test]
    async fn test_create_index_already_exists_is_benign() {
        let (loader, _) = connected(
            MockEngine::new().failing("create_index", SearchError::IndexAlreadyExists("posts".to_string())),
        )
        .await;
        assert!(loader.create_index().await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_index_missing_is_benign() {
        let (loader, _) =
            connected(MockEngine::new().failing("delete_index", SearchError::IndexMissing("posts".to_string()))).await;
        assert!(loader.delete_index().await.is_ok());
    }

    #[tokio::test]
    async fn test_delete_index_other_failure() {
        let (loader, _) = connected(
            MockEngine::new().failing("delete_index", SearchError::index_deletion("forbidden")),
        )
        .await;
        assert_eq!(
            loader.delete_index().await,
            Err(BridgeError::Engine(SearchError::index_deletion("forbidden")))
        );
    }

    #[tokio::test]
    async fn test_counts() {
        let (loader, engine) = connected(MockEngine::new().with_counts(42, 7)).await;

        assert_eq!(loader.record_count().await.unwrap(), 42);
        assert_eq!(loader.topic_count().await.unwrap(), 7);
        assert_eq!(
            engine.calls().await,
            vec![
                EngineCall::Count(CountScope::All),
                EngineCall::Count(CountScope::Titled)
            ]
        );
    }
}
