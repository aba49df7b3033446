//! Search engine client trait definition.
//!
//! This module defines the abstract interface for search engine operations,
//! allowing for different backend implementations (OpenSearch, Elasticsearch, etc.).

use async_trait::async_trait;

use crate::errors::SearchError;
use crate::types::{CountScope, EngineQuery};
use forum_search_shared::{IndexDocument, PostId};

/// Abstract interface for search engine operations.
///
/// A client is bound to a single index when it is built; every method
/// operates on that index. Implementations can be swapped for different
/// backends (OpenSearch, mock, etc.).
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` to allow use across async tasks.
///
/// # Error Handling
///
/// All methods return `Result<T, SearchError>` for consistent error handling.
#[async_trait]
pub trait SearchEngineClient: Send + Sync {
    /// Check that the engine is reachable.
    async fn ping(&self) -> Result<(), SearchError>;

    /// Upsert documents in a single bulk operation.
    ///
    /// Each document is stored under its post id; an existing document with
    /// the same id is replaced.
    ///
    /// # Returns
    ///
    /// * `Ok(())` - If all documents were indexed successfully
    /// * `Err(SearchError::BulkIndexError)` - If any document failed to index
    async fn bulk_index(&self, documents: &[IndexDocument]) -> Result<(), SearchError>;

    /// Delete a document by post id.
    ///
    /// Deleting a document that does not exist is not an error.
    async fn delete_document(&self, pid: PostId) -> Result<(), SearchError>;

    /// Delete every document in the index, keeping the index itself.
    async fn delete_all(&self) -> Result<(), SearchError>;

    /// Create the index with the two-field (content, title) mapping.
    ///
    /// # Returns
    ///
    /// * `Err(SearchError::IndexAlreadyExists)` - If the index is already there
    async fn create_index(&self) -> Result<(), SearchError>;

    /// Delete the index.
    ///
    /// # Returns
    ///
    /// * `Err(SearchError::IndexMissing)` - If there was no index to delete
    async fn delete_index(&self) -> Result<(), SearchError>;

    /// Count documents in the index.
    async fn count(&self, scope: CountScope) -> Result<u64, SearchError>;

    /// Run a query and return the matching document ids in relevance order.
    ///
    /// Ids are returned exactly as the engine reports them.
    ///
    /// # Example
    ///
    /// ```ignore
    /// let ids = client.search(&EngineQuery::relevance("hello world")).await?;
    /// ```
    async fn search(&self, query: &EngineQuery) -> Result<Vec<String>, SearchError>;
}
