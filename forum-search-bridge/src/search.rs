//! Answering forum search requests from the index.

use std::sync::Arc;

use tracing::{debug, error, instrument, warn};

use crate::cache::QueryCache;
use crate::connection::ConnectionManager;
use crate::errors::BridgeError;
use crate::guard::ConflictGuard;
use crate::host::ForumRepository;
use forum_search_repository::EngineQuery;
use forum_search_shared::{SearchRequest, SearchTarget, TopicSearch};

/// Result of a forum-wide search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    /// A competing integration is active; the request is handed back
    /// untouched for it to answer.
    Bypassed(SearchRequest),
    /// Matched post ids, in engine order, as the engine reported them.
    Hits(Vec<String>),
}

impl SearchOutcome {
    /// The matched ids, empty when bypassed.
    pub fn ids(&self) -> &[String] {
        match self {
            Self::Bypassed(_) => &[],
            Self::Hits(ids) => ids,
        }
    }
}

pub struct QueryHandler {
    connection: Arc<ConnectionManager>,
    forum: Arc<dyn ForumRepository>,
    guard: ConflictGuard,
    cache: QueryCache,
    max_results: usize,
}

impl QueryHandler {
    pub fn new(
        connection: Arc<ConnectionManager>,
        forum: Arc<dyn ForumRepository>,
        guard: ConflictGuard,
        cache: QueryCache,
        max_results: usize,
    ) -> Self {
        Self {
            connection,
            forum,
            guard,
            cache,
            max_results,
        }
    }

    /// Search all posts, serving repeated queries from the cache.
    #[instrument(skip(self, request), fields(query = %request.query))]
    pub async fn search(&self, request: SearchRequest) -> Result<SearchOutcome, BridgeError> {
        if let Some(plugin) = self.guard.conflict() {
            warn!(plugin = plugin, "Competing search integration active, bypassing");
            return Ok(SearchOutcome::Bypassed(request));
        }

        if request.target == SearchTarget::Topic {
            return Ok(SearchOutcome::Hits(Vec::new()));
        }

        if let Some(ids) = self.cache.get(&request.query) {
            debug!(count = ids.len(), "Serving search from cache");
            return Ok(SearchOutcome::Hits(ids));
        }

        let client = self.connection.client().await?;
        let query = EngineQuery::relevance(request.query.as_str()).with_size(self.max_results);
        let ids = client.search(&query).await.map_err(|e| {
            error!(error = %e, "Search query failed");
            BridgeError::from(e)
        })?;

        debug!(count = ids.len(), "Search returned hits");
        self.cache.insert(request.query, ids.clone());
        Ok(SearchOutcome::Hits(ids))
    }

    /// Search the posts of a single topic. Results are not cached.
    #[instrument(skip(self, search), fields(tid = search.tid, term = %search.term))]
    pub async fn search_topic(&self, search: &TopicSearch) -> Result<Vec<String>, BridgeError> {
        let client = self.connection.client().await?;

        let (main_pid, mut pids) = tokio::try_join!(
            self.forum.get_topic_main_pid(search.tid),
            self.forum.get_topic_pids(search.tid)
        )?;
        if let Some(main_pid) = main_pid.filter(|pid| *pid != 0) {
            if !pids.contains(&main_pid) {
                pids.insert(0, main_pid);
            }
        }

        let query = EngineQuery::within_posts(search.term.as_str(), pids)
            .with_size(self.max_results);
        client.search(&query).await.map_err(|e| {
            error!(tid = search.tid, error = %e, "Topic search failed");
            BridgeError::from(e)
        })
    }
}
