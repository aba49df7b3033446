//! Mock engine and host implementations shared by the unit tests.

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::errors::BridgeError;
use crate::host::{ForumRepository, PluginRegistry};
use forum_search_repository::{
    CountScope, EngineConfig, EngineConnector, EngineQuery, SearchEngineClient, SearchError,
};
use forum_search_shared::{IndexDocument, PostFields, PostId, TopicFields, TopicId};

/// A call received by the mock engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineCall {
    Ping,
    BulkIndex(Vec<IndexDocument>),
    Delete(PostId),
    DeleteAll,
    CreateIndex,
    DeleteIndex,
    Count(CountScope),
    Search(EngineQuery),
}

/// Mock engine recording every call.
#[derive(Default)]
pub struct MockEngine {
    calls: Mutex<Vec<EngineCall>>,
    hits: Vec<String>,
    document_count: u64,
    topic_count: u64,
    failures: HashMap<&'static str, SearchError>,
}

impl MockEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_hits(mut self, hits: &[&str]) -> Self {
        self.hits = hits.iter().map(|id| id.to_string()).collect();
        self
    }

    pub fn with_counts(mut self, documents: u64, topics: u64) -> Self {
        self.document_count = documents;
        self.topic_count = topics;
        self
    }

    /// Make the named operation fail with `error`.
    pub fn failing(mut self, operation: &'static str, error: SearchError) -> Self {
        self.failures.insert(operation, error);
        self
    }

    pub async fn calls(&self) -> Vec<EngineCall> {
        self.calls.lock().await.clone()
    }

    pub async fn indexed(&self) -> Vec<IndexDocument> {
        self.calls
            .lock()
            .await
            .iter()
            .filter_map(|call| match call {
                EngineCall::BulkIndex(docs) => Some(docs.clone()),
                _ => None,
            })
            .flatten()
            .collect()
    }

    pub async fn deleted(&self) -> Vec<PostId> {
        self.calls
            .lock()
            .await
            .iter()
            .filter_map(|call| match call {
                EngineCall::Delete(pid) => Some(*pid),
                _ => None,
            })
            .collect()
    }

    async fn record(&self, operation: &'static str, call: EngineCall) -> Result<(), SearchError> {
        self.calls.lock().await.push(call);
        match self.failures.get(operation) {
            Some(error) => Err(error.clone()),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl SearchEngineClient for MockEngine {
    async fn ping(&self) -> Result<(), SearchError> {
        self.record("ping", EngineCall::Ping).await
    }

    async fn bulk_index(&self, documents: &[IndexDocument]) -> Result<(), SearchError> {
        self.record("bulk_index", EngineCall::BulkIndex(documents.to_vec()))
            .await
    }

    async fn delete_document(&self, pid: PostId) -> Result<(), SearchError> {
        self.record("delete_document", EngineCall::Delete(pid)).await
    }

    async fn delete_all(&self) -> Result<(), SearchError> {
        self.record("delete_all", EngineCall::DeleteAll).await
    }

    async fn create_index(&self) -> Result<(), SearchError> {
        self.record("create_index", EngineCall::CreateIndex).await
    }

    async fn delete_index(&self) -> Result<(), SearchError> {
        self.record("delete_index", EngineCall::DeleteIndex).await
    }

    async fn count(&self, scope: CountScope) -> Result<u64, SearchError> {
        self.record("count", EngineCall::Count(scope)).await?;
        Ok(match scope {
            CountScope::All => self.document_count,
            CountScope::Titled => self.topic_count,
        })
    }

    async fn search(&self, query: &EngineQuery) -> Result<Vec<String>, SearchError> {
        self.record("search", EngineCall::Search(query.clone()))
            .await?;
        Ok(self.hits.iter().take(query.size()).cloned().collect())
    }
}

/// Connector handing out a shared mock engine.
pub struct MockConnector {
    engine: Arc<MockEngine>,
    configs: Mutex<Vec<EngineConfig>>,
    fail: bool,
}

impl MockConnector {
    pub fn new(engine: Arc<MockEngine>) -> Self {
        Self {
            engine,
            configs: Mutex::new(Vec::new()),
            fail: false,
        }
    }

    pub fn failing(engine: Arc<MockEngine>) -> Self {
        Self {
            fail: true,
            ..Self::new(engine)
        }
    }

    pub async fn configs(&self) -> Vec<EngineConfig> {
        self.configs.lock().await.clone()
    }
}

#[async_trait]
impl EngineConnector for MockConnector {
    async fn connect(
        &self,
        config: &EngineConfig,
    ) -> Result<Arc<dyn SearchEngineClient>, SearchError> {
        self.configs.lock().await.push(config.clone());
        if self.fail {
            return Err(SearchError::connection("connection refused"));
        }
        Ok(self.engine.clone())
    }
}

/// In-memory forum with call counting.
#[derive(Default)]
pub struct MockForum {
    posts: HashMap<PostId, PostFields>,
    topics: HashMap<TopicId, TopicFields>,
    replies: HashMap<TopicId, Vec<PostId>>,
    topic_order: Vec<TopicId>,
    calls: AtomicUsize,
}

impl MockForum {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a topic with its main post and replies.
    pub fn with_topic(
        mut self,
        tid: TopicId,
        title: &str,
        main: (PostId, &str),
        replies: &[(PostId, &str)],
    ) -> Self {
        self.posts.insert(main.0, PostFields::new(main.0, main.1));
        for (pid, content) in replies {
            self.posts.insert(*pid, PostFields::new(*pid, *content));
        }
        self.topics
            .insert(tid, TopicFields::new(tid, Some(main.0), title));
        self.replies
            .insert(tid, replies.iter().map(|(pid, _)| *pid).collect());
        self.topic_order.push(tid);
        self
    }

    pub fn topic(&self, tid: TopicId) -> TopicFields {
        self.topics.get(&tid).cloned().unwrap_or_default()
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn touch(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }
}

#[async_trait]
impl ForumRepository for MockForum {
    async fn get_post_fields(&self, pid: PostId) -> Result<Option<PostFields>, BridgeError> {
        self.touch();
        Ok(self.posts.get(&pid).cloned())
    }

    async fn get_posts_fields(&self, pids: &[PostId]) -> Result<Vec<PostFields>, BridgeError> {
        self.touch();
        Ok(pids
            .iter()
            .filter_map(|pid| self.posts.get(pid).cloned())
            .collect())
    }

    async fn get_topic_main_pid(&self, tid: TopicId) -> Result<Option<PostId>, BridgeError> {
        self.touch();
        Ok(self.topics.get(&tid).and_then(|topic| topic.main_pid))
    }

    async fn get_topic_pids(&self, tid: TopicId) -> Result<Vec<PostId>, BridgeError> {
        self.touch();
        Ok(self.replies.get(&tid).cloned().unwrap_or_default())
    }

    async fn get_all_topic_ids(&self) -> Result<Vec<TopicId>, BridgeError> {
        self.touch();
        Ok(self.topic_order.clone())
    }

    async fn get_topics_fields(&self, tids: &[TopicId]) -> Result<Vec<TopicFields>, BridgeError> {
        self.touch();
        Ok(tids
            .iter()
            .filter_map(|tid| self.topics.get(tid).cloned())
            .collect())
    }
}

/// Registry with a fixed set of active plugins.
#[derive(Default)]
pub struct MockRegistry {
    active: HashSet<String>,
}

impl MockRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_active(plugin_id: &str) -> Self {
        let mut active = HashSet::new();
        active.insert(plugin_id.to_string());
        Self { active }
    }
}

impl PluginRegistry for MockRegistry {
    fn is_active(&self, plugin_id: &str) -> bool {
        self.active.contains(plugin_id)
    }
}
