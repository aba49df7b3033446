//! Interfaces the forum host provides to the bridge.

use async_trait::async_trait;

use crate::errors::BridgeError;
use forum_search_shared::{PostFields, PostId, TopicFields, TopicId};

/// Read access to the forum's posts and topics.
///
/// Implementations report failures as `BridgeError::HostError`.
#[async_trait]
pub trait ForumRepository: Send + Sync {
    /// Fetch `pid` and `content` of a single post.
    async fn get_post_fields(&self, pid: PostId) -> Result<Option<PostFields>, BridgeError>;

    /// Fetch `pid` and `content` of several posts. Missing posts are omitted.
    async fn get_posts_fields(&self, pids: &[PostId]) -> Result<Vec<PostFields>, BridgeError>;

    /// Fetch the main post id of a topic.
    async fn get_topic_main_pid(&self, tid: TopicId) -> Result<Option<PostId>, BridgeError>;

    /// Fetch the reply post ids of a topic.
    async fn get_topic_pids(&self, tid: TopicId) -> Result<Vec<PostId>, BridgeError>;

    /// Fetch every topic id (the `topics:tid` sorted set, full range).
    async fn get_all_topic_ids(&self) -> Result<Vec<TopicId>, BridgeError>;

    /// Fetch `tid`, `mainPid` and `title` of several topics.
    async fn get_topics_fields(&self, tids: &[TopicId]) -> Result<Vec<TopicFields>, BridgeError>;
}

/// Knows which plugins are active in the host.
pub trait PluginRegistry: Send + Sync {
    fn is_active(&self, plugin_id: &str) -> bool;
}
