//! Forum lifecycle events and their mirroring into the search index.

mod adapter;

pub use adapter::{EventAdapter, ReindexSummary};

use forum_search_shared::{PostFields, PostId, TopicFields, TopicId};

/// A content change reported by the forum host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    PostSave(PostFields),
    PostEdit(PostFields),
    PostRestore(PostFields),
    PostDelete(PostId),
    TopicPost(TopicFields),
    TopicRestore(TopicFields),
    TopicEdit(TopicFields),
    TopicDelete(TopicId),
}

impl LifecycleEvent {
    /// Short name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::PostSave(_) => "post_save",
            Self::PostEdit(_) => "post_edit",
            Self::PostRestore(_) => "post_restore",
            Self::PostDelete(_) => "post_delete",
            Self::TopicPost(_) => "topic_post",
            Self::TopicRestore(_) => "topic_restore",
            Self::TopicEdit(_) => "topic_edit",
            Self::TopicDelete(_) => "topic_delete",
        }
    }
}
