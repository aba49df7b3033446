//! The document stored in the search index for a single forum post.

use serde::{Deserialize, Serialize};

use crate::{PostFields, PostId};

/// A single indexed record corresponding to one forum post.
///
/// `title` is only present on the document of a topic's main post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexDocument {
    /// The post id, also used as the engine document id.
    pub id: PostId,
    /// Raw post content.
    pub content: String,
    /// Topic title, attached to the main post only.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub title: Option<String>,
}

impl IndexDocument {
    /// Create a document without a title.
    pub fn new(id: PostId, content: impl Into<String>) -> Self {
        Self {
            id,
            content: content.into(),
            title: None,
        }
    }

    /// Build a document from host post fields.
    ///
    /// Posts without an id (`pid == 0`) or without content produce no document.
    pub fn from_post(post: &PostFields) -> Option<Self> {
        if post.pid == 0 || post.content.is_empty() {
            return None;
        }
        Some(Self::new(post.pid, post.content.clone()))
    }

    /// Attach a topic title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}
