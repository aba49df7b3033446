//! Search request types as received from the forum host.

use serde::{Deserialize, Serialize};

use crate::TopicId;

/// Which host index a search targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SearchTarget {
    /// Post search, answered from the engine.
    #[default]
    Post,
    /// Topic search. The engine ranks topics through their posts, so this
    /// target always yields no hits.
    Topic,
}

/// A forum-wide search request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchRequest {
    /// Raw query text as typed by the user.
    pub query: String,
    /// The host index being searched.
    #[serde(default, rename = "index")]
    pub target: SearchTarget,
}

impl SearchRequest {
    /// Create a post search.
    pub fn posts(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            target: SearchTarget::Post,
        }
    }

    /// Create a topic search.
    pub fn topics(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            target: SearchTarget::Topic,
        }
    }
}

/// A search restricted to the posts of a single topic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopicSearch {
    pub tid: TopicId,
    pub term: String,
}

impl TopicSearch {
    pub fn new(tid: TopicId, term: impl Into<String>) -> Self {
        Self {
            tid,
            term: term.into(),
        }
    }
}
