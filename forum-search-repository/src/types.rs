//! Request types for search engine operations.

use forum_search_shared::PostId;

/// Number of hits requested from the engine unless configured otherwise.
pub const DEFAULT_RESULT_SIZE: usize = 20;

/// A query to run against the posts index.
///
/// The text is passed as typed by the user; escaping of search-syntax
/// metacharacters happens in the engine implementation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineQuery {
    /// Relevance match over both the content and the title fields.
    Relevance { text: String, size: usize },
    /// Content match restricted to the given post ids.
    WithinPosts {
        text: String,
        pids: Vec<PostId>,
        size: usize,
    },
}

impl EngineQuery {
    /// A forum-wide relevance query.
    pub fn relevance(text: impl Into<String>) -> Self {
        Self::Relevance {
            text: text.into(),
            size: DEFAULT_RESULT_SIZE,
        }
    }

    /// A content query restricted to a set of posts.
    pub fn within_posts(text: impl Into<String>, pids: Vec<PostId>) -> Self {
        Self::WithinPosts {
            text: text.into(),
            pids,
            size: DEFAULT_RESULT_SIZE,
        }
    }

    /// Override the number of hits requested.
    pub fn with_size(mut self, new_size: usize) -> Self {
        match &mut self {
            Self::Relevance { size, .. } | Self::WithinPosts { size, .. } => *size = new_size,
        }
        self
    }

    /// The raw query text.
    pub fn text(&self) -> &str {
        match self {
            Self::Relevance { text, .. } | Self::WithinPosts { text, .. } => text,
        }
    }

    /// The maximum number of hits requested.
    pub fn size(&self) -> usize {
        match self {
            Self::Relevance { size, .. } | Self::WithinPosts { size, .. } => *size,
        }
    }
}

/// Which documents a count covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountScope {
    /// Every document in the index.
    All,
    /// Only documents carrying a title, i.e. one per topic.
    Titled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_defaults_to_twenty_hits() {
        assert_eq!(EngineQuery::relevance("hello").size(), 20);
        assert_eq!(EngineQuery::within_posts("hello", vec![1, 2]).size(), 20);
    }

    #[test]
    fn test_with_size() {
        let query = EngineQuery::relevance("hello").with_size(5);
        assert_eq!(query.size(), 5);
        assert_eq!(query.text(), "hello");
    }
}
