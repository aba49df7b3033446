//! # Forum Search Shared
//!
//! Plain data types passed between the forum host, the bridge and the
//! search engine repository.

mod document;
mod forum;
mod search;

pub use document::IndexDocument;
pub use forum::{PostFields, TopicFields};
pub use search::{SearchRequest, SearchTarget, TopicSearch};

/// Numeric post identifier. Document ids are always post ids.
pub type PostId = u64;

/// Numeric topic identifier.
pub type TopicId = u64;
