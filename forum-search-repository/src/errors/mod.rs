//! Error types for the forum search repository.

mod search_error;

pub use search_error::SearchError;
