//! OpenSearch implementation of the search engine client.
//!
//! This module provides a concrete implementation of `SearchEngineClient`
//! using OpenSearch as the backend, and the connector that builds it from
//! configuration.

mod client;
mod connector;
mod index_config;
mod queries;

pub use client::OpenSearchClient;
pub use connector::OpenSearchConnector;
pub use index_config::get_index_settings;
pub use queries::escape_query_text;
