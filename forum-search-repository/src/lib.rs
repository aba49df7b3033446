//! # Forum Search Repository
//!
//! This crate provides the traits and implementations for talking to the
//! search engine. It includes definitions for errors, interfaces, and a
//! concrete implementation for OpenSearch (wire compatible with
//! Elasticsearch).

pub mod config;
pub mod errors;
pub mod interfaces;
pub mod opensearch;
pub mod types;

pub use config::{EngineConfig, FieldNames};
pub use errors::SearchError;
pub use interfaces::{EngineConnector, SearchEngineClient};
pub use opensearch::{OpenSearchClient, OpenSearchConnector};
pub use types::{CountScope, EngineQuery};
