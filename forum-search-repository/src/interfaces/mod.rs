//! Interface definitions for the search engine client.
//!
//! This module defines the abstract `SearchEngineClient` trait and the
//! `EngineConnector` that builds clients from configuration, allowing for
//! dependency injection and swappable search backend implementations.

mod engine_connector;
mod search_engine_client;

pub use engine_connector::EngineConnector;
pub use search_engine_client::SearchEngineClient;
