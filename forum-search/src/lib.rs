//! # Forum Search
//!
//! Entry point for embedding the forum search bridge in a host process.
//!
//! This crate reads process configuration, sets up logging and wires the
//! bridge to the OpenSearch connector.

pub mod config;
pub mod telemetry;

pub use config::Dependencies;
pub use telemetry::init_tracing;

use thiserror::Error;

/// Errors that can occur while setting up the bridge.
#[derive(Error, Debug)]
pub enum ServiceError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl ServiceError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
