//! Error types for the forum search bridge.

use forum_search_repository::SearchError;
use thiserror::Error;

/// Errors that can occur in the forum search bridge.
///
/// A competing search integration being active is not an error; see
/// `SearchOutcome::Bypassed`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BridgeError {
    /// No engine client handle exists.
    #[error("not-connected")]
    NotConnected,

    /// Error returned by the search engine.
    #[error("Engine error: {0}")]
    Engine(#[from] SearchError),

    /// Error from the forum host's repositories.
    #[error("Host error: {0}")]
    HostError(String),

    /// Error reading or writing persisted settings.
    #[error("Settings error: {0}")]
    SettingsError(String),
}

impl BridgeError {
    /// Create a host error.
    pub fn host(msg: impl Into<String>) -> Self {
        Self::HostError(msg.into())
    }

    /// Create a settings error.
    pub fn settings(msg: impl Into<String>) -> Self {
        Self::SettingsError(msg.into())
    }

    /// Whether the failure is the missing engine handle.
    pub fn is_not_connected(&self) -> bool {
        matches!(self, Self::NotConnected)
    }
}
