//! # Forum Search Bridge
//!
//! This crate keeps a search index in step with a forum's posts and topics
//! and answers forum searches from it.
//!
//! ## Architecture
//!
//! 1. **Settings**: Persisted configuration, loaded into memory
//! 2. **Connection**: The single engine client handle
//! 3. **Events**: Lifecycle events mirrored into the index
//! 4. **Loader**: Index writes and statistics
//! 5. **Search**: Cached, conflict-aware query handling
//! 6. **Admin**: Toggle, rebuild, flush and status commands

pub mod admin;
pub mod bridge;
pub mod cache;
pub mod config;
pub mod connection;
pub mod errors;
pub mod events;
pub mod guard;
pub mod host;
pub mod loader;
pub mod search;
pub mod settings;

#[cfg(test)]
mod test_support;

pub use admin::{AdminCommand, AdminHandler, AdminResponse, AdminStatus, Notice, StatusReport};
pub use bridge::{HostServices, SearchBridge};
pub use config::BridgeConfig;
pub use errors::BridgeError;
pub use events::{EventAdapter, LifecycleEvent, ReindexSummary};
pub use host::{ForumRepository, PluginRegistry};
pub use search::{QueryHandler, SearchOutcome};
pub use settings::{MemorySettingsStore, Settings, SettingsManager, SettingsStore};
