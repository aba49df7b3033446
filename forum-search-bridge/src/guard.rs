//! Detection of competing search integrations.

use std::sync::Arc;

use crate::host::PluginRegistry;

/// Reports whether another search integration is active in the host.
pub struct ConflictGuard {
    registry: Arc<dyn PluginRegistry>,
    competitors: Vec<String>,
}

impl ConflictGuard {
    pub fn new(registry: Arc<dyn PluginRegistry>, competitors: Vec<String>) -> Self {
        Self {
            registry,
            competitors,
        }
    }

    /// The first active competing integration, if any.
    pub fn conflict(&self) -> Option<&str> {
        self.competitors
            .iter()
            .map(String::as_str)
            .find(|id| self.registry.is_active(id))
    }
}
