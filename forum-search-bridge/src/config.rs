//! Static limits for the bridge.

use std::time::Duration;

/// Number of distinct queries kept in the result cache.
pub const DEFAULT_CACHE_CAPACITY: usize = 20;

/// How long a cached result stays fresh.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60 * 60);

/// Maximum number of ids returned per search.
pub const DEFAULT_MAX_RESULTS: usize = 20;

/// Search integrations that conflict with this one.
pub const DEFAULT_COMPETING_PLUGINS: &[&str] = &["nodebb-plugin-dbsearch"];

/// Configuration for the bridge components.
#[derive(Debug, Clone)]
pub struct BridgeConfig {
    /// Capacity of the query cache.
    pub cache_capacity: usize,
    /// Time-to-live of query cache entries.
    pub cache_ttl: Duration,
    /// Maximum number of ids returned per search.
    pub max_results: usize,
    /// Integrations whose presence disables search through this bridge.
    pub competing_plugins: Vec<String>,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            cache_capacity: DEFAULT_CACHE_CAPACITY,
            cache_ttl: DEFAULT_CACHE_TTL,
            max_results: DEFAULT_MAX_RESULTS,
            competing_plugins: DEFAULT_COMPETING_PLUGINS
                .iter()
                .map(|id| id.to_string())
                .collect(),
        }
    }
}
