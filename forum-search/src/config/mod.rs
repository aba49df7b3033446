//! Process configuration read from the environment.

mod dependencies;

pub use dependencies::Dependencies;

use std::collections::HashMap;
use std::time::Duration;

use crate::ServiceError;
use forum_search_bridge::settings::keys;
use forum_search_bridge::BridgeConfig;

/// Overrides the stored engine host.
pub const ENV_HOST: &str = "FORUM_SEARCH_HOST";
/// Overrides the stored posts index name.
pub const ENV_INDEX: &str = "FORUM_SEARCH_INDEX";
/// Overrides the stored indexing flag.
pub const ENV_ENABLED: &str = "FORUM_SEARCH_ENABLED";
/// Number of cached queries.
pub const ENV_CACHE_CAPACITY: &str = "FORUM_SEARCH_CACHE_CAPACITY";
/// Cache time-to-live in seconds.
pub const ENV_CACHE_TTL_SECS: &str = "FORUM_SEARCH_CACHE_TTL_SECS";

/// Settings fields that take precedence over the stored ones.
///
/// Unset and empty variables are ignored.
pub fn settings_overrides(lookup: impl Fn(&str) -> Option<String>) -> HashMap<String, String> {
    [
        (ENV_HOST, keys::HOST),
        (ENV_INDEX, keys::INDEX_NAME),
        (ENV_ENABLED, keys::ENABLED),
    ]
    .into_iter()
    .filter_map(|(var, key)| {
        lookup(var)
            .filter(|value| !value.trim().is_empty())
            .map(|value| (key.to_string(), value))
    })
    .collect()
}

/// Bridge limits, defaults adjusted by the environment.
pub fn bridge_config(lookup: impl Fn(&str) -> Option<String>) -> Result<BridgeConfig, ServiceError> {
    let mut config = BridgeConfig::default();

    if let Some(capacity) = lookup(ENV_CACHE_CAPACITY) {
        config.cache_capacity = capacity
            .trim()
            .parse()
            .map_err(|e| ServiceError::config(format!("Invalid {}: {}", ENV_CACHE_CAPACITY, e)))?;
    }
    if let Some(ttl) = lookup(ENV_CACHE_TTL_SECS) {
        let secs: u64 = ttl
            .trim()
            .parse()
            .map_err(|e| ServiceError::config(format!("Invalid {}: {}", ENV_CACHE_TTL_SECS, e)))?;
        config.cache_ttl = Duration::from_secs(secs);
    }

    Ok(config)
}
