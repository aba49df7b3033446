//! Dependency initialization and wiring for the forum search bridge.

use std::env;
use std::sync::Arc;
use tracing::info;

use super::{bridge_config, settings_overrides};
use crate::ServiceError;
use forum_search_bridge::{
    ForumRepository, HostServices, PluginRegistry, SearchBridge, SettingsStore,
};
use forum_search_repository::{EngineConnector, OpenSearchConnector};

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The bridge, ready to receive host hooks.
    pub bridge: Arc<SearchBridge>,
}

impl Dependencies {
    /// Initialize the bridge from the host's services and the environment.
    ///
    /// # Environment Variables
    ///
    /// - `FORUM_SEARCH_HOST`: engine host, overrides the stored setting
    /// - `FORUM_SEARCH_INDEX`: posts index name, overrides the stored setting
    /// - `FORUM_SEARCH_ENABLED`: indexing flag, overrides the stored setting
    /// - `FORUM_SEARCH_CACHE_CAPACITY`: number of cached queries (default: 20)
    /// - `FORUM_SEARCH_CACHE_TTL_SECS`: cache lifetime in seconds (default: 3600)
    ///
    /// A `.env` file is read first when present. An unreachable engine does
    /// not fail initialization.
    pub async fn new(
        store: Arc<dyn SettingsStore>,
        forum: Arc<dyn ForumRepository>,
        registry: Arc<dyn PluginRegistry>,
    ) -> Result<Self, ServiceError> {
        Self::with_connector(store, forum, registry, Arc::new(OpenSearchConnector::new())).await
    }

    /// Like [`Dependencies::new`] with a custom engine connector.
    pub async fn with_connector(
        store: Arc<dyn SettingsStore>,
        forum: Arc<dyn ForumRepository>,
        registry: Arc<dyn PluginRegistry>,
        connector: Arc<dyn EngineConnector>,
    ) -> Result<Self, ServiceError> {
        dotenv::dotenv().ok();

        let lookup = |name: &str| env::var(name).ok();
        let overrides = settings_overrides(lookup);
        let config = bridge_config(lookup)?;

        info!(
            overrides = overrides.len(),
            cache_capacity = config.cache_capacity,
            cache_ttl_secs = config.cache_ttl.as_secs(),
            "Initializing dependencies"
        );

        let host = HostServices {
            store,
            forum,
            registry,
        };
        let bridge = SearchBridge::new(host, connector, overrides, config);
        bridge.init().await;

        Ok(Self {
            bridge: Arc::new(bridge),
        })
    }
}
