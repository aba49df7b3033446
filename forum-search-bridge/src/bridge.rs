//! The assembled bridge service.

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{info, warn};

use crate::admin::AdminHandler;
use crate::cache::QueryCache;
use crate::config::BridgeConfig;
use crate::connection::ConnectionManager;
use crate::events::EventAdapter;
use crate::guard::ConflictGuard;
use crate::host::{ForumRepository, PluginRegistry};
use crate::loader::IndexLoader;
use crate::search::QueryHandler;
use crate::settings::{SettingsManager, SettingsStore};
use forum_search_repository::EngineConnector;

/// Host-provided collaborators of the bridge.
pub struct HostServices {
    pub store: Arc<dyn SettingsStore>,
    pub forum: Arc<dyn ForumRepository>,
    pub registry: Arc<dyn PluginRegistry>,
}

/// One instance per process, shared by reference with every host hook.
pub struct SearchBridge {
    settings: Arc<SettingsManager>,
    connection: Arc<ConnectionManager>,
    loader: Arc<IndexLoader>,
    events: Arc<EventAdapter>,
    search: QueryHandler,
    admin: AdminHandler,
}

impl SearchBridge {
    /// Wire the components. Nothing is loaded or connected until [`init`].
    ///
    /// [`init`]: SearchBridge::init
    pub fn new(
        host: HostServices,
        connector: Arc<dyn EngineConnector>,
        overrides: HashMap<String, String>,
        config: BridgeConfig,
    ) -> Self {
        let settings = Arc::new(SettingsManager::with_overrides(host.store, overrides));
        let connection = Arc::new(ConnectionManager::new(connector));
        let loader = Arc::new(IndexLoader::new(connection.clone()));
        let events = Arc::new(EventAdapter::new(
            settings.clone(),
            host.forum.clone(),
            loader.clone(),
        ));
        let search = QueryHandler::new(
            connection.clone(),
            host.forum,
            ConflictGuard::new(host.registry, config.competing_plugins),
            QueryCache::new(config.cache_capacity, config.cache_ttl),
            config.max_results,
        );
        let admin = AdminHandler::new(
            settings.clone(),
            connection.clone(),
            loader.clone(),
            events.clone(),
        );

        Self {
            settings,
            connection,
            loader,
            events,
            search,
            admin,
        }
    }

    /// Load settings and connect.
    ///
    /// A connection failure is logged; the bridge stays usable and every
    /// engine call reports `not-connected` until the next reconnect.
    pub async fn init(&self) {
        let settings = self.settings.load().await;
        match self.connection.connect(&settings).await {
            Ok(()) => info!(host = %settings.host, "Search bridge ready"),
            Err(e) => warn!(error = %e, "Search bridge started without an engine connection"),
        }
    }

    pub fn settings(&self) -> &SettingsManager {
        &self.settings
    }

    pub fn connection(&self) -> &ConnectionManager {
        &self.connection
    }

    pub fn loader(&self) -> &IndexLoader {
        &self.loader
    }

    pub fn events(&self) -> &EventAdapter {
        &self.events
    }

    pub fn search(&self) -> &QueryHandler {
        &self.search
    }

    pub fn admin(&self) -> &AdminHandler {
        &self.admin
    }
}
