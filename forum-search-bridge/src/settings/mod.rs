//! Persisted bridge settings.
//!
//! Settings live in the host's key/value store as a flat string map under
//! [`SETTINGS_KEY`]. They are loaded into an in-memory [`Settings`] value,
//! with defaults applied for missing or empty fields.

mod store;

pub use store::{MemorySettingsStore, SettingsStore};

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::{error, info};

use crate::errors::BridgeError;
use forum_search_repository::config::{DEFAULT_HOST, DEFAULT_INDEX_NAME};
use forum_search_repository::{EngineConfig, FieldNames};

/// Identifier of the persisted settings object.
pub const SETTINGS_KEY: &str = "settings:elasticsearch";

/// Field names inside the persisted settings object.
pub mod keys {
    pub const HOST: &str = "host";
    pub const ENABLED: &str = "enabled";
    pub const INDEX_NAME: &str = "posts_index_name";
    pub const USERNAME: &str = "username";
    pub const PASSWORD: &str = "password";
    pub const CONTENT_FIELD: &str = "content_field";
    pub const TITLE_FIELD: &str = "title_field";
}

const KNOWN_KEYS: &[&str] = &[
    keys::HOST,
    keys::ENABLED,
    keys::INDEX_NAME,
    keys::USERNAME,
    keys::PASSWORD,
    keys::CONTENT_FIELD,
    keys::TITLE_FIELD,
];

/// In-memory view of the persisted settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    /// Engine address, `host:port` or a full URL.
    pub host: String,
    /// Whether lifecycle events are mirrored into the index.
    pub enabled: bool,
    /// Name of the posts index.
    pub index_name: String,
    /// Basic-auth user name.
    pub username: Option<String>,
    /// Basic-auth password.
    pub password: Option<String>,
    /// Indexed field names.
    pub fields: FieldNames,
    /// Unrecognised fields, kept as stored.
    pub extra: HashMap<String, String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            enabled: false,
            index_name: DEFAULT_INDEX_NAME.to_string(),
            username: None,
            password: None,
            fields: FieldNames::default(),
            extra: HashMap::new(),
        }
    }
}

impl Settings {
    /// Build settings from a stored map, applying defaults.
    ///
    /// Empty values are treated as absent.
    pub fn from_map(map: &HashMap<String, String>) -> Self {
        let value = |key: &str| {
            map.get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .map(str::to_string)
        };
        let defaults = Self::default();
        let default_fields = FieldNames::default();

        let extra = map
            .iter()
            .filter(|(k, v)| !KNOWN_KEYS.contains(&k.as_str()) && !v.is_empty())
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect();

        Self {
            host: value(keys::HOST).unwrap_or(defaults.host),
            enabled: value(keys::ENABLED).is_some_and(|v| parse_flag(&v)),
            index_name: value(keys::INDEX_NAME).unwrap_or(defaults.index_name),
            username: value(keys::USERNAME),
            password: value(keys::PASSWORD),
            fields: FieldNames {
                content: value(keys::CONTENT_FIELD).unwrap_or(default_fields.content),
                title: value(keys::TITLE_FIELD).unwrap_or(default_fields.title),
            },
            extra,
        }
    }

    /// Connection parameters for the engine client.
    ///
    /// Returns `None` when no host is configured.
    pub fn engine_config(&self) -> Option<EngineConfig> {
        if self.host.trim().is_empty() {
            return None;
        }

        let mut config = EngineConfig::new(&self.host, self.index_name.clone())
            .with_fields(self.fields.clone());
        if let (Some(username), Some(password)) = (&self.username, &self.password) {
            config = config.with_credentials(username.clone(), password.clone());
        }
        Some(config)
    }
}

/// Interpret a boolean-like setting the way the host stores it.
///
/// The leading integer of the value decides: non-zero means on. Values with
/// no leading integer are off.
pub fn parse_flag(value: &str) -> bool {
    let value = value.trim();
    let digits = value
        .strip_prefix(&['-', '+'][..])
        .unwrap_or(value)
        .chars()
        .take_while(char::is_ascii_digit)
        .collect::<String>();
    !digits.is_empty() && digits.chars().any(|c| c != '0')
}

/// Loads, caches and persists the bridge settings.
pub struct SettingsManager {
    store: Arc<dyn SettingsStore>,
    overrides: HashMap<String, String>,
    current: RwLock<Settings>,
}

impl SettingsManager {
    /// Create a manager holding default settings until `load` is called.
    pub fn new(store: Arc<dyn SettingsStore>) -> Self {
        Self::with_overrides(store, HashMap::new())
    }

    /// Create a manager whose `overrides` take precedence over stored values.
    pub fn with_overrides(store: Arc<dyn SettingsStore>, overrides: HashMap<String, String>) -> Self {
        Self {
            store,
            overrides,
            current: RwLock::new(Settings::default()),
        }
    }

    /// Reload settings from the store.
    ///
    /// A store failure is logged and defaults are assumed.
    pub async fn load(&self) -> Settings {
        let mut stored = match self.store.get_object(SETTINGS_KEY).await {
            Ok(stored) => stored,
            Err(e) => {
                error!(error = %e, "Could not fetch settings, assuming defaults");
                HashMap::new()
            }
        };
        stored.extend(self.overrides.clone());

        let settings = Settings::from_map(&stored);
        info!(
            host = %settings.host,
            index = %settings.index_name,
            enabled = settings.enabled,
            "Loaded search settings"
        );

        *self.current.write().await = settings.clone();
        settings
    }

    /// The currently loaded settings.
    pub async fn current(&self) -> Settings {
        self.current.read().await.clone()
    }

    /// Whether indexing is enabled.
    pub async fn is_enabled(&self) -> bool {
        self.current.read().await.enabled
    }

    /// Persist the indexing flag and apply it in memory.
    pub async fn set_enabled(&self, enabled: bool) -> Result<(), BridgeError> {
        let value = if enabled { "1" } else { "0" };
        self.store
            .set_object_field(SETTINGS_KEY, keys::ENABLED, value)
            .await?;

        self.current.write().await.enabled = enabled;
        info!(enabled = enabled, "Search indexing toggled");
        Ok(())
    }

    /// Persist several fields, then reload.
    pub async fn save(&self, values: &HashMap<String, String>) -> Result<Settings, BridgeError> {
        for (field, value) in values {
            self.store
                .set_object_field(SETTINGS_KEY, field, value)
                .await?;
        }
        Ok(self.load().await)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct FailingStore;

    #[async_trait]
    impl SettingsStore for FailingStore {
        async fn get_object(&self, _key: &str) -> Result<HashMap<String, String>, BridgeError> {
            Err(BridgeError::settings("store offline"))
        }

        async fn set_object_field(
            &self,
            _key: &str,
            _field: &str,
            _value: &str,
        ) -> Result<(), BridgeError> {
            Err(BridgeError::settings("store offline"))
        }
    }

    fn map(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("1"));
        assert!(parse_flag("2"));
        assert!(parse_flag("10abc"));
        assert!(parse_flag("-1"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("00"));
        assert!(!parse_flag(""));
        assert!(!parse_flag("on"));
        assert!(!parse_flag("true"));
    }

    #[test]
    fn test_from_empty_map_uses_defaults() {
        let settings = Settings::from_map(&HashMap::new());
        assert_eq!(settings, Settings::default());
        assert!(!settings.enabled);
        assert_eq!(settings.host, "localhost:9200");
        assert_eq!(settings.index_name, "posts");
    }

    #[test]
    fn test_from_map() {
        let settings = Settings::from_map(&map(&[
            ("host", "search.internal:9200"),
            ("enabled", "1"),
            ("posts_index_name", "forum"),
            ("title_field", "subject"),
            ("theme", "dark"),
        ]));

        assert_eq!(settings.host, "search.internal:9200");
        assert!(settings.enabled);
        assert_eq!(settings.index_name, "forum");
        assert_eq!(settings.fields.content, "content");
        assert_eq!(settings.fields.title, "subject");
        assert_eq!(settings.extra.get("theme").map(String::as_str), Some("dark"));
    }

    #[test]
    fn test_empty_values_fall_back_to_defaults() {
        let settings = Settings::from_map(&map(&[("host", ""), ("posts_index_name", "  ")]));
        assert_eq!(settings.host, "localhost:9200");
        assert_eq!(settings.index_name, "posts");
    }

    #[test]
    fn test_engine_config() {
        let settings = Settings::from_map(&map(&[
            ("host", "es:9200"),
            ("username", "elastic"),
            ("password", "secret"),
        ]));
        let config = settings.engine_config().unwrap();

        assert_eq!(config.url, "http://es:9200");
        assert_eq!(config.index_name, "posts");
        assert_eq!(
            config.credentials,
            Some(("elastic".to_string(), "secret".to_string()))
        );
    }

    #[test]
    fn test_engine_config_requires_host() {
        let settings = Settings {
            host: String::new(),
            ..Settings::default()
        };
        assert!(settings.engine_config().is_none());
    }

    #[test]
    fn test_credentials_need_both_parts() {
        let settings = Settings::from_map(&map(&[("username", "elastic")]));
        assert!(settings.engine_config().unwrap().credentials.is_none());
    }

    #[tokio::test]
    async fn test_load_applies_overrides() {
        let store = Arc::new(MemorySettingsStore::with_object(
            SETTINGS_KEY,
            map(&[("host", "stored:9200"), ("enabled", "0")]),
        ));
        let manager = SettingsManager::with_overrides(store, map(&[("enabled", "1")]));

        let settings = manager.load().await;
        assert_eq!(settings.host, "stored:9200");
        assert!(settings.enabled);
        assert!(manager.is_enabled().await);
    }

    #[tokio::test]
    async fn test_load_store_failure_assumes_defaults() {
        let manager = SettingsManager::new(Arc::new(FailingStore));
        assert_eq!(manager.load().await, Settings::default());
    }

    #[tokio::test]
    async fn test_set_enabled_persists() {
        let store = Arc::new(MemorySettingsStore::new());
        let manager = SettingsManager::new(store.clone());

        manager.set_enabled(true).await.unwrap();
        assert!(manager.is_enabled().await);
        assert_eq!(store.get_object(SETTINGS_KEY).await.unwrap()["enabled"], "1");

        manager.set_enabled(false).await.unwrap();
        assert!(!manager.is_enabled().await);
        assert_eq!(store.get_object(SETTINGS_KEY).await.unwrap()["enabled"], "0");
    }

    #[tokio::test]
    async fn test_set_enabled_failure_keeps_memory() {
        let manager = SettingsManager::new(Arc::new(FailingStore));
        assert!(manager.set_enabled(true).await.is_err());
        assert!(!manager.is_enabled().await);
    }

    #[tokio::test]
    async fn test_save_reloads() {
        let manager = SettingsManager::new(Arc::new(MemorySettingsStore::new()));
        let settings = manager
            .save(&map(&[("host", "other:9200"), ("posts_index_name", "forum")]))
            .await
            .unwrap();

        assert_eq!(settings.host, "other:9200");
        assert_eq!(manager.current().await.index_name, "forum");
    }
}
