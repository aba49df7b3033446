//! Persisted settings storage.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::errors::BridgeError;

/// Flat key/value object storage provided by the forum host.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Fetch every field of the object stored under `key`.
    ///
    /// A missing object yields an empty map.
    async fn get_object(&self, key: &str) -> Result<HashMap<String, String>, BridgeError>;

    /// Set a single field of the object stored under `key`.
    async fn set_object_field(&self, key: &str, field: &str, value: &str)
        -> Result<(), BridgeError>;
}

/// In-process settings store.
#[derive(Debug, Default)]
pub struct MemorySettingsStore {
    objects: Mutex<HashMap<String, HashMap<String, String>>>,
}

impl MemorySettingsStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store holding a single object.
    pub fn with_object(key: impl Into<String>, fields: HashMap<String, String>) -> Self {
        let mut objects = HashMap::new();
        objects.insert(key.into(), fields);
        Self {
            objects: Mutex::new(objects),
        }
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn get_object(&self, key: &str) -> Result<HashMap<String, String>, BridgeError> {
        Ok(self
            .objects
            .lock()
            .await
            .get(key)
            .cloned()
            .unwrap_or_default())
    }

    async fn set_object_field(
        &self,
        key: &str,
        field: &str,
        value: &str,
    ) -> Result<(), BridgeError> {
        self.objects
            .lock()
            .await
            .entry(key.to_string())
            .or_default()
            .insert(field.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_object_is_empty() {
        let store = MemorySettingsStore::new();
        assert!(store.get_object("settings:missing").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let store = MemorySettingsStore::new();
        store
            .set_object_field("settings:search", "enabled", "1")
            .await
            .unwrap();
        store
            .set_object_field("settings:search", "host", "es:9200")
            .await
            .unwrap();

        let object = store.get_object("settings:search").await.unwrap();
        assert_eq!(object.len(), 2);
        assert_eq!(object["enabled"], "1");
        assert_eq!(object["host"], "es:9200");
    }
}
