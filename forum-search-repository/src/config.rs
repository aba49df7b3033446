//! Connection parameters for building a search engine client.

/// Default engine address when none is configured.
pub const DEFAULT_HOST: &str = "localhost:9200";

/// Default name of the posts index.
pub const DEFAULT_INDEX_NAME: &str = "posts";

/// Names of the two indexed fields.
///
/// Resolved once from settings when a client is built; every document,
/// mapping and query the client produces goes through this table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldNames {
    /// Field holding the post content.
    pub content: String,
    /// Field holding the topic title.
    pub title: String,
}

impl Default for FieldNames {
    fn default() -> Self {
        Self {
            content: "content".to_string(),
            title: "title".to_string(),
        }
    }
}

/// Configuration for a single engine client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EngineConfig {
    /// Engine URL, always carrying a scheme (e.g. `http://localhost:9200`).
    pub url: String,
    /// The index every operation targets.
    pub index_name: String,
    /// Optional basic-auth credentials.
    pub credentials: Option<(String, String)>,
    /// Indexed field names.
    pub fields: FieldNames,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::new(DEFAULT_HOST, DEFAULT_INDEX_NAME)
    }
}

impl EngineConfig {
    /// Create a config for the given host and index with default field names.
    ///
    /// Hosts given as `host:port` are normalised to `http://host:port`.
    pub fn new(host: &str, index_name: impl Into<String>) -> Self {
        Self {
            url: normalize_url(host),
            index_name: index_name.into(),
            credentials: None,
            fields: FieldNames::default(),
        }
    }

    /// Set basic-auth credentials.
    pub fn with_credentials(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.credentials = Some((username.into(), password.into()));
        self
    }

    /// Set the indexed field names.
    pub fn with_fields(mut self, fields: FieldNames) -> Self {
        self.fields = fields;
        self
    }
}

fn normalize_url(host: &str) -> String {
    let host = host.trim();
    if host.starts_with("http://") || host.starts_with("https://") {
        host.to_string()
    } else {
        format!("http://{}", host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();

        assert_eq!(config.url, "http://localhost:9200");
        assert_eq!(config.index_name, "posts");
        assert!(config.credentials.is_none());
        assert_eq!(config.fields.content, "content");
        assert_eq!(config.fields.title, "title");
    }

    #[test]
    fn test_url_with_scheme_is_kept() {
        let config = EngineConfig::new("https://search.example.com:9243", "forum");
        assert_eq!(config.url, "https://search.example.com:9243");
    }
}
