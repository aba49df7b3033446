//! OpenSearch client implementation.
//!
//! This module provides the concrete implementation of `SearchEngineClient`
//! using the OpenSearch Rust client.

use async_trait::async_trait;
use opensearch::{
    auth::Credentials,
    http::request::JsonBody,
    http::response::Response,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    indices::{IndicesCreateParts, IndicesDeleteParts},
    BulkParts, CountParts, DeleteByQueryParts, DeleteParts, OpenSearch, SearchParts,
};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::{debug, error, info, instrument};
use url::Url;

use crate::config::{EngineConfig, FieldNames};
use crate::errors::SearchError;
use crate::interfaces::SearchEngineClient;
use crate::opensearch::index_config::get_index_settings;
use crate::opensearch::queries::{build_count_query, build_match_all_query, build_search_query};
use crate::types::{CountScope, EngineQuery};
use forum_search_shared::{IndexDocument, PostId};

/// Engine error types reporting that the index already exists.
const ALREADY_EXISTS_TYPES: &[&str] = &[
    "resource_already_exists_exception",
    "index_already_exists_exception",
    "indexalreadyexistsexception",
];

/// Engine error types reporting that the index does not exist.
const MISSING_TYPES: &[&str] = &[
    "index_not_found_exception",
    "indexmissingexception",
];

#[derive(Debug, Deserialize)]
struct SearchBody {
    #[serde(default)]
    hits: Hits,
}

#[derive(Debug, Default, Deserialize)]
struct Hits {
    #[serde(default)]
    hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
struct Hit {
    #[serde(rename = "_id")]
    id: String,
}

#[derive(Debug, Deserialize)]
struct CountBody {
    count: u64,
}

/// OpenSearch client implementation.
///
/// Bound to a single posts index at construction time.
///
/// # Example
///
/// ```ignore
/// let config = EngineConfig::new("localhost:9200", "posts");
/// let client = OpenSearchClient::new(&config)?;
///
/// client.bulk_index(&[IndexDocument::new(5, "hello world")]).await?;
/// let ids = client.search(&EngineQuery::relevance("hello")).await?;
/// ```
pub struct OpenSearchClient {
    client: OpenSearch,
    index_name: String,
    fields: FieldNames,
}

impl OpenSearchClient {
    /// Create a new OpenSearch client from the given configuration.
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchClient)` - A new client instance
    /// * `Err(SearchError)` - If the URL is invalid or transport setup fails
    pub fn new(config: &EngineConfig) -> Result<Self, SearchError> {
        let parsed_url =
            Url::parse(&config.url).map_err(|e| SearchError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let mut builder = TransportBuilder::new(conn_pool).disable_proxy();
        if let Some((username, password)) = &config.credentials {
            builder = builder.auth(Credentials::Basic(username.clone(), password.clone()));
        }
        let transport = builder
            .build()
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(
            url = %config.url,
            index = %config.index_name,
            auth = config.credentials.is_some(),
            "Created OpenSearch client"
        );

        Ok(Self {
            client,
            index_name: config.index_name.clone(),
            fields: config.fields.clone(),
        })
    }

    /// Build the stored document body using the configured field names.
    fn document_body(&self, document: &IndexDocument) -> Value {
        document_body(document, &self.fields)
    }

    /// Collect the ids from a search response body.
    fn parse_hit_ids(body: Value) -> Result<Vec<String>, SearchError> {
        let body: SearchBody =
            serde_json::from_value(body).map_err(|e| SearchError::parse(e.to_string()))?;
        Ok(body.hits.hits.into_iter().map(|hit| hit.id).collect())
    }

    /// Read the body of a failed response for error reporting.
    async fn failure_body(response: Response) -> String {
        response.text().await.unwrap_or_default()
    }
}

fn document_body(document: &IndexDocument, fields: &FieldNames) -> Value {
    let mut doc = Map::new();
    doc.insert("id".to_string(), json!(document.id));
    doc.insert(fields.content.clone(), json!(document.content));
    if let Some(ref title) = document.title {
        doc.insert(fields.title.clone(), json!(title));
    }
    Value::Object(doc)
}

/// Extract the engine's error type from a failure body.
///
/// Recognises both the structured `{"error": {"type": ...}}` form and the
/// legacy exception names embedded in plain text.
fn error_type(body: &str) -> Option<String> {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        if let Some(kind) = value["error"]["type"].as_str() {
            return Some(kind.to_lowercase());
        }
    }
    let lowered = body.to_lowercase();
    ALREADY_EXISTS_TYPES
        .iter()
        .chain(MISSING_TYPES.iter())
        .find(|kind| lowered.contains(*kind))
        .map(|kind| kind.to_string())
}

fn is_already_exists(body: &str) -> bool {
    error_type(body).is_some_and(|kind| ALREADY_EXISTS_TYPES.contains(&kind.as_str()))
}

fn is_missing(body: &str) -> bool {
    error_type(body).is_some_and(|kind| MISSING_TYPES.contains(&kind.as_str()))
}

/// Count the items of a bulk response that report an error.
fn bulk_failures(body: &Value) -> usize {
    if !body["errors"].as_bool().unwrap_or(false) {
        return 0;
    }
    body["items"]
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter(|item| item["index"].get("error").is_some())
                .count()
        })
        .unwrap_or(0)
}

#[async_trait]
impl SearchEngineClient for OpenSearchClient {
    async fn ping(&self) -> Result<(), SearchError> {
        let response = self
            .client
            .ping()
            .send()
            .await
            .map_err(|e| SearchError::connection(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            return Err(SearchError::connection(format!(
                "Ping failed with status {}",
                status
            )));
        }
        Ok(())
    }

    #[instrument(skip(self, documents), fields(count = documents.len()))]
    async fn bulk_index(&self, documents: &[IndexDocument]) -> Result<(), SearchError> {
        if documents.is_empty() {
            return Ok(());
        }

        let mut body: Vec<JsonBody<Value>> = Vec::with_capacity(documents.len() * 2);
        for document in documents {
            body.push(json!({ "index": { "_id": document.id.to_string() } }).into());
            body.push(self.document_body(document).into());
        }

        let response = self
            .client
            .bulk(BulkParts::Index(&self.index_name))
            .body(body)
            .send()
            .await
            .map_err(|e| SearchError::bulk_index(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = Self::failure_body(response).await;
            error!(status = %status, body = %error_body, "Bulk request failed");
            return Err(SearchError::bulk_index(format!(
                "Bulk failed with status {}: {}",
                status, error_body
            )));
        }

        let response_body: Value = response
            .json()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))?;

        let failed = bulk_failures(&response_body);
        if failed > 0 {
            return Err(SearchError::bulk_index(format!(
                "{} of {} documents failed to index",
                failed,
                documents.len()
            )));
        }

        debug!(count = documents.len(), "Documents indexed");
        Ok(())
    }

    async fn delete_document(&self, pid: PostId) -> Result<(), SearchError> {
        let doc_id = pid.to_string();
        let response = self
            .client
            .delete(DeleteParts::IndexId(&self.index_name, &doc_id))
            .send()
            .await
            .map_err(|e| SearchError::delete(e.to_string()))?;

        let status = response.status_code();

        // 404 is acceptable - document may not exist
        if !status.is_success() && status.as_u16() != 404 {
            let error_body = Self::failure_body(response).await;
            error!(status = %status, body = %error_body, "Delete request failed");
            return Err(SearchError::delete(format!(
                "Delete failed with status {}: {}",
                status, error_body
            )));
        }

        debug!(pid = pid, "Document deleted");
        Ok(())
    }

    async fn delete_all(&self) -> Result<(), SearchError> {
        let response = self
            .client
            .delete_by_query(DeleteByQueryParts::Index(&[&self.index_name]))
            .body(build_match_all_query())
            .send()
            .await
            .map_err(|e| SearchError::delete(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = Self::failure_body(response).await;
            return Err(SearchError::delete(format!(
                "Delete by query failed with status {}: {}",
                status, error_body
            )));
        }

        info!(index = %self.index_name, "Emptied search index");
        Ok(())
    }

    async fn create_index(&self) -> Result<(), SearchError> {
        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(&self.index_name))
            .body(get_index_settings(&self.fields))
            .send()
            .await
            .map_err(|e| SearchError::index_creation(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = Self::failure_body(response).await;
            if is_already_exists(&error_body) {
                return Err(SearchError::IndexAlreadyExists(self.index_name.clone()));
            }
            return Err(SearchError::index_creation(format!(
                "Create index failed with status {}: {}",
                status, error_body
            )));
        }

        info!(index = %self.index_name, "Created search index");
        Ok(())
    }

    async fn delete_index(&self) -> Result<(), SearchError> {
        let response = self
            .client
            .indices()
            .delete(IndicesDeleteParts::Index(&[&self.index_name]))
            .send()
            .await
            .map_err(|e| SearchError::index_deletion(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = Self::failure_body(response).await;
            if is_missing(&error_body) {
                return Err(SearchError::IndexMissing(self.index_name.clone()));
            }
            return Err(SearchError::index_deletion(format!(
                "Delete index failed with status {}: {}",
                status, error_body
            )));
        }

        info!(index = %self.index_name, "Deleted search index");
        Ok(())
    }

    async fn count(&self, scope: CountScope) -> Result<u64, SearchError> {
        let indices = [self.index_name.as_str()];
        let request = self.client.count(CountParts::Index(&indices));
        let response = match build_count_query(scope, &self.fields) {
            Some(body) => request.body(body).send().await,
            None => request.send().await,
        }
        .map_err(|e| SearchError::query(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = Self::failure_body(response).await;
            return Err(SearchError::query(format!(
                "Count failed with status {}: {}",
                status, error_body
            )));
        }

        let body: CountBody = response
            .json()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))?;
        Ok(body.count)
    }

    #[instrument(skip(self, query), fields(size = query.size()))]
    async fn search(&self, query: &EngineQuery) -> Result<Vec<String>, SearchError> {
        let response = self
            .client
            .search(SearchParts::Index(&[&self.index_name]))
            .body(build_search_query(query, &self.fields))
            .send()
            .await
            .map_err(|e| SearchError::query(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = Self::failure_body(response).await;
            error!(status = %status, body = %error_body, "Search request failed");
            return Err(SearchError::query(format!(
                "Search failed with status {}: {}",
                status, error_body
            )));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SearchError::parse(e.to_string()))?;

        let ids = Self::parse_hit_ids(body)?;
        debug!(hits = ids.len(), "Search completed");
        Ok(ids)
    }
}
