//! OpenSearch index configuration and mappings.
//!
//! This module defines the mapping for the posts index: two analysed text
//! fields, one for the post content and one for the topic title.

use serde_json::{json, Map, Value};

use crate::config::FieldNames;

/// Get the index settings and mappings for the posts index.
pub fn get_index_settings(fields: &FieldNames) -> Value {
    let mut properties = Map::new();
    // Post content
    properties.insert(fields.content.clone(), json!({ "type": "text" }));
    // Topic title
    properties.insert(fields.title.clone(), json!({ "type": "text" }));

    json!({
        "mappings": {
            "properties": properties
        }
    })
}
