//! OpenSearch query builders.
//!
//! This module provides functions to build OpenSearch request bodies from
//! `EngineQuery` values. User input is always escaped before it is placed
//! in a query.

use serde_json::{json, Value};

use crate::config::FieldNames;
use crate::types::{CountScope, EngineQuery};
use forum_search_shared::PostId;

/// Characters with a meaning in the engine's query syntax.
const SPECIAL_CHARS: &[char] = &[
    '+', '-', '&', '|', '!', '(', ')', '{', '}', '[', ']', '^', '"', '~', '*', '?', ':', '\\',
    ' ',
];

/// Prefix every search-syntax metacharacter with a backslash.
pub fn escape_query_text(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        if SPECIAL_CHARS.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Build the request body for an `EngineQuery`.
pub fn build_search_query(query: &EngineQuery, fields: &FieldNames) -> Value {
    let text = escape_query_text(query.text());
    let inner = match query {
        EngineQuery::Relevance { .. } => build_relevance_query(&text, fields),
        EngineQuery::WithinPosts { pids, .. } => build_within_posts_query(&text, pids, fields),
    };

    json!({
        "query": inner,
        "from": 0,
        "size": query.size()
    })
}

/// Best-of match over the content and title fields.
fn build_relevance_query(text: &str, fields: &FieldNames) -> Value {
    json!({
        "dis_max": {
            "queries": [
                { "match": { fields.content.as_str(): text } },
                { "match": { fields.title.as_str(): text } }
            ]
        }
    })
}

/// Content match filtered to a fixed set of post ids.
fn build_within_posts_query(text: &str, pids: &[PostId], fields: &FieldNames) -> Value {
    let ids: Vec<String> = pids.iter().map(|pid| pid.to_string()).collect();

    json!({
        "bool": {
            "must": [
                { "match": { fields.content.as_str(): text } }
            ],
            "filter": [
                { "ids": { "values": ids } }
            ]
        }
    })
}

/// Build the body of a count request, if the scope needs one.
pub fn build_count_query(scope: CountScope, fields: &FieldNames) -> Option<Value> {
    match scope {
        CountScope::All => None,
        CountScope::Titled => Some(json!({
            "query": {
                "exists": { "field": fields.title }
            }
        })),
    }
}

/// Body matching every document, used to empty the index.
pub fn build_match_all_query() -> Value {
    json!({
        "query": {
            "match_all": {}
        }
    })
}
