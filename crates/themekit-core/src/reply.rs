/*
 * reply.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Normalization of replies from theme plugins.
 */

//! Normalizing collaborator replies.
//!
//! Replies arrive through [`EventBus::request`](themekit_bus::EventBus::request),
//! which folds answers from several listeners into one array. The two
//! lookups accept different shapes:
//!
//! | Lookup | Accepted reply |
//! |---|---|
//! | content | nothing, or an array whose items are fragments or arrays of fragments |
//! | resources | nothing, a bundle object, or an array of bundles (or arrays of bundles) |
//!
//! A content reply that is defined but not an array is reported as a
//! [`ReplyDiagnostic`] and otherwise ignored. A resources reply of any
//! other shape is an error.
//!
//! Content entries that name no target belong to the target the lookup
//! was issued for.

use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::path::PathBuf;

use crate::error::{Result, ThemeError};
use crate::types::{CssFragment, ThemeResources};

/// Non-fatal anomaly in a collaborator reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReplyDiagnostic {
    UnexpectedReplyShape { event: String, found: &'static str },
}

impl fmt::Display for ReplyDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReplyDiagnostic::UnexpectedReplyShape { event, found } => write!(
                f,
                "Unexpected reply from '{}': expected an array of CSS fragments, got {}",
                event, found
            ),
        }
    }
}

/// Outcome of a content lookup.
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum ContentReply {
    /// No plugin had content for the request.
    Missing,
    /// Fragments to forward, in reply order.
    Fragments(Vec<CssFragment>),
    Unexpected(ReplyDiagnostic),
}

/// Entry of a content reply. `name` falls back to the looked-up target.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ContentEntry {
    #[serde(default)]
    name: Option<String>,
    dir_name: PathBuf,
    file_path: String,
    #[serde(default)]
    silent: bool,
}

impl ContentEntry {
    fn into_fragment(self, target: &str) -> CssFragment {
        CssFragment {
            name: self.name.unwrap_or_else(|| target.to_string()),
            dir_name: self.dir_name,
            file_path: self.file_path,
            silent: self.silent,
        }
    }
}

/// Flatten a content reply one level and decode every entry for `target`.
pub(crate) fn content_fragments(
    event: &str,
    target: &str,
    reply: Option<Value>,
) -> Result<ContentReply> {
    match reply {
        None => Ok(ContentReply::Missing),
        Some(Value::Array(items)) => flatten_one_level(items)
            .into_iter()
            .map(|item| {
                decode::<ContentEntry>(event, "CSS fragment", item)
                    .map(|entry| entry.into_fragment(target))
            })
            .collect::<Result<Vec<_>>>()
            .map(ContentReply::Fragments),
        Some(other) => Ok(ContentReply::Unexpected(ReplyDiagnostic::UnexpectedReplyShape {
            event: event.to_string(),
            found: json_kind(&other),
        })),
    }
}

/// Decode a resources reply into bundles, in reply order.
pub(crate) fn resource_bundles(event: &str, reply: Option<Value>) -> Result<Vec<ThemeResources>> {
    match reply {
        None => Ok(Vec::new()),
        Some(bundle @ Value::Object(_)) => Ok(vec![decode(event, "resource bundle", bundle)?]),
        Some(Value::Array(items)) => flatten_one_level(items)
            .into_iter()
            .map(|item| decode(event, "resource bundle", item))
            .collect(),
        Some(other) => Err(ThemeError::invalid_argument(format!(
            "reply from '{}' must be a resource bundle or an array of bundles, got {}",
            event,
            json_kind(&other)
        ))),
    }
}

/// `[[a, b], c]` becomes `[a, b, c]`. Deeper nesting is left alone.
fn flatten_one_level(items: Vec<Value>) -> Vec<Value> {
    let mut flat = Vec::with_capacity(items.len());
    for item in items {
        match item {
            Value::Array(inner) => flat.extend(inner),
            other => flat.push(other),
        }
    }
    flat
}

fn decode<T: DeserializeOwned>(event: &str, what: &str, value: Value) -> Result<T> {
    serde_json::from_value(value).map_err(|e| {
        ThemeError::invalid_argument(format!("malformed {} in reply from '{}': {}", what, event, e))
    })
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
