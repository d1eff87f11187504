//! Decoding of collection payloads
//!
//! Collection endpoints answer either with a bare JSON array or with a
//! paginated envelope whose `content` holds the array. The shape is decided
//! once, here, and anything else is reported as
//! [`BackendError::UnrecognizedShape`] instead of silently becoming empty.

use crate::core::error::{BackendError, BackendResult};
use crate::view::{DerivedView, Record};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

/// Paginated envelope, as produced by the backend and by the proxy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    pub content: Vec<T>,
    #[serde(default)]
    pub total_elements: usize,
    #[serde(default)]
    pub total_pages: usize,
    #[serde(default)]
    pub size: usize,
    #[serde(default)]
    pub number: usize,
    #[serde(default)]
    pub has_next: bool,
}

impl<T> Paginated<T> {
    /// Envelope for one page computed by the view engine
    pub fn from_view(view: DerivedView<T>, size: usize) -> Self {
        Self {
            content: view.items,
            total_elements: view.total_matching,
            total_pages: view.total_pages,
            size,
            number: view.page_index,
            has_next: view.has_next,
        }
    }
}

/// A collection payload, tagged by the shape it arrived in
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload<T> {
    Sequence(Vec<T>),
    Envelope(Paginated<T>),
}

impl<T: DeserializeOwned> Payload<T> {
    /// Envelope first, bare sequence second, explicit failure otherwise
    pub fn decode(value: Value) -> BackendResult<Self> {
        let has_content = value
            .get("content")
            .is_some_and(Value::is_array);

        if has_content {
            serde_json::from_value(value)
                .map(Payload::Envelope)
                .map_err(decode_error)
        } else if value.is_array() {
            serde_json::from_value(value)
                .map(Payload::Sequence)
                .map_err(decode_error)
        } else {
            Err(BackendError::UnrecognizedShape {
                message: format!(
                    "expected an array or an object with a 'content' array, got {}",
                    describe(&value)
                ),
            })
        }
    }
}

fn decode_error(err: serde_json::Error) -> BackendError {
    BackendError::Decode {
        message: err.to_string(),
    }
}

impl<T> Payload<T> {
    pub fn into_items(self) -> Vec<T> {
        match self {
            Payload::Sequence(items) => items,
            Payload::Envelope(page) => page.content,
        }
    }

    pub fn is_envelope(&self) -> bool {
        matches!(self, Payload::Envelope(_))
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object without a 'content' array",
    }
}

/// Decode a collection payload and drop records whose id was already seen
pub fn decode_records<T: DeserializeOwned + Record>(value: Value) -> BackendResult<Vec<T>> {
    let items = Payload::decode(value)?.into_items();
    Ok(dedupe_by_id(items))
}

/// Keep the first record for every id, preserving order
pub fn dedupe_by_id<T: Record>(items: Vec<T>) -> Vec<T> {
    let total = items.len();
    let mut seen = HashSet::with_capacity(total);
    let unique: Vec<T> = items
        .into_iter()
        .filter(|item| seen.insert(item.id().to_string()))
        .collect();

    if unique.len() < total {
        tracing::warn!(
            dropped = total - unique.len(),
            kept = unique.len(),
            "duplicate record ids in collection payload"
        );
    }
    unique
}
