//! Opaque queue item.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One discovery item (event) supplied by the catalogue.
///
/// Only `id` is interpreted; `payload` is passed through untouched to the
/// decision sink and the rendering collaborators.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct Item {
    /// Stable unique identifier
    pub id: String,
    /// Inert payload (title, venue, start time, ...)
    #[serde(default)]
    pub payload: Value,
}

impl Item {
    /// Create an item with a payload.
    pub fn new(id: impl Into<String>, payload: Value) -> Self {
        Self {
            id: id.into(),
            payload,
        }
    }

    /// Create an item with an empty payload.
    pub fn bare(id: impl Into<String>) -> Self {
        Self::new(id, Value::Null)
    }
}
