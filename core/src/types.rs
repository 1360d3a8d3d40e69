//! Domain DTOs for the items API.
//!
//! # Design
//! These types mirror the backend's wire schema (`_id`, camelCase
//! timestamps) but are defined independently of the mock-server crate.
//! Server-owned fields are optional and only ever filled in by
//! deserialization; writes go through [`ItemInput`], which cannot carry them.
//!
//! A timestamp the server sent as an explicit `null` reads as `None` and is
//! parked in `extra` under its wire key, so re-serializing the item writes
//! the `null` back instead of dropping the key.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

const CREATED_AT: &str = "createdAt";
const UPDATED_AT: &str = "updatedAt";

/// A single item as returned by the API.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(from = "ItemWire", into = "ItemWire")]
pub struct Item {
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    /// Fields the server sent that the client does not model (e.g. `__v`).
    pub extra: Map<String, Value>,
}

/// Wire shape of [`Item`]. The outer `Option` on timestamps is key presence,
/// the inner one is `null`.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemWire {
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    id: Option<String>,
    name: String,
    description: String,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    created_at: Option<Option<String>>,
    #[serde(default, deserialize_with = "present", skip_serializing_if = "Option::is_none")]
    updated_at: Option<Option<String>>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// Only runs when the key is there, so `null` becomes `Some(None)`.
fn present<'de, D: Deserializer<'de>>(de: D) -> Result<Option<Option<String>>, D::Error> {
    Option::<String>::deserialize(de).map(Some)
}

impl From<ItemWire> for Item {
    fn from(wire: ItemWire) -> Self {
        let mut extra = wire.extra;
        let mut stamp = |key: &str, value: Option<Option<String>>| match value {
            Some(None) => {
                extra.insert(key.to_string(), Value::Null);
                None
            }
            other => other.flatten(),
        };
        let created_at = stamp(CREATED_AT, wire.created_at);
        let updated_at = stamp(UPDATED_AT, wire.updated_at);
        Self {
            id: wire.id,
            name: wire.name,
            description: wire.description,
            created_at,
            updated_at,
            extra,
        }
    }
}

impl From<Item> for ItemWire {
    fn from(item: Item) -> Self {
        let mut extra = item.extra;
        let mut stamp = |key: &str, value: Option<String>| {
            let parked = extra.remove(key);
            match (value, parked) {
                (Some(value), _) => Some(Some(value)),
                (None, Some(Value::Null)) => Some(None),
                (None, _) => None,
            }
        };
        let created_at = stamp(CREATED_AT, item.created_at);
        let updated_at = stamp(UPDATED_AT, item.updated_at);
        Self {
            id: item.id,
            name: item.name,
            description: item.description,
            created_at,
            updated_at,
            extra,
        }
    }
}

/// Request payload for both create and update.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ItemInput {
    pub name: String,
    pub description: String,
}

impl ItemInput {
    pub fn new(name: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
        }
    }
}

impl From<&Item> for ItemInput {
    fn from(item: &Item) -> Self {
        Self::new(item.name.clone(), item.description.clone())
    }
}
