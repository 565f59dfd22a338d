use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::id::ItemId;

/// Display attributes of an item (title, description, category, ...).
///
/// Opaque to the ordering logic of the stores.
pub type Fields = BTreeMap<String, Value>;

/// A positioned record in an ordered store.
///
/// `position` is 1-based and dense across the store: for N items the
/// positions are exactly `1..=N`. Only the store assigns `id` and `position`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    pub fields: Fields,
    pub active: bool,
    pub position: usize,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Item {
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// The `title` field, if it is a string.
    pub fn title(&self) -> Option<&str> {
        self.fields.get("title").and_then(Value::as_str)
    }

    /// Merge a patch into this item. `id` and `position` are never touched.
    ///
    /// A `null` value in the patch removes that key.
    pub fn apply(&mut self, patch: &ItemPatch, now: DateTime<Utc>) {
        for (key, value) in &patch.fields {
            if value.is_null() {
                self.fields.remove(key);
            } else {
                self.fields.insert(key.clone(), value.clone());
            }
        }
        if let Some(active) = patch.active {
            self.active = active;
        }
        self.updated_at = now;
    }
}

/// Input for creating an item.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct NewItem {
    #[serde(default)]
    pub fields: Fields,
    #[serde(default = "default_active")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

impl NewItem {
    pub fn new(fields: Fields) -> Self {
        Self {
            fields,
            active: true,
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn inactive(mut self) -> Self {
        self.active = false;
        self
    }
}

impl Default for NewItem {
    fn default() -> Self {
        Self::new(Fields::new())
    }
}

/// Partial update for an existing item.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ItemPatch {
    #[serde(default)]
    pub fields: Fields,
    #[serde(default)]
    pub active: Option<bool>,
}

impl ItemPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    pub fn unset(mut self, key: impl Into<String>) -> Self {
        self.fields.insert(key.into(), Value::Null);
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = Some(active);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty() && self.active.is_none()
    }
}

/// Returns `true` if the positions of `items` are exactly `1..=items.len()`,
/// in any order.
pub fn is_dense(items: &[Item]) -> bool {
    let mut seen = vec![false; items.len()];
    for item in items {
        match item.position.checked_sub(1) {
            Some(slot) if slot < seen.len() && !seen[slot] => seen[slot] = true,
            _ => return false,
        }
    }
    true
}
