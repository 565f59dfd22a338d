use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::Utc;
use tracing::debug;

use bms_types::{is_dense, Fields, Item, ItemId, ItemPatch, NewItem};

use crate::error::{StoreError, StoreResult};
use crate::traits::ItemStore;

/// In-memory, `Vec`-backed item store.
///
/// Items are kept sorted by position, so an item's position is always its
/// index plus one. Every mutation takes the write lock for its whole
/// duration, which serializes writers per store.
pub struct InMemoryItemStore {
    items: RwLock<Vec<Item>>,
}

impl InMemoryItemStore {
    /// Create a new empty store.
    pub fn new() -> Self {
        Self {
            items: RwLock::new(Vec::new()),
        }
    }

    /// Create a store pre-filled with `items`, in order.
    pub fn with_items(items: impl IntoIterator<Item = NewItem>) -> StoreResult<Self> {
        let store = Self::new();
        for item in items {
            store.add(item.fields, item.active)?;
        }
        Ok(store)
    }

    fn read(&self) -> StoreResult<RwLockReadGuard<'_, Vec<Item>>> {
        self.items
            .read()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))
    }

    fn write(&self) -> StoreResult<RwLockWriteGuard<'_, Vec<Item>>> {
        self.items
            .write()
            .map_err(|e| StoreError::LockPoisoned(e.to_string()))
    }
}

/// Index of `id` in the position-sorted vector.
fn index_of(items: &[Item], id: &ItemId) -> StoreResult<usize> {
    items
        .iter()
        .position(|item| &item.id == id)
        .ok_or_else(|| StoreError::not_found(id))
}

/// Rewrite positions for `items[start..=end]` from their indices.
fn renumber(items: &mut [Item], start: usize, end: usize) {
    for (index, item) in items.iter_mut().enumerate().take(end + 1).skip(start) {
        item.position = index + 1;
    }
}

impl Default for InMemoryItemStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ItemStore for InMemoryItemStore {
    fn add(&self, fields: Fields, active: bool) -> StoreResult<Item> {
        let mut items = self.write()?;
        let now = Utc::now();
        let item = Item {
            id: ItemId::generate(),
            fields,
            active,
            position: items.len() + 1,
            created_at: now,
            updated_at: now,
        };
        items.push(item.clone());
        debug!(id = item.id.short_id(), position = item.position, "item added");
        Ok(item)
    }

    fn update(&self, id: &ItemId, patch: &ItemPatch) -> StoreResult<Item> {
        let mut items = self.write()?;
        let index = index_of(&items, id)?;
        let item = &mut items[index];
        item.apply(patch, Utc::now());
        Ok(item.clone())
    }

    fn remove(&self, id: &ItemId) -> StoreResult<()> {
        let mut items = self.write()?;
        let index = index_of(&items, id)?;
        items.remove(index);
        if !items.is_empty() && index < items.len() {
            let last = items.len() - 1;
            renumber(&mut items, index, last);
        }
        debug_assert!(is_dense(&items));
        debug!(id = id.short_id(), "item removed");
        Ok(())
    }

    fn reorder(&self, id: &ItemId, new_position: usize) -> StoreResult<()> {
        let mut items = self.write()?;
        let from = index_of(&items, id)?;
        if new_position == 0 || new_position > items.len() {
            return Err(StoreError::InvalidPosition {
                requested: new_position,
                valid: 1..=items.len(),
            });
        }
        let to = new_position - 1;
        if from == to {
            return Ok(());
        }
        let item = items.remove(from);
        items.insert(to, item);
        renumber(&mut items, from.min(to), from.max(to));
        debug_assert!(is_dense(&items));
        debug!(id = id.short_id(), from = from + 1, to = new_position, "item reordered");
        Ok(())
    }

    fn list(&self) -> StoreResult<Vec<Item>> {
        Ok(self.read()?.clone())
    }

    fn get(&self, id: &ItemId) -> StoreResult<Option<Item>> {
        Ok(self.read()?.iter().find(|item| &item.id == id).cloned())
    }

    fn len(&self) -> StoreResult<usize> {
        Ok(self.read()?.len())
    }
}

impl std::fmt::Debug for InMemoryItemStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let count = self.items.read().map(|items| items.len()).unwrap_or(0);
        f.debug_struct("InMemoryItemStore")
            .field("item_count", &count)
            .finish()
    }
}
