use bms_types::{Fields, Item, ItemId, ItemPatch};

use crate::error::StoreResult;

/// Ordered item store.
///
/// All implementations must satisfy these invariants:
/// - Positions are dense: for N items they are exactly `1..=N` after every
///   operation, and no caller ever observes anything else.
/// - Ids are assigned by the store and never reused while it lives.
/// - Operations are all-or-nothing: an error leaves the store unchanged.
/// - Reads hand out clones; nothing outside the store holds a live item.
pub trait ItemStore: Send + Sync {
    /// Append a new item at position `len + 1`.
    fn add(&self, fields: Fields, active: bool) -> StoreResult<Item>;

    /// Merge `patch` into an item's fields and active flag.
    ///
    /// Never changes `id` or `position`.
    fn update(&self, id: &ItemId, patch: &ItemPatch) -> StoreResult<Item>;

    /// Delete an item. Every item above it moves down one position.
    fn remove(&self, id: &ItemId) -> StoreResult<()>;

    /// Move an item to `new_position`, shifting the items in between one
    /// slot toward the vacated position.
    ///
    /// Moving an item onto its current position succeeds without changes.
    fn reorder(&self, id: &ItemId, new_position: usize) -> StoreResult<()>;

    /// All items sorted by position.
    fn list(&self) -> StoreResult<Vec<Item>>;

    /// Look up a single item.
    fn get(&self, id: &ItemId) -> StoreResult<Option<Item>>;

    /// Number of items in the store.
    fn len(&self) -> StoreResult<usize> {
        Ok(self.list()?.len())
    }

    fn is_empty(&self) -> StoreResult<bool> {
        Ok(self.len()? == 0)
    }

    /// Active items only, in position order.
    fn list_active(&self) -> StoreResult<Vec<Item>> {
        Ok(self.list()?.into_iter().filter(|item| item.active).collect())
    }
}
