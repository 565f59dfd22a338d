use std::ops::RangeInclusive;

use bms_types::ItemId;

/// Errors from item store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// No item with this id exists in the store.
    #[error("item not found: {id}")]
    NotFound { id: ItemId },

    /// A reorder target outside `1..=len`.
    #[error("invalid position {requested}: expected {}..={}", valid.start(), valid.end())]
    InvalidPosition {
        requested: usize,
        valid: RangeInclusive<usize>,
    },

    /// A previous writer panicked while holding the store lock.
    #[error("store lock poisoned: {0}")]
    LockPoisoned(String),
}

impl StoreError {
    pub fn not_found(id: &ItemId) -> Self {
        Self::NotFound { id: id.clone() }
    }
}

/// Result alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
