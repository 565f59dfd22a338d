//! Densely ordered item stores for the Onboard Bulk Mail back-office.
//!
//! Onboarding sections and blog posts are both kept as ordered collections
//! of [`Item`](bms_types::Item)s: each item has a store-assigned id, opaque
//! display fields, an active flag, and a 1-based position.
//!
//! # Storage Backends
//!
//! All backends implement the [`ItemStore`] trait:
//!
//! - [`InMemoryItemStore`] -- `Vec`-based store for tests and embedding
//!
//! # Design Rules
//!
//! 1. Positions are dense: `1..=N` after every operation.
//! 2. Ids are assigned by the store and never reused.
//! 3. Mutations are all-or-nothing; errors leave the store as it was.
//! 4. Writers are serialized per store; readers receive clones.

pub mod collections;
pub mod error;
pub mod memory;
pub mod traits;

pub use collections::Collections;
pub use error::{StoreError, StoreResult};
pub use memory::InMemoryItemStore;
pub use traits::ItemStore;
