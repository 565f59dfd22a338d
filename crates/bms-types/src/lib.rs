//! Foundation types for the Onboard Bulk Mail back-office.
//!
//! This crate provides the value types shared by the item stores, the
//! session guard and the HTTP server. Every other `bms-*` crate depends on
//! `bms-types`.
//!
//! # Key Types
//!
//! - [`ItemId`] — Store-assigned item identifier (UUID v7)
//! - [`Item`] — A positioned record with opaque display fields
//! - [`ItemPatch`] — Partial update applied by `update`
//! - [`Credential`] — Opaque session token
//! - [`Session`] — Authenticated credential plus principal
//! - [`Role`] — Access role required by protected operations

pub mod catalog;
pub mod error;
pub mod id;
pub mod item;
pub mod session;

pub use catalog::CollectionKind;
pub use error::TypeError;
pub use id::{Credential, ItemId};
pub use item::{is_dense, Fields, Item, ItemPatch, NewItem};
pub use session::{Principal, Role, Session};
