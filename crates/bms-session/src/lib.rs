//! Admin session guard for the Onboard Bulk Mail back-office.
//!
//! A caller logs in through [`SessionGuard::authenticate`]; the resulting
//! [`Session`](bms_types::Session) is what grants access to the admin item
//! stores. Login state survives restarts through a single durable
//! [`SessionSlot`] entry.
//!
//! # Modules
//!
//! - [`error`] — Error types for slot and session operations
//! - [`slot`] — The [`SessionSlot`] trait with in-memory and file backends
//! - [`verifier`] — The [`CredentialVerifier`] trait and the static dev pair
//! - [`guard`] — The [`SessionGuard`] itself

pub mod error;
pub mod guard;
pub mod slot;
pub mod verifier;

pub use error::{AuthError, AuthResult, SlotError, SlotResult};
pub use guard::SessionGuard;
pub use slot::{FileSessionSlot, InMemorySessionSlot, SessionSlot, SESSION_SLOT_KEY};
pub use verifier::{CredentialVerifier, DevCredentials, StaticCredentialVerifier};
