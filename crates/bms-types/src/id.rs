use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Identifier of an item within a store.
///
/// Fresh ids are UUID v7 strings so they sort by creation time and are never
/// reused for the lifetime of a store. Ids coming back from callers are kept
/// verbatim: a lookup for an id the store never issued simply misses.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ItemId(String);

impl ItemId {
    /// Generate a new time-ordered item ID (UUID v7).
    pub fn generate() -> Self {
        Self(uuid::Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Short representation (first 8 characters).
    pub fn short_id(&self) -> &str {
        let end = self.0.char_indices().nth(8).map_or(self.0.len(), |(i, _)| i);
        &self.0[..end]
    }
}

impl From<&str> for ItemId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ItemId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Debug for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ItemId({})", self.0)
    }
}

impl fmt::Display for ItemId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Opaque session token.
///
/// Never empty. The `Debug` output only shows a short prefix so tokens do
/// not end up verbatim in logs.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Credential(String);

impl Credential {
    /// Number of random bytes in a generated token.
    pub const TOKEN_BYTES: usize = 32;

    /// Wrap an existing token, rejecting blank input.
    pub fn new(token: impl Into<String>) -> Result<Self, TypeError> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(TypeError::EmptyCredential);
        }
        Ok(Self(token))
    }

    /// Generate a fresh random token (hex encoded).
    pub fn generate() -> Self {
        let mut bytes = [0u8; Self::TOKEN_BYTES];
        rand::Rng::fill(&mut rand::thread_rng(), &mut bytes);
        Self(hex::encode(bytes))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for Credential {
    type Error = TypeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Credential> for String {
    fn from(value: Credential) -> Self {
        value.0
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let end = self.0.char_indices().nth(6).map_or(self.0.len(), |(i, _)| i);
        write!(f, "Credential({}…)", &self.0[..end])
    }
}
