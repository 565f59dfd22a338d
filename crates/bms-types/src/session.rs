use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TypeError;
use crate::id::Credential;

/// Access role carried by a principal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Admin => f.write_str("admin"),
        }
    }
}

impl FromStr for Role {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            other => Err(TypeError::UnknownRole(other.to_string())),
        }
    }
}

/// The identity a session was issued to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    pub identifier: String,
    pub role: Role,
}

impl Principal {
    /// Identifier used for sessions rebuilt from the durable slot, which only
    /// stores the credential.
    pub const RESTORED_IDENTIFIER: &'static str = "restored";

    pub fn admin(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
            role: Role::Admin,
        }
    }

    pub fn restored() -> Self {
        Self::admin(Self::RESTORED_IDENTIFIER)
    }
}

/// An authenticated session.
///
/// Credential and principal always travel together; "logged out" is the
/// absence of a `Session`, never a half-filled one.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub credential: Credential,
    pub principal: Principal,
    pub issued_at: DateTime<Utc>,
}

impl Session {
    pub fn new(credential: Credential, principal: Principal) -> Self {
        Self {
            credential,
            principal,
            issued_at: Utc::now(),
        }
    }

    pub fn role(&self) -> Role {
        self.principal.role
    }

    /// Sessions have no expiry; they stay valid until explicitly ended.
    pub fn is_expired(&self) -> bool {
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_str() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!(Role::Admin.to_string(), "admin");
        assert_eq!(
            "editor".parse::<Role>(),
            Err(TypeError::UnknownRole("editor".into()))
        );
    }

    #[test]
    fn role_serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
    }

    #[test]
    fn restored_principal_is_admin() {
        let p = Principal::restored();
        assert_eq!(p.identifier, "restored");
        assert_eq!(p.role, Role::Admin);
    }

    #[test]
    fn session_never_expires() {
        let s = Session::new(Credential::generate(), Principal::admin("admin@example.com"));
        assert!(!s.is_expired());
        assert_eq!(s.role(), Role::Admin);
    }
}
