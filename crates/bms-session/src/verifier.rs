use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use bms_types::Principal;

use crate::error::AuthResult;

/// Checks a login identifier/secret pair.
///
/// Returns `Ok(None)` when the pair is not recognized. A production
/// deployment replaces the static development pair with a call to a real
/// identity service behind this trait.
#[async_trait]
pub trait CredentialVerifier: Send + Sync {
    async fn verify(&self, identifier: &str, secret: &str) -> AuthResult<Option<Principal>>;
}

/// Fixed development login pair.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DevCredentials {
    pub identifier: String,
    pub secret: String,
}

impl Default for DevCredentials {
    fn default() -> Self {
        Self {
            identifier: "admin@example.com".into(),
            secret: "admin123".into(),
        }
    }
}

/// Verifier that accepts exactly one configured pair as an admin.
#[derive(Clone, Debug, Default)]
pub struct StaticCredentialVerifier {
    expected: DevCredentials,
}

impl StaticCredentialVerifier {
    pub fn new(expected: DevCredentials) -> Self {
        Self { expected }
    }
}

#[async_trait]
impl CredentialVerifier for StaticCredentialVerifier {
    async fn verify(&self, identifier: &str, secret: &str) -> AuthResult<Option<Principal>> {
        if identifier == self.expected.identifier && secret == self.expected.secret {
            Ok(Some(Principal::admin(identifier)))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bms_types::Role;

    #[tokio::test]
    async fn default_pair_is_accepted() {
        let verifier = StaticCredentialVerifier::default();
        let principal = verifier
            .verify("admin@example.com", "admin123")
            .await
            .unwrap()
            .expect("should match");
        assert_eq!(principal.identifier, "admin@example.com");
        assert_eq!(principal.role, Role::Admin);
    }

    #[tokio::test]
    async fn wrong_secret_is_rejected() {
        let verifier = StaticCredentialVerifier::default();
        assert!(verifier.verify("admin@example.com", "nope").await.unwrap().is_none());
        assert!(verifier.verify("other@example.com", "admin123").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn configured_pair() {
        let verifier = StaticCredentialVerifier::new(DevCredentials {
            identifier: "ops".into(),
            secret: "s3cret".into(),
        });
        assert!(verifier.verify("ops", "s3cret").await.unwrap().is_some());
        assert!(verifier.verify("admin@example.com", "admin123").await.unwrap().is_none());
    }
}
