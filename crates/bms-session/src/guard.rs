use std::sync::{Arc, RwLock};

use tracing::{debug, info, warn};

use bms_types::{Credential, Principal, Role, Session};

use crate::error::{AuthError, AuthResult};
use crate::slot::SessionSlot;
use crate::verifier::CredentialVerifier;

/// Gatekeeper for the admin area.
///
/// Holds at most one session. The durable slot is only touched by
/// [`authenticate`](Self::authenticate), [`restore`](Self::restore) and
/// [`end_session`](Self::end_session); everything else works on the
/// in-memory session and hands out copies of it.
pub struct SessionGuard {
    slot: Arc<dyn SessionSlot>,
    verifier: Arc<dyn CredentialVerifier>,
    current: RwLock<Option<Session>>,
}

impl SessionGuard {
    pub fn new(slot: Arc<dyn SessionSlot>, verifier: Arc<dyn CredentialVerifier>) -> Self {
        Self {
            slot,
            verifier,
            current: RwLock::new(None),
        }
    }

    /// Log in with an identifier/secret pair.
    ///
    /// On success a fresh credential is written to the slot and the new
    /// session replaces any previous one. On failure nothing changes.
    pub async fn authenticate(&self, identifier: &str, secret: &str) -> AuthResult<Session> {
        if identifier.is_empty() {
            return Err(AuthError::MissingField("identifier"));
        }
        if secret.is_empty() {
            return Err(AuthError::MissingField("secret"));
        }

        let Some(principal) = self.verifier.verify(identifier, secret).await? else {
            warn!(identifier, "login rejected");
            return Err(AuthError::InvalidCredentials);
        };

        // Slot and in-memory session change under one lock so concurrent
        // logins cannot leave them holding different credentials.
        let mut current = self.write_current()?;
        let credential = Credential::generate();
        self.slot.store(&credential)?;
        let session = Session::new(credential, principal);
        *current = Some(session.clone());
        drop(current);
        info!(identifier = %session.principal.identifier, role = %session.role(), "session started");
        Ok(session)
    }

    /// Rebuild the session from the durable slot.
    ///
    /// A stored credential is trusted as-is and granted the admin role; the
    /// principal is not re-validated. If the credential matches the session
    /// already held in memory, that session is returned unchanged.
    pub fn restore(&self) -> AuthResult<Option<Session>> {
        let Some(credential) = self.slot.load()? else {
            *self.write_current()? = None;
            debug!("no stored session");
            return Ok(None);
        };

        let mut current = self.write_current()?;
        if let Some(existing) = current.as_ref() {
            if existing.credential == credential {
                return Ok(Some(existing.clone()));
            }
        }

        // TODO: re-validate the principal once a verifier can resolve
        // credentials, instead of granting admin to any stored token.
        warn!("restored session granted admin role without re-validation");
        let session = Session::new(credential, Principal::restored());
        *current = Some(session.clone());
        Ok(Some(session))
    }

    /// Log out. Clears the slot, then the in-memory session; calling it
    /// again is harmless. If the slot cannot be cleared the session stays.
    pub fn end_session(&self) -> AuthResult<()> {
        let mut current = self.write_current()?;
        self.slot.clear()?;
        let previous = current.take();
        drop(current);
        if let Some(session) = previous {
            info!(identifier = %session.principal.identifier, "session ended");
        }
        Ok(())
    }

    /// True iff `session` exists, has not expired and carries `required`.
    pub fn is_authorized(session: Option<&Session>, required: Role) -> bool {
        session.is_some_and(|s| !s.is_expired() && s.role() == required)
    }

    /// Copy of the session currently held in memory.
    pub fn current(&self) -> AuthResult<Option<Session>> {
        Ok(self.read_current()?.clone())
    }

    /// The current session, if `presented` is its credential.
    pub fn resolve(&self, presented: &str) -> AuthResult<Option<Session>> {
        let current = self.read_current()?;
        Ok(current
            .as_ref()
            .filter(|session| session.credential.as_str() == presented)
            .cloned())
    }

    fn read_current(&self) -> AuthResult<std::sync::RwLockReadGuard<'_, Option<Session>>> {
        self.current
            .read()
            .map_err(|e| AuthError::LockPoisoned(e.to_string()))
    }

    fn write_current(&self) -> AuthResult<std::sync::RwLockWriteGuard<'_, Option<Session>>> {
        self.current
            .write()
            .map_err(|e| AuthError::LockPoisoned(e.to_string()))
    }
}

impl std::fmt::Debug for SessionGuard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let active = self.current.read().map(|s| s.is_some()).unwrap_or(false);
        f.debug_struct("SessionGuard")
            .field("authenticated", &active)
            .finish()
    }
}
