//! Durable storage for the session credential.
//!
//! A slot holds at most one credential. An empty slot means "logged out".

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use tracing::warn;

use bms_types::Credential;

use crate::error::{SlotError, SlotResult};

/// Fixed name of the slot entry.
pub const SESSION_SLOT_KEY: &str = "adminAuth";

/// Single-entry key-value slot that survives process restarts.
pub trait SessionSlot: Send + Sync {
    /// Read the stored credential, if any.
    fn load(&self) -> SlotResult<Option<Credential>>;

    /// Replace the stored credential.
    fn store(&self, credential: &Credential) -> SlotResult<()>;

    /// Remove the stored credential. Clearing an empty slot is not an error.
    fn clear(&self) -> SlotResult<()>;
}

/// Slot kept in process memory, for tests and embedding.
#[derive(Debug, Default)]
pub struct InMemorySessionSlot {
    value: RwLock<Option<Credential>>,
}

impl InMemorySessionSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// A slot that already holds `credential`, as if left by an earlier run.
    pub fn with_credential(credential: Credential) -> Self {
        Self {
            value: RwLock::new(Some(credential)),
        }
    }
}

impl SessionSlot for InMemorySessionSlot {
    fn load(&self) -> SlotResult<Option<Credential>> {
        let value = self
            .value
            .read()
            .map_err(|e| SlotError::LockPoisoned(e.to_string()))?;
        Ok(value.clone())
    }

    fn store(&self, credential: &Credential) -> SlotResult<()> {
        let mut value = self
            .value
            .write()
            .map_err(|e| SlotError::LockPoisoned(e.to_string()))?;
        *value = Some(credential.clone());
        Ok(())
    }

    fn clear(&self) -> SlotResult<()> {
        let mut value = self
            .value
            .write()
            .map_err(|e| SlotError::LockPoisoned(e.to_string()))?;
        *value = None;
        Ok(())
    }
}

/// Slot stored as a single file named [`SESSION_SLOT_KEY`] in a directory.
///
/// Writes go to a temporary file in the same directory that is then renamed
/// over the slot, so a reader never sees a half-written token.
#[derive(Debug, Clone)]
pub struct FileSessionSlot {
    dir: PathBuf,
    path: PathBuf,
}

impl FileSessionSlot {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let path = dir.join(SESSION_SLOT_KEY);
        Self { dir, path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SessionSlot for FileSessionSlot {
    fn load(&self) -> SlotResult<Option<Credential>> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        match Credential::new(raw.trim()) {
            Ok(credential) => Ok(Some(credential)),
            Err(_) => {
                warn!(path = %self.path.display(), "ignoring blank session slot");
                Ok(None)
            }
        }
    }

    fn store(&self, credential: &Credential) -> SlotResult<()> {
        fs::create_dir_all(&self.dir)?;
        let mut tmp = tempfile::NamedTempFile::new_in(&self.dir)?;
        tmp.write_all(credential.as_str().as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }

    fn clear(&self) -> SlotResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}
