use std::sync::{Arc, RwLock};

use tracing::info;

use bms_session::{FileSessionSlot, InMemorySessionSlot, SessionGuard, StaticCredentialVerifier};
use bms_store::Collections;

use crate::config::{AppSettings, ServerConfig};
use crate::error::{ServerError, ServerResult};

/// Shared state behind every request handler.
#[derive(Clone)]
pub struct AppState {
    pub guard: Arc<SessionGuard>,
    pub collections: Collections,
    settings: Arc<RwLock<AppSettings>>,
}

impl AppState {
    pub fn new(guard: Arc<SessionGuard>, collections: Collections, settings: AppSettings) -> Self {
        Self {
            guard,
            collections,
            settings: Arc::new(RwLock::new(settings)),
        }
    }

    /// Build the state for a server process: file-backed session slot,
    /// static dev verifier, and a session restored from the slot if one was
    /// left by a previous run.
    pub fn from_config(config: &ServerConfig) -> ServerResult<Self> {
        let guard = SessionGuard::new(
            Arc::new(FileSessionSlot::new(&config.session_dir)),
            Arc::new(StaticCredentialVerifier::new(config.dev_credentials.clone())),
        );
        if guard.restore()?.is_some() {
            info!(dir = %config.session_dir.display(), "restored admin session");
        }
        let collections = if config.seed_demo_data {
            Collections::demo()?
        } else {
            Collections::in_memory()
        };
        Ok(Self::new(Arc::new(guard), collections, config.settings.clone()))
    }

    /// Fully in-memory state with the demo catalog, for tests and embedding.
    pub fn in_memory() -> ServerResult<Self> {
        let guard = SessionGuard::new(
            Arc::new(InMemorySessionSlot::new()),
            Arc::new(StaticCredentialVerifier::default()),
        );
        Ok(Self::new(
            Arc::new(guard),
            Collections::demo()?,
            AppSettings::default(),
        ))
    }

    pub fn settings(&self) -> ServerResult<AppSettings> {
        self.settings
            .read()
            .map(|s| s.clone())
            .map_err(|e| ServerError::Internal(e.to_string()))
    }

    pub fn replace_settings(&self, settings: AppSettings) -> ServerResult<AppSettings> {
        let mut current = self
            .settings
            .write()
            .map_err(|e| ServerError::Internal(e.to_string()))?;
        *current = settings.clone();
        Ok(settings)
    }
}
