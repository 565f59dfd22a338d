use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use bms_session::DevCredentials;

use crate::error::{ServerError, ServerResult};

/// Server configuration, loadable from TOML. Missing keys take defaults.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind_addr: SocketAddr,
    /// Directory holding the durable session slot.
    pub session_dir: PathBuf,
    /// Start with the demo sections and posts instead of empty collections.
    pub seed_demo_data: bool,
    pub dev_credentials: DevCredentials,
    pub settings: AppSettings,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([127, 0, 0, 1], 8080)),
            session_dir: PathBuf::from(".bms"),
            seed_demo_data: true,
            dev_credentials: DevCredentials::default(),
            settings: AppSettings::default(),
        }
    }
}

impl ServerConfig {
    pub fn from_toml_str(raw: &str) -> ServerResult<Self> {
        toml::from_str(raw).map_err(|e| ServerError::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> ServerResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_toml_str(&raw)
    }
}

/// Application settings editable from the admin area.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub app_name: String,
    pub admin_email: String,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            app_name: "Onboard Bulk Mail".into(),
            admin_email: "admin@example.com".into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let c = ServerConfig::default();
        assert_eq!(c.bind_addr, "127.0.0.1:8080".parse::<SocketAddr>().unwrap());
        assert_eq!(c.session_dir, PathBuf::from(".bms"));
        assert!(c.seed_demo_data);
        assert_eq!(c.dev_credentials.identifier, "admin@example.com");
        assert_eq!(c.settings.app_name, "Onboard Bulk Mail");
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let c = ServerConfig::from_toml_str(
            r#"
            bind_addr = "0.0.0.0:9000"
            seed_demo_data = false

            [settings]
            app_name = "Bulk MS"
            "#,
        )
        .unwrap();
        assert_eq!(c.bind_addr.port(), 9000);
        assert!(!c.seed_demo_data);
        assert_eq!(c.settings.app_name, "Bulk MS");
        assert_eq!(c.settings.admin_email, "admin@example.com");
        assert_eq!(c.dev_credentials.secret, "admin123");
    }

    #[test]
    fn invalid_toml_is_config_error() {
        let err = ServerConfig::from_toml_str("bind_addr = 12").unwrap_err();
        assert!(matches!(err, ServerError::Config(_)));
    }

    #[test]
    fn load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bms.toml");
        std::fs::write(&path, "session_dir = \"/var/lib/bms\"\n").unwrap();
        let c = ServerConfig::load(&path).unwrap();
        assert_eq!(c.session_dir, PathBuf::from("/var/lib/bms"));
    }
}
