//! Client connection configuration.
//!
//! Resolution order: hardcoded defaults → TOML config file → environment
//! variables. The config file is discovered via `$CRONHUB_CONFIG` or the
//! platform config directory (`~/.config/cronhub/config.toml` on Linux).

use std::env;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::ClientResult;

/// Default backend address when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5920";

/// Default request timeout in milliseconds.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Connection settings for [`crate::TaskApiClient`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Backend base URL, without a trailing slash.
    pub base_url: String,
    /// Per-request timeout in milliseconds.
    pub timeout_ms: u64,
    /// Session token sent as the `Auth-Token` header on every request.
    pub auth_token: Option<String>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
            auth_token: None,
        }
    }
}

impl ClientConfig {
    /// Resolve a config from all sources: defaults, then the discovered (or
    /// explicitly given) config file, then environment overrides.
    pub fn resolve(explicit_path: Option<&Path>) -> ClientResult<Self> {
        let path = match explicit_path {
            Some(p) => Some(p.to_path_buf()),
            None => Self::find_config_file(),
        };

        let mut config = match path {
            Some(p) => {
                debug!("Loading client config from: {}", p.display());
                Self::load_from_path(&p)?
            }
            None => {
                debug!("No client config file found, using defaults");
                Self::default()
            }
        };

        config.apply_env_overrides();
        Ok(config)
    }

    /// Load a config from an explicit TOML file path.
    pub fn load_from_path(path: &Path) -> ClientResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&raw)?)
    }

    /// Locate the config file: `$CRONHUB_CONFIG` first, then the platform
    /// config directory. Returns `None` if neither points at an existing file.
    pub fn find_config_file() -> Option<PathBuf> {
        if let Ok(path) = env::var("CRONHUB_CONFIG") {
            let path = PathBuf::from(path);
            if path.is_file() {
                return Some(path);
            }
            warn!(
                "CRONHUB_CONFIG points at a missing file: {}",
                path.display()
            );
        }

        dirs::config_dir()
            .map(|dir| dir.join("cronhub").join("config.toml"))
            .filter(|path| path.is_file())
    }

    /// Apply `CRONHUB_*` environment variable overrides in place.
    fn apply_env_overrides(&mut self) {
        if let Ok(url) = env::var("CRONHUB_BASE_URL") {
            if !url.is_empty() {
                self.base_url = url;
            }
        }
        if let Ok(token) = env::var("CRONHUB_AUTH_TOKEN") {
            if !token.is_empty() {
                self.auth_token = Some(token);
            }
        }
        if let Ok(raw) = env::var("CRONHUB_TIMEOUT_MS") {
            match raw.parse::<u64>() {
                Ok(ms) => self.timeout_ms = ms,
                Err(_) => warn!(value = %raw, "Ignoring unparseable CRONHUB_TIMEOUT_MS"),
            }
        }
    }
}
