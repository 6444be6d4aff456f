//! Configuration management for workbc.
//!
//! Configuration is loaded from `~/.config/workbc/config.toml` (or the
//! directory named by `WORKBC_CONFIG_DIR`).

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::{debug, warn};

/// Public WorkBC endpoint used until the user sets another one.
pub const DEFAULT_BASE_URL: &str = "https://www.workbc.ca/api";

/// Overrides the directory holding `config.toml`.
pub const CONFIG_DIR_ENV: &str = "WORKBC_CONFIG_DIR";

const CONFIG_FILE: &str = "config.toml";

/// User settings persisted between invocations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Root URL every API request is issued against.
    #[serde(rename = "baseUrl", default = "default_base_url")]
    pub base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Keys accepted by [`ConfigStore::set`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    BaseUrl,
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "baseUrl" | "base_url" | "base-url" => Ok(ConfigKey::BaseUrl),
            other => Err(ConfigError::UnknownKey(other.to_string())),
        }
    }
}

/// File-backed settings store scoped to the current user.
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    /// Open the store in the platform config directory, honouring
    /// `WORKBC_CONFIG_DIR`.
    pub fn open() -> Result<Self, ConfigError> {
        let dir = match std::env::var_os(CONFIG_DIR_ENV) {
            Some(dir) => PathBuf::from(dir),
            None => dirs::config_dir()
                .map(|p| p.join("workbc"))
                .ok_or(ConfigError::NoConfigDir)?,
        };
        Ok(Self::in_dir(dir))
    }

    /// Open a store whose file lives in `dir`.
    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        Self {
            path: dir.into().join(CONFIG_FILE),
        }
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Current configuration. Falls back to defaults when the file is
    /// missing or unreadable.
    pub fn get(&self) -> Config {
        if !self.path.exists() {
            debug!("No config file at {}, using defaults", self.path.display());
            return Config::default();
        }

        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!("Failed to read config file {}: {}", self.path.display(), e);
                return Config::default();
            }
        };

        toml::from_str(&contents).unwrap_or_else(|e| {
            warn!("Failed to parse config file {}: {}", self.path.display(), e);
            Config::default()
        })
    }

    /// Persist a single key, overwriting any previous value.
    pub fn set(&self, key: &str, value: &str) -> Result<(), ConfigError> {
        let key: ConfigKey = key.parse()?;
        let mut config = self.get();
        match key {
            ConfigKey::BaseUrl => config.base_url = value.to_string(),
        }
        self.save(&config)
    }

    /// The WorkBC API is public, so there is never a credential to check.
    pub fn is_configured(&self) -> bool {
        true
    }

    fn save(&self, config: &Config) -> Result<(), ConfigError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let contents = toml::to_string_pretty(config)?;
        std::fs::write(&self.path, contents).map_err(|source| ConfigError::Write {
            path: self.path.clone(),
            source,
        })?;
        debug!("Wrote config to {}", self.path.display());
        Ok(())
    }
}
