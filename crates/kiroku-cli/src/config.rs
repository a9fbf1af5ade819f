use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use kiroku_api::TransportConfig;
use serde::{Deserialize, Serialize};

use crate::error::CliError;

const DEFAULT_CONFIG: &str = include_str!("../../../config/default.toml");

/// Top-level CLI configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: TransportConfig,
    pub account: AccountConfig,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountConfig {
    pub username: Option<String>,
}

impl AppConfig {
    /// Load config: the user file if it exists, built-in defaults otherwise.
    pub fn load() -> Result<Self, CliError> {
        let user_path = Self::config_path();
        if user_path.exists() {
            Self::load_from(&user_path)
        } else {
            Self::builtin()
        }
    }

    pub fn load_from(path: &Path) -> Result<Self, CliError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| CliError::Config(e.to_string()))?;
        toml::from_str(&content).map_err(|e| CliError::Config(e.to_string()))
    }

    pub fn builtin() -> Result<Self, CliError> {
        toml::from_str(DEFAULT_CONFIG).map_err(|e| CliError::Config(e.to_string()))
    }

    /// Write the built-in defaults to `path` unless a file is already there.
    /// Returns whether a file was written.
    pub fn init(path: &Path) -> Result<bool, CliError> {
        if path.exists() {
            return Ok(false);
        }
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, DEFAULT_CONFIG)?;
        Ok(true)
    }

    /// Path to user config file (XDG on Linux, AppData on Windows).
    pub fn config_path() -> PathBuf {
        ProjectDirs::from("", "", "kiroku")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}
