//! Error types for the settings crate.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failure to read, write or accept a configuration file.
#[derive(Error, Debug)]
pub enum SettingsError {
    #[error("Failed to read config {}: {source}", .path.display())]
    Read { path: PathBuf, source: io::Error },

    #[error("Failed to write config {}: {source}", .path.display())]
    Write { path: PathBuf, source: io::Error },

    #[error("Cannot create config directory {}: {source}", .path.display())]
    CreateDir { path: PathBuf, source: io::Error },

    /// A value is well-formed but unusable, e.g. an empty URL.
    #[error("Invalid setting '{key}': {reason}")]
    InvalidSetting { key: String, reason: String },

    #[error("Invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid TOML config: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("Cannot encode config as TOML: {0}")]
    TomlEncode(#[from] toml::ser::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl SettingsError {
    pub fn invalid(key: impl Into<String>, reason: impl Into<String>) -> Self {
        SettingsError::InvalidSetting {
            key: key.into(),
            reason: reason.into(),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    /// Only `.json` and `.toml` files are understood.
    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),

    #[error("Value out of range for '{key}': {value}")]
    ValueOutOfRange { key: String, value: String },

    /// The platform exposes no per-user config directory.
    #[error("No config directory on {0}")]
    NoConfigDir(String),
}

pub type SettingsResult<T> = Result<T, SettingsError>;
