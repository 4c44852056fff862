//! Drawbot Settings Crate
//!
//! Handles application configuration: loading and saving JSON or TOML files,
//! defaults for every section, and validation.

pub mod config;
pub mod error;

pub use config::{
    BackendKind, BackendSettings, CanvasSettings, Config, GeneratorSettings, HistorySettings,
    PreviewSettings, RenderSettings,
};
pub use error::{ConfigError, SettingsError, SettingsResult};
