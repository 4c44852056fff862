//! Configuration for drawbot
//!
//! Supports JSON and TOML files, picked by extension, stored under the
//! platform config directory by default.
//!
//! Configuration is organized into sections:
//! - Canvas size
//! - Render defaults for the main canvas and the preview
//! - Storage backend and owner
//! - Generative service endpoint and timeout
//! - History depth

use drawbot_core::{CANVAS_HEIGHT, CANVAS_WIDTH};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{ConfigError, SettingsError, SettingsResult};

/// Directory name under the platform config directory.
pub const APP_DIR: &str = "drawbot";

/// File name of the default configuration.
pub const CONFIG_FILE: &str = "config.toml";

/// Canvas dimensions in pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasSettings {
    pub width: u32,
    pub height: u32,
}

impl Default for CanvasSettings {
    fn default() -> Self {
        Self {
            width: CANVAS_WIDTH,
            height: CANVAS_HEIGHT,
        }
    }
}

/// Defaults applied when a command leaves a style attribute unset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderSettings {
    /// CSS color name or hex
    pub default_color: String,
    pub default_line_width: f32,
    /// CSS-style font, e.g. `20px Arial`
    pub default_font: String,
    /// Where the shell writes its canvas snapshot after each change
    pub snapshot_path: PathBuf,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            default_color: "black".to_string(),
            default_line_width: 1.0,
            default_font: "20px Arial".to_string(),
            snapshot_path: PathBuf::from("drawbot.png"),
        }
    }
}

/// Thumbnail preview frame and its style defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewSettings {
    pub width: u32,
    pub height: u32,
    pub default_line_width: f32,
    pub default_font: String,
}

impl Default for PreviewSettings {
    fn default() -> Self {
        Self {
            width: 200,
            height: 200,
            default_line_width: 2.0,
            default_font: "16px Arial".to_string(),
        }
    }
}

/// Storage backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// REST storage service
    #[default]
    Http,
    /// In-process store, lost on exit
    Memory,
}

impl std::fmt::Display for BackendKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http => write!(f, "http"),
            Self::Memory => write!(f, "memory"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackendSettings {
    pub kind: BackendKind,
    /// Storage service root
    pub base_url: String,
    /// Owner recorded on saved drawings
    pub owner_id: i64,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            kind: BackendKind::Http,
            base_url: "http://localhost:5203".to_string(),
            owner_id: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    /// Full URL the generation request is posted to
    pub endpoint: String,
    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
}

impl GeneratorSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            endpoint: "http://localhost:5203/api/drawing".to_string(),
            timeout_ms: 60_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct HistorySettings {
    /// Maximum number of undoable entries; unbounded when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_depth: Option<usize>,
}

/// Complete application configuration
///
/// Every section falls back to its defaults, so partial files are valid.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub canvas: CanvasSettings,
    pub render: RenderSettings,
    pub preview: PreviewSettings,
    pub backend: BackendSettings,
    pub generator: GeneratorSettings,
    pub history: HistorySettings,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Format {
    Json,
    Toml,
}

fn format_of(path: &Path) -> SettingsResult<Format> {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some("json") => Ok(Format::Json),
        Some("toml") => Ok(Format::Toml),
        other => Err(ConfigError::UnsupportedFormat(other.unwrap_or("<none>").to_string()).into()),
    }
}

fn out_of_range(key: &str, value: impl ToString) -> SettingsError {
    ConfigError::ValueOutOfRange {
        key: key.to_string(),
        value: value.to_string(),
    }
    .into()
}

fn check_url(key: &str, url: &str) -> SettingsResult<()> {
    let url = url.trim();
    if url.is_empty() {
        return Err(SettingsError::invalid(key, "must not be empty"));
    }
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(SettingsError::invalid(key, "must be an http(s) URL"));
    }
    Ok(())
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Platform config directory for drawbot, e.g. `~/.config/drawbot`.
    pub fn config_dir() -> SettingsResult<PathBuf> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or_else(|| ConfigError::NoConfigDir(std::env::consts::OS.to_string()).into())
    }

    pub fn default_path() -> SettingsResult<PathBuf> {
        Ok(Self::config_dir()?.join(CONFIG_FILE))
    }

    /// Load config from file (JSON or TOML)
    pub fn load_from_file(path: &Path) -> SettingsResult<Self> {
        let format = format_of(path)?;
        let content = std::fs::read_to_string(path).map_err(|source| SettingsError::Read {
            path: path.to_path_buf(),
            source,
        })?;

        let config: Self = match format {
            Format::Json => serde_json::from_str(&content)?,
            Format::Toml => toml::from_str(&content)?,
        };

        config.validate()?;
        debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Loads `path`, or returns the defaults when the file does not exist.
    pub fn load_or_default(path: &Path) -> SettingsResult<Self> {
        if !path.exists() {
            info!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from_file(path)
    }

    /// Save config to file (JSON or TOML), creating parent directories.
    pub fn save_to_file(&self, path: &Path) -> SettingsResult<()> {
        self.validate()?;

        let content = match format_of(path)? {
            Format::Json => serde_json::to_string_pretty(self)?,
            Format::Toml => toml::to_string_pretty(self)?,
        };

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|source| SettingsError::CreateDir {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        std::fs::write(path, content).map_err(|source| SettingsError::Write {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> SettingsResult<()> {
        if self.canvas.width == 0 {
            return Err(out_of_range("canvas.width", self.canvas.width));
        }
        if self.canvas.height == 0 {
            return Err(out_of_range("canvas.height", self.canvas.height));
        }

        if self.render.default_color.trim().is_empty() {
            return Err(SettingsError::invalid("render.default_color", "must not be empty"));
        }
        if !(self.render.default_line_width > 0.0) {
            return Err(out_of_range(
                "render.default_line_width",
                self.render.default_line_width,
            ));
        }
        if self.render.default_font.trim().is_empty() {
            return Err(SettingsError::invalid("render.default_font", "must not be empty"));
        }

        if self.preview.width == 0 || self.preview.height == 0 {
            return Err(out_of_range(
                "preview",
                format!("{}x{}", self.preview.width, self.preview.height),
            ));
        }
        if !(self.preview.default_line_width > 0.0) {
            return Err(out_of_range(
                "preview.default_line_width",
                self.preview.default_line_width,
            ));
        }
        if self.preview.default_font.trim().is_empty() {
            return Err(SettingsError::invalid("preview.default_font", "must not be empty"));
        }

        if self.backend.kind == BackendKind::Http {
            check_url("backend.base_url", &self.backend.base_url)?;
        }
        check_url("generator.endpoint", &self.generator.endpoint)?;
        if self.generator.timeout_ms == 0 {
            return Err(out_of_range("generator.timeout_ms", self.generator.timeout_ms));
        }

        if self.history.max_depth == Some(0) {
            return Err(out_of_range("history.max_depth", 0));
        }

        Ok(())
    }
}
