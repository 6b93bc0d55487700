//! Editor configuration.
//!
//! ## Serde defaults
//!
//! `#[serde(default)]` on every section fills missing fields from
//! `Default::default()`, so a config file only needs the keys it changes.
//!
//! ```toml
//! [editor]
//! move_policy = "strict"
//! line_ending = "crlf"
//! trailing_newline = true
//! ```

use quill_buffer::{BufferConfig, MovePolicy};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::document::LineEnding;

/// Main configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Editing behavior
    pub editor: EditorConfig,

    /// Session settings
    pub session: SessionConfig,
}

impl Config {
    /// Loads config from the default location, falling back to defaults.
    pub fn load() -> Self {
        match Self::load_from_default_path() {
            Ok(config) => config,
            Err(err) => {
                tracing::warn!("Using default config: {}", err);
                Self::default()
            }
        }
    }

    /// Loads config from a file.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    fn load_from_default_path() -> Result<Self, ConfigError> {
        let path = Self::default_path()?;
        if path.exists() {
            tracing::debug!("Loading config from {}", path.display());
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Returns the default config file path.
    pub fn default_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("quill").join("config.toml"))
    }

    /// Renders the config as TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Buffer settings derived from this config.
    pub fn buffer_config(&self) -> BufferConfig {
        BufferConfig {
            move_policy: self.editor.move_policy,
        }
    }
}

/// Editing behavior configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// What cursor movement does at buffer edges
    pub move_policy: MovePolicy,

    /// Line ending used when saving
    pub line_ending: LineEndingPreference,

    /// Always end saved files with a line ending
    pub trailing_newline: bool,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            move_policy: MovePolicy::Wrap,
            line_ending: LineEndingPreference::Auto,
            trailing_newline: false,
        }
    }
}

/// Configured line ending for saved files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineEndingPreference {
    /// Keep the ending detected when the file was opened
    #[default]
    Auto,
    Lf,
    CrLf,
    Cr,
}

impl LineEndingPreference {
    /// The forced line ending, or `None` for `Auto`.
    pub fn forced(self) -> Option<LineEnding> {
        match self {
            Self::Auto => None,
            Self::Lf => Some(LineEnding::Lf),
            Self::CrLf => Some(LineEnding::CrLf),
            Self::Cr => Some(LineEnding::Cr),
        }
    }
}

/// Session configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Events buffered per subscriber before it lags
    pub event_capacity: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            event_capacity: 256,
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Config directory not found")]
    NoConfigDir,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}
