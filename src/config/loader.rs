use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::Settings;

/// Errors that can occur when loading settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read settings file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse settings: {source}")]
    ParseError {
        #[source]
        source: toml::de::Error,
    },

    #[error("Settings validation failed: {message}")]
    ValidationError { message: String },
}

impl Settings {
    /// Parses settings from TOML text and validates them.
    ///
    /// Missing keys fall back to their defaults.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let settings: Settings =
            toml::from_str(content).map_err(|e| ConfigError::ParseError { source: e })?;
        settings.validate()?;
        Ok(settings)
    }

    /// Loads settings from a file.
    ///
    /// - If the file doesn't exist, returns `Settings::default()`.
    /// - Otherwise parses it as TOML and validates.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Ok(Settings::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        Self::from_toml_str(&content)
    }

    /// Validates the settings.
    ///
    /// Every window must be non-zero: a zero quiet period would turn the
    /// debounce engines into pass-through.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let windows = [
            ("throttle_first_ms", self.windows.throttle_first_ms),
            ("throttle_latest_ms", self.windows.throttle_latest_ms),
            ("input_debounce_ms", self.windows.input_debounce_ms),
        ];

        for (name, value) in windows {
            if value == 0 {
                return Err(ConfigError::ValidationError {
                    message: format!("windows.{} must be greater than zero", name),
                });
            }
        }

        Ok(())
    }
}
