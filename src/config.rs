//! Runtime configuration for the boundary layer.
//!
//! Loaded from a TOML file; every field has a default so an empty file (or
//! no file at all) is valid.

use crate::core::error::{ChitraResult, ValidationError};
use crate::core::types::Strength;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// File name looked up in the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "chitra.toml";

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Strength used when a request does not give one.
    pub default_strength: f32,
    /// JPEG encoder quality, 1-100.
    pub jpeg_quality: u8,
    /// Default `RUST_LOG`-style filter for the CLI.
    pub log_level: String,
    /// Preview rendering.
    pub preview: PreviewConfig,
    /// Batch processing.
    pub batch: BatchConfig,
}

/// Settings for the preview sample image and its cache.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    /// Sample width in pixels.
    pub width: u32,
    /// Sample height in pixels.
    pub height: u32,
    /// Sample fill color.
    pub color: [u8; 3],
    /// Number of rendered previews kept in memory.
    pub cache_capacity: usize,
}

/// Settings for batch runs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Process files on the rayon thread pool.
    pub parallel: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_strength: Strength::DEFAULT.value(),
            jpeg_quality: 90,
            log_level: "info".to_string(),
            preview: PreviewConfig::default(),
            batch: BatchConfig::default(),
        }
    }
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            width: 400,
            height: 300,
            color: [73, 109, 137],
            cache_capacity: 64,
        }
    }
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self { parallel: true }
    }
}

impl Config {
    /// Parse configuration from TOML text.
    pub fn from_toml_str(text: &str) -> ChitraResult<Self> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> ChitraResult<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&text)
    }

    /// Load `path` if given, else `chitra.toml` if present, else defaults.
    pub fn discover(path: Option<&Path>) -> ChitraResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => Self::load(DEFAULT_CONFIG_FILE),
            None => Ok(Self::default()),
        }
    }

    /// Check value ranges.
    pub fn validate(&self) -> Result<(), ValidationError> {
        Strength::new(self.default_strength)?;

        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(invalid("jpeg_quality", "must be between 1 and 100"));
        }
        if self.preview.width == 0 || self.preview.height == 0 {
            return Err(invalid("preview", "width and height must be non-zero"));
        }
        if self.preview.cache_capacity == 0 {
            return Err(invalid("preview.cache_capacity", "must be at least 1"));
        }
        Ok(())
    }

    /// The configured default strength.
    pub fn strength(&self) -> Strength {
        Strength::new(self.default_strength).unwrap_or_default()
    }
}

fn invalid(key: &str, reason: &str) -> ValidationError {
    ValidationError::InvalidConfig {
        key: key.to_string(),
        reason: reason.to_string(),
    }
}
