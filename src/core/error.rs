//! Error types for Chitra.
//!
//! Uses thiserror for structured errors with context. Errors carry the
//! offending value so a boundary layer can log or report them without the
//! engine doing any logging of its own.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for Chitra.
///
/// This enum encompasses all error categories and enables automatic
/// conversion between specific error types.
#[derive(Error, Debug)]
pub enum ChitraError {
    /// Unknown filter or bad pixel data.
    #[error("Filter error: {0}")]
    Filter(#[from] FilterError),

    /// A boundary parameter was rejected.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// A batch run could not start.
    #[error("Batch error: {0}")]
    Batch(#[from] BatchError),

    /// Filesystem failure.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Decoding or encoding failure.
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    /// Malformed TOML configuration.
    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    /// JSON serialization failure.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Anything else.
    #[error("{0}")]
    Other(String),
}

impl From<UnsupportedFilterError> for ChitraError {
    fn from(error: UnsupportedFilterError) -> Self {
        ChitraError::Filter(FilterError::Unsupported(error))
    }
}

impl From<ProcessingError> for ChitraError {
    fn from(error: ProcessingError) -> Self {
        ChitraError::Filter(FilterError::Processing(error))
    }
}

/// A filter identifier outside the closed set of supported filters.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[error("Filter '{name}' is not supported. Valid filters are: {}", .valid.join(", "))]
pub struct UnsupportedFilterError {
    /// The identifier that was requested.
    pub name: String,
    /// Every identifier the registry accepts.
    pub valid: Vec<String>,
}

/// Failures while building or transforming pixel data.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProcessingError {
    /// Width or height is zero.
    #[error("Image has zero area ({width}x{height})")]
    EmptyImage {
        /// Requested width.
        width: u32,
        /// Requested height.
        height: u32,
    },

    /// The buffer length is not `width * height * 3`.
    #[error("Pixel buffer holds {actual} bytes, expected {expected} for an RGB image")]
    BufferSizeMismatch {
        /// Bytes an RGB image of the given size needs.
        expected: usize,
        /// Bytes supplied.
        actual: usize,
    },

    /// Other processing failure.
    #[error("{0}")]
    Other(String),
}

/// Errors surfaced by the filter engine.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum FilterError {
    /// The identifier is not a registered filter.
    #[error(transparent)]
    Unsupported(#[from] UnsupportedFilterError),

    /// The pixel data could not be processed.
    #[error("Image processing error: {0}")]
    Processing(#[from] ProcessingError),
}

/// Parameter validation performed at the boundary, before calling into the engine.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ValidationError {
    /// Strength falls outside `[min, max]`.
    #[error("Strength {value} is outside the allowed range [{min}, {max}]")]
    StrengthOutOfRange {
        /// The rejected strength.
        value: f32,
        /// Lowest accepted strength.
        min: f32,
        /// Highest accepted strength.
        max: f32,
    },

    /// Strength is NaN or infinite.
    #[error("Strength must be a finite number")]
    NonFiniteStrength,

    /// A configuration value is out of range.
    #[error("Invalid configuration value '{key}': {reason}")]
    InvalidConfig {
        /// Dotted path of the offending key.
        key: String,
        /// What is wrong with it.
        reason: String,
    },
}

/// Errors during batch processing.
#[derive(Error, Debug)]
pub enum BatchError {
    /// The glob matched no files.
    #[error("No input files found matching pattern: {pattern}")]
    NoInputsFound {
        /// The glob pattern.
        pattern: String,
    },

    /// The glob pattern does not parse.
    #[error("Invalid input pattern '{pattern}': {error}")]
    InvalidPattern {
        /// The glob pattern.
        pattern: String,
        /// Parser message.
        error: String,
    },

    /// Outputs have nowhere to go.
    #[error("Output directory does not exist: {path}")]
    OutputDirectoryMissing {
        /// The missing directory.
        path: PathBuf,
    },

    /// One input could not be loaded, filtered or saved.
    #[error("Failed to process {path}: {error}")]
    ItemFailed {
        /// The input file.
        path: PathBuf,
        /// Why it failed.
        error: String,
    },
}

// ============================================================================
// Error Utilities
// ============================================================================

impl FilterError {
    /// Whether the caller caused this error (maps to a 4xx-class response).
    pub fn is_client_error(&self) -> bool {
        matches!(
            self,
            FilterError::Unsupported(_)
                | FilterError::Processing(ProcessingError::EmptyImage { .. })
                | FilterError::Processing(ProcessingError::BufferSizeMismatch { .. })
        )
    }

    /// Get suggestion for fixing this error.
    pub fn suggested_fix(&self) -> Option<String> {
        match self {
            FilterError::Unsupported(err) => {
                Some(format!("Use one of: {}", err.valid.join(", ")))
            }
            FilterError::Processing(ProcessingError::EmptyImage { .. }) => {
                Some("Provide an image with non-zero width and height".to_string())
            }
            _ => None,
        }
    }
}

/// Result type alias for Chitra operations.
pub type ChitraResult<T> = Result<T, ChitraError>;

/// Result type alias for filter operations.
pub type FilterResult<T> = Result<T, FilterError>;
