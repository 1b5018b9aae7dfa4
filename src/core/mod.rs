//! Core types for the Chitra filter engine.
//!
//! This module contains the foundational types shared by the engine and its
//! callers:
//! - The validated RGB [`Image`] and boundary [`Strength`]
//! - Filter identifiers and listing metadata
//! - Error types

pub mod error;
pub mod kind;
pub mod types;

// Re-export commonly used types
pub use error::{
    BatchError, ChitraError, ChitraResult, FilterError, FilterResult, ProcessingError,
    UnsupportedFilterError, ValidationError,
};
pub use kind::{Category, FilterInfo, FilterKind};
pub use types::{Image, ImageSize, Strength};
