//! # Chitra - Photo Filter Engine
//!
//! Chitra applies one of 19 named photo filters to a decoded RGB image. Each
//! filter is a pure function of `(image, strength)`; the registry maps
//! identifiers to those functions and rejects anything it does not know.
//!
//! ## Quick Start
//!
//! ```rust
//! use chitra::prelude::*;
//!
//! let image = Image::filled(64, 48, [73, 109, 137]).unwrap();
//!
//! // Dispatch by name (case-insensitive) or by kind
//! let toned = apply_filter(&image, "sepia", 0.5).unwrap();
//! let dark = apply_filter(&image, FilterKind::Vignette, 1.5).unwrap();
//! assert_eq!(toned.size(), image.size());
//! assert_eq!(dark.size(), image.size());
//!
//! // Unknown names list the valid ones
//! let err = apply_filter(&image, "glow", 1.0).unwrap_err();
//! assert!(err.to_string().contains("oil_painting"));
//! ```
//!
//! ## Architecture
//!
//! - [`core`]: image type, filter identifiers, errors
//! - [`filters`]: registry, built-in filters, preview rendering
//! - [`io`]: decoding and encoding at the boundary
//! - [`batch`]: applying one filter to many files
//! - [`config`]: TOML configuration for the boundary layer
//!
//! ## Strength
//!
//! Strength is nominally in `[0.0, 2.0]` with a default of `1.0`, but its
//! meaning is filter-specific: a blend ratio for sepia, a radius multiplier
//! for blur, a raw multiplier for brightness/contrast/saturation, a bit-depth
//! reduction for posterize, a falloff multiplier for vignette. Eleven filters
//! ignore it. Range checking belongs to the caller (see
//! [`Strength::new`](crate::core::types::Strength::new)); the filters clamp
//! their own arithmetic and accept any value without panicking.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod batch;
pub mod config;
pub mod core;
pub mod filters;
pub mod io;

use crate::core::error::FilterResult;
use crate::core::types::Image;
use crate::filters::registry::FilterRegistry;

/// Prelude module for convenient imports.
///
/// Import everything commonly needed with:
/// ```rust
/// use chitra::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use crate::core::types::{Image, ImageSize, Strength};
    pub use crate::core::kind::{Category, FilterInfo, FilterKind};

    // Errors
    pub use crate::core::error::{
        BatchError, ChitraError, ChitraResult, FilterError, FilterResult, ProcessingError,
        UnsupportedFilterError, ValidationError,
    };

    // Filters
    pub use crate::filters::preview::{PreviewRenderer, PreviewStats};
    pub use crate::filters::registry::{FilterFn, FilterRegistry, RegistryEntry};

    // Boundary
    pub use crate::batch::{BatchJob, BatchReport};
    pub use crate::config::Config;
    pub use crate::io::OutputFormat;

    pub use crate::{apply_filter, list_filters, DEFAULT_STRENGTH};
}

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Strength used when the caller does not give one.
pub const DEFAULT_STRENGTH: f32 = 1.0;

/// Apply a filter by name or [`FilterKind`](crate::core::kind::FilterKind)
/// using the shared registry.
///
/// # Errors
///
/// Returns [`FilterError::Unsupported`](crate::core::error::FilterError::Unsupported) for an unknown identifier.
pub fn apply_filter(
    image: &Image,
    filter: impl AsRef<str>,
    strength: f32,
) -> FilterResult<Image> {
    FilterRegistry::global().apply(image, filter, strength)
}

/// Every supported filter with its description, in listing order.
pub fn list_filters() -> Vec<crate::core::kind::FilterInfo> {
    FilterRegistry::global().list()
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    fn sample() -> Image {
        Image::new(
            16,
            10,
            (0..16 * 10 * 3).map(|i| (i * 13 % 251) as u8).collect(),
        )
        .unwrap()
    }

    #[test]
    fn test_version() {
        assert!(!super::VERSION.is_empty());
        assert_eq!(super::NAME, "chitra");
    }

    #[test]
    fn test_listing() {
        let filters = list_filters();
        assert_eq!(filters.len(), 19);
        assert_eq!(filters[0].id, "grayscale");
        assert_eq!(filters[18].id, "oil_painting");

        let json = serde_json::to_value(&filters).unwrap();
        assert_eq!(json[1]["description"], "Apply classic sepia tone effect");
        assert_eq!(json[1]["category"], "color");
    }

    #[test]
    fn test_default_strength_matches_filter_output() {
        let image = sample();
        let a = apply_filter(&image, "contrast", DEFAULT_STRENGTH).unwrap();
        let b = apply_filter(&image, "contrast", Strength::default().value()).unwrap();
        assert_eq!(a, b);
        assert_eq!(a, image);
    }

    #[test]
    fn test_posterize_extreme_strengths() {
        let image = sample();
        assert_eq!(apply_filter(&image, "posterize", 0.0).unwrap(), image);
        let coarse = apply_filter(&image, "posterize", 1.0e6).unwrap();
        assert!(coarse.as_raw().iter().all(|&v| v == 0 || v == 0x80));
    }

    #[test]
    fn test_vignette_center_untouched() {
        let image = sample();
        for strength in [0.0, 1.0, 2.0] {
            let out = apply_filter(&image, "vignette", strength).unwrap();
            assert_eq!(out.pixel(8, 5), image.pixel(8, 5));
        }
    }

    #[test]
    fn test_strength_ignored_where_documented() {
        let image = sample();
        for kind in FilterKind::ALL {
            if kind.info().uses_strength {
                continue;
            }
            let low = apply_filter(&image, kind, 0.0).unwrap();
            let high = apply_filter(&image, kind, 2.0).unwrap();
            assert_eq!(low, high, "{kind}");
        }
    }
}
