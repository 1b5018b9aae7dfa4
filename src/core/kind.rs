//! Filter identifiers and their descriptive metadata.
//!
//! The set of filters is closed: [`FilterKind`] enumerates every identifier
//! the engine accepts, and [`FilterInfo`] is what a discovery endpoint shows.

use crate::core::error::UnsupportedFilterError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Category for grouping filters in listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Per-pixel color remapping (grayscale, sepia, negative, ...)
    Color,
    /// Tone adjustments driven by a multiplier
    Adjust,
    /// Blur effects
    Blur,
    /// Sharpening effects
    Sharpen,
    /// Edge detection and relief
    Edge,
    /// Multi-step artistic looks
    Stylize,
}

impl Category {
    /// Get the display name for this category.
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Color => "Color",
            Category::Adjust => "Adjust",
            Category::Blur => "Blur",
            Category::Sharpen => "Sharpen",
            Category::Edge => "Edge",
            Category::Stylize => "Stylize",
        }
    }

    /// Get all categories in display order.
    pub fn all() -> &'static [Category] {
        &[
            Category::Color,
            Category::Adjust,
            Category::Blur,
            Category::Sharpen,
            Category::Edge,
            Category::Stylize,
        ]
    }
}

/// One of the supported filters.
///
/// Parsing is case-insensitive, so `"sepia"`, `"Sepia"` and `"SEPIA"` all
/// resolve to [`FilterKind::Sepia`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    /// Luminance grayscale.
    Grayscale,
    /// Sepia duotone.
    Sepia,
    /// Gaussian blur.
    Blur,
    /// Outline on white.
    Contour,
    /// Unsharp enhancement.
    Sharpen,
    /// Strong edge enhancement.
    EdgeEnhance,
    /// Relief emboss.
    Emboss,
    /// Edge detection on black.
    FindEdges,
    /// Channel multiplier.
    Brightness,
    /// Spread around the mean gray.
    Contrast,
    /// Spread around each pixel's luma.
    Saturation,
    /// Muted sepia.
    Vintage,
    /// Inverted channels.
    Negative,
    /// Inversion above mid-level.
    Solarize,
    /// Reduced bit depth.
    Posterize,
    /// Darkened corners.
    Vignette,
    /// Gray pencil outline.
    Sketch,
    /// Soft saturated wash.
    Watercolor,
    /// Median-smoothed paint.
    OilPainting,
}

impl FilterKind {
    /// Every filter, in listing order.
    pub const ALL: [FilterKind; 19] = [
        FilterKind::Grayscale,
        FilterKind::Sepia,
        FilterKind::Blur,
        FilterKind::Contour,
        FilterKind::Sharpen,
        FilterKind::EdgeEnhance,
        FilterKind::Emboss,
        FilterKind::FindEdges,
        FilterKind::Brightness,
        FilterKind::Contrast,
        FilterKind::Saturation,
        FilterKind::Vintage,
        FilterKind::Negative,
        FilterKind::Solarize,
        FilterKind::Posterize,
        FilterKind::Vignette,
        FilterKind::Sketch,
        FilterKind::Watercolor,
        FilterKind::OilPainting,
    ];

    /// The canonical snake_case identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            FilterKind::Grayscale => "grayscale",
            FilterKind::Sepia => "sepia",
            FilterKind::Blur => "blur",
            FilterKind::Contour => "contour",
            FilterKind::Sharpen => "sharpen",
            FilterKind::EdgeEnhance => "edge_enhance",
            FilterKind::Emboss => "emboss",
            FilterKind::FindEdges => "find_edges",
            FilterKind::Brightness => "brightness",
            FilterKind::Contrast => "contrast",
            FilterKind::Saturation => "saturation",
            FilterKind::Vintage => "vintage",
            FilterKind::Negative => "negative",
            FilterKind::Solarize => "solarize",
            FilterKind::Posterize => "posterize",
            FilterKind::Vignette => "vignette",
            FilterKind::Sketch => "sketch",
            FilterKind::Watercolor => "watercolor",
            FilterKind::OilPainting => "oil_painting",
        }
    }

    /// Human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            FilterKind::Grayscale => "Grayscale",
            FilterKind::Sepia => "Sepia",
            FilterKind::Blur => "Blur",
            FilterKind::Contour => "Contour",
            FilterKind::Sharpen => "Sharpen",
            FilterKind::EdgeEnhance => "Edge Enhance",
            FilterKind::Emboss => "Emboss",
            FilterKind::FindEdges => "Find Edges",
            FilterKind::Brightness => "Brightness",
            FilterKind::Contrast => "Contrast",
            FilterKind::Saturation => "Saturation",
            FilterKind::Vintage => "Vintage",
            FilterKind::Negative => "Negative",
            FilterKind::Solarize => "Solarize",
            FilterKind::Posterize => "Posterize",
            FilterKind::Vignette => "Vignette",
            FilterKind::Sketch => "Sketch",
            FilterKind::Watercolor => "Watercolor",
            FilterKind::OilPainting => "Oil Painting",
        }
    }

    /// Short description shown by the discovery endpoint.
    pub fn description(&self) -> &'static str {
        match self {
            FilterKind::Grayscale => "Convert image to grayscale",
            FilterKind::Sepia => "Apply classic sepia tone effect",
            FilterKind::Blur => "Blur the image",
            FilterKind::Contour => "Show image contours",
            FilterKind::Sharpen => "Sharpen the image",
            FilterKind::EdgeEnhance => "Enhance edges",
            FilterKind::Emboss => "Apply 3D emboss effect",
            FilterKind::FindEdges => "Detect and show edges",
            FilterKind::Brightness => "Adjust image brightness",
            FilterKind::Contrast => "Adjust image contrast",
            FilterKind::Saturation => "Adjust color saturation",
            FilterKind::Vintage => "Vintage photo effect",
            FilterKind::Negative => "Invert image colors",
            FilterKind::Solarize => "Partially invert colors",
            FilterKind::Posterize => "Reduce number of colors",
            FilterKind::Vignette => "Darken image corners",
            FilterKind::Sketch => "Sketch drawing effect",
            FilterKind::Watercolor => "Watercolor painting effect",
            FilterKind::OilPainting => "Oil painting effect",
        }
    }

    /// Listing category.
    pub fn category(&self) -> Category {
        match self {
            FilterKind::Grayscale
            | FilterKind::Sepia
            | FilterKind::Negative
            | FilterKind::Solarize
            | FilterKind::Posterize => Category::Color,
            FilterKind::Brightness | FilterKind::Contrast | FilterKind::Saturation => {
                Category::Adjust
            }
            FilterKind::Blur => Category::Blur,
            FilterKind::Sharpen => Category::Sharpen,
            FilterKind::Contour
            | FilterKind::EdgeEnhance
            | FilterKind::Emboss
            | FilterKind::FindEdges => Category::Edge,
            FilterKind::Vintage
            | FilterKind::Vignette
            | FilterKind::Sketch
            | FilterKind::Watercolor
            | FilterKind::OilPainting => Category::Stylize,
        }
    }

    /// How the filter reads its strength, or `None` when strength is ignored.
    pub fn strength_effect(&self) -> Option<&'static str> {
        match self {
            FilterKind::Sepia => Some("Blend ratio with the original below 1.0"),
            FilterKind::Blur => Some("Blur radius is strength x 2"),
            FilterKind::Sharpen => Some("Sharpness factor is 1.0 + strength"),
            FilterKind::Brightness => Some("Channel multiplier"),
            FilterKind::Contrast => Some("Contrast multiplier around the mean gray"),
            FilterKind::Saturation => Some("Color multiplier around per-pixel luminance"),
            FilterKind::Posterize => Some("Removes round(strength x 6) bits per channel"),
            FilterKind::Vignette => Some("Falloff multiplier from center to corners"),
            _ => None,
        }
    }

    /// Descriptive metadata for listings.
    pub fn info(&self) -> FilterInfo {
        FilterInfo {
            id: self.as_str().to_string(),
            name: self.display_name().to_string(),
            description: self.description().to_string(),
            category: self.category(),
            uses_strength: self.strength_effect().is_some(),
            strength_effect: self.strength_effect().map(str::to_string),
        }
    }

    /// Snake_case identifiers of every filter.
    pub fn valid_names() -> Vec<String> {
        Self::ALL.iter().map(|kind| kind.as_str().to_string()).collect()
    }

    /// Resolve an identifier, ignoring ASCII case and surrounding whitespace.
    pub fn parse(identifier: &str) -> Result<FilterKind, UnsupportedFilterError> {
        let wanted = identifier.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| UnsupportedFilterError {
                name: identifier.to_string(),
                valid: Self::valid_names(),
            })
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl AsRef<str> for FilterKind {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for FilterKind {
    type Err = UnsupportedFilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Metadata describing one filter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterInfo {
    /// Identifier accepted by the registry (e.g., "oil_painting")
    pub id: String,
    /// Human-readable name (e.g., "Oil Painting")
    pub name: String,
    /// Short description
    pub description: String,
    /// Listing category
    pub category: Category,
    /// Whether the strength parameter changes the output
    pub uses_strength: bool,
    /// How strength is interpreted, when it is used
    #[serde(skip_serializing_if = "Option::is_none")]
    pub strength_effect: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identifiers_round_trip() {
        for kind in FilterKind::ALL {
            assert_eq!(FilterKind::parse(kind.as_str()), Ok(kind));
        }
    }

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!("SEPIA".parse::<FilterKind>(), Ok(FilterKind::Sepia));
        assert_eq!("Edge_Enhance".parse::<FilterKind>(), Ok(FilterKind::EdgeEnhance));
        assert_eq!(" oil_painting ".parse::<FilterKind>(), Ok(FilterKind::OilPainting));
    }

    #[test]
    fn test_unknown_identifier() {
        let err = FilterKind::parse("not_a_filter").unwrap_err();
        assert_eq!(err.name, "not_a_filter");
        assert_eq!(err.valid.len(), 19);
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&FilterKind::FindEdges).unwrap();
        assert_eq!(json, "\"find_edges\"");
    }

    #[test]
    fn test_strength_usage() {
        let users: Vec<_> = FilterKind::ALL
            .iter()
            .filter(|kind| kind.info().uses_strength)
            .collect();
        assert_eq!(users.len(), 8);
        assert!(!FilterKind::Grayscale.info().uses_strength);
        assert!(FilterKind::Vignette.info().uses_strength);
    }
}
