//! Built-in filter implementations.
//!
//! Every filter has the signature `fn(&RgbImage, f32) -> RgbImage`: it
//! borrows its input, returns a new buffer of the same size, and interprets
//! the strength in its own way (or ignores it).

mod artistic;
mod color;
mod convolution;
pub mod ops;

use crate::filters::registry::FilterRegistry;

/// Register all built-in filters.
pub fn register_all(registry: &mut FilterRegistry) {
    color::register(registry);
    convolution::register(registry);
    artistic::register(registry);
}

// Re-export for direct access
pub use artistic::{
    oil_painting, sketch, vignette, vignette_factor, vignette_mask, watercolor,
    OIL_PAINTING_RADIUS, WATERCOLOR_BLUR, WATERCOLOR_SATURATION,
};
pub use color::{
    brightness, contrast, grayscale, negative, posterize, posterize_bits, saturation, sepia,
    solarize, vintage, SEPIA_DARK, SEPIA_LIGHT, SOLARIZE_THRESHOLD, VINTAGE_CONTRAST,
};
pub use convolution::{
    blur, contour, edge_enhance, emboss, find_edges, gaussian_blur, sharpen, MAX_BLUR_SIGMA,
};
