//! Color remapping and tone adjustment filters.

use super::ops::{self, build_lut, map_channels};
use crate::core::kind::FilterKind;
use crate::filters::registry::FilterRegistry;
use image::RgbImage;

/// Dark end of the sepia duotone (#704214).
pub const SEPIA_DARK: [u8; 3] = [0x70, 0x42, 0x14];
/// Light end of the sepia duotone (#C0A080).
pub const SEPIA_LIGHT: [u8; 3] = [0xC0, 0xA0, 0x80];
/// Values at or above this level are inverted by solarize.
pub const SOLARIZE_THRESHOLD: u8 = 128;
/// Contrast factor applied after the vintage sepia tone.
pub const VINTAGE_CONTRAST: f32 = 0.8;

/// Register color filters.
pub fn register(registry: &mut FilterRegistry) {
    registry.register(FilterKind::Grayscale, grayscale);
    registry.register(FilterKind::Sepia, sepia);
    registry.register(FilterKind::Brightness, brightness);
    registry.register(FilterKind::Contrast, contrast);
    registry.register(FilterKind::Saturation, saturation);
    registry.register(FilterKind::Vintage, vintage);
    registry.register(FilterKind::Negative, negative);
    registry.register(FilterKind::Solarize, solarize);
    registry.register(FilterKind::Posterize, posterize);
}

/// Luminance-weighted grayscale, replicated across RGB. Strength is ignored.
pub fn grayscale(image: &RgbImage, _strength: f32) -> RgbImage {
    ops::grayscale(image)
}

fn sepia_tone(image: &RgbImage) -> RgbImage {
    ops::colorize(&ops::grayscale(image), SEPIA_DARK, SEPIA_LIGHT)
}

/// Sepia duotone. Below 1.0 the tone is blended with the original by `strength`.
pub fn sepia(image: &RgbImage, strength: f32) -> RgbImage {
    let toned = sepia_tone(image);
    if strength < 1.0 {
        ops::blend(image, &toned, strength)
    } else {
        toned
    }
}

/// Multiply every channel by `strength`.
pub fn brightness(image: &RgbImage, strength: f32) -> RgbImage {
    ops::blend_with_color([0, 0, 0], image, strength)
}

/// Scale each channel's distance from the image's mean gray by `strength`.
pub fn contrast(image: &RgbImage, strength: f32) -> RgbImage {
    let mean = ops::mean_luma(image);
    ops::blend_with_color([mean, mean, mean], image, strength)
}

/// Scale each channel's distance from the pixel's own luma by `strength`.
pub fn saturation(image: &RgbImage, strength: f32) -> RgbImage {
    ops::blend(&ops::grayscale(image), image, strength)
}

/// Full sepia tone followed by a fixed contrast reduction.
pub fn vintage(image: &RgbImage, _strength: f32) -> RgbImage {
    contrast(&sepia_tone(image), VINTAGE_CONTRAST)
}

/// `v -> 255 - v` on every channel.
pub fn negative(image: &RgbImage, _strength: f32) -> RgbImage {
    map_channels(image, &build_lut(|v| 255 - v))
}

/// Invert only the channels at or above [`SOLARIZE_THRESHOLD`].
pub fn solarize(image: &RgbImage, _strength: f32) -> RgbImage {
    map_channels(
        image,
        &build_lut(|v| if v >= SOLARIZE_THRESHOLD { 255 - v } else { v }),
    )
}

/// Bits kept per channel by [`posterize`]: `clamp(8 - round(strength * 6), 1, 8)`.
pub fn posterize_bits(strength: f32) -> u8 {
    let bits = 8.0 - (strength * 6.0).round();
    if bits.is_nan() {
        return 8;
    }
    bits.clamp(1.0, 8.0) as u8
}

/// Keep only the top [`posterize_bits`] bits of each channel.
pub fn posterize(image: &RgbImage, strength: f32) -> RgbImage {
    let mask = 0xFFu8 << (8 - posterize_bits(strength));
    map_channels(image, &build_lut(|v| v & mask))
}
