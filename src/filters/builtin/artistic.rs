//! Composite looks: vignette, sketch, watercolor and oil painting.

use super::color;
use super::convolution;
use super::ops;
use crate::core::kind::FilterKind;
use crate::filters::registry::FilterRegistry;
use image::{Luma, Rgb, RgbImage};

/// Saturation boost applied after the watercolor blur.
pub const WATERCOLOR_SATURATION: f32 = 1.2;
/// Gaussian sigma of the watercolor blur.
pub const WATERCOLOR_BLUR: f32 = 1.0;
/// Neighborhood radius of the oil painting median (5x5 window).
pub const OIL_PAINTING_RADIUS: u32 = 2;

/// Register artistic filters.
pub fn register(registry: &mut FilterRegistry) {
    registry.register(FilterKind::Vignette, vignette);
    registry.register(FilterKind::Sketch, sketch);
    registry.register(FilterKind::Watercolor, watercolor);
    registry.register(FilterKind::OilPainting, oil_painting);
}

/// Geometry of the radial falloff for one image size.
#[derive(Debug, Clone, Copy)]
struct RadialFalloff {
    cx: f64,
    cy: f64,
    max_dist: f64,
    strength: f64,
}

impl RadialFalloff {
    fn new(width: u32, height: u32, strength: f32) -> Self {
        let cx = (width / 2) as f64;
        let cy = (height / 2) as f64;
        Self {
            cx,
            cy,
            max_dist: (cx * cx + cy * cy).sqrt(),
            strength: strength as f64,
        }
    }

    /// Attenuation in [0, 1] at `(x, y)`.
    fn factor(&self, x: u32, y: u32) -> f64 {
        if self.max_dist == 0.0 {
            return 1.0;
        }
        let dx = self.cx - x as f64;
        let dy = self.cy - y as f64;
        let dist = (dx * dx + dy * dy).sqrt();
        let factor = 1.0 - dist / self.max_dist * self.strength;
        if factor.is_nan() {
            return 1.0;
        }
        factor.clamp(0.0, 1.0)
    }
}

/// Vignette attenuation for pixel `(x, y)` of a `width` x `height` image.
///
/// The center is `(width / 2, height / 2)` in integer pixels, so that pixel
/// always gets 1.0.
pub fn vignette_factor(x: u32, y: u32, width: u32, height: u32, strength: f32) -> f32 {
    RadialFalloff::new(width, height, strength).factor(x, y) as f32
}

/// The grayscale gradient a vignette multiplies onto the image.
pub fn vignette_mask(width: u32, height: u32, strength: f32) -> image::GrayImage {
    let falloff = RadialFalloff::new(width, height, strength);
    let mut mask = image::GrayImage::new(width, height);
    for (y, row) in mask.enumerate_rows_mut() {
        for (x, _, pixel) in row {
            *pixel = Luma([(falloff.factor(x, y) * 255.0) as u8]);
        }
    }
    mask
}

/// Darken toward the corners by multiply-compositing a radial gradient.
pub fn vignette(image: &RgbImage, strength: f32) -> RgbImage {
    let (width, height) = image.dimensions();
    let mask = vignette_mask(width, height, strength);

    let mut result = image.clone();
    for (out, gray) in result.pixels_mut().zip(mask.pixels()) {
        let g = gray.0[0];
        let Rgb([r, gr, b]) = *out;
        *out = Rgb([
            ops::mul_div_255(r, g),
            ops::mul_div_255(gr, g),
            ops::mul_div_255(b, g),
        ]);
    }
    result
}

/// Contour outline collapsed to grayscale.
pub fn sketch(image: &RgbImage, strength: f32) -> RgbImage {
    ops::grayscale(&convolution::contour(image, strength))
}

/// Light blur followed by a saturation boost.
pub fn watercolor(image: &RgbImage, _strength: f32) -> RgbImage {
    let softened = convolution::gaussian_blur(image, WATERCOLOR_BLUR);
    color::saturation(&softened, WATERCOLOR_SATURATION)
}

/// Per-channel median over a 5x5 neighborhood.
pub fn oil_painting(image: &RgbImage, _strength: f32) -> RgbImage {
    imageproc::filter::median_filter(image, OIL_PAINTING_RADIUS, OIL_PAINTING_RADIUS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_center_factor_is_one() {
        for strength in [0.0, 0.5, 1.0, 2.0, 50.0] {
            assert_eq!(vignette_factor(5, 4, 10, 8, strength), 1.0);
            assert_eq!(vignette_factor(3, 3, 7, 7, strength), 1.0);
        }
    }

    #[test]
    fn test_corner_factor_decreases_with_strength() {
        let mut previous = f32::INFINITY;
        for step in 0..=20 {
            let strength = step as f32 * 0.1;
            let factor = vignette_factor(0, 0, 40, 30, strength);
            assert!(factor <= previous);
            previous = factor;
        }
        assert_eq!(vignette_factor(0, 0, 40, 30, 0.0), 1.0);
        assert_eq!(vignette_factor(0, 0, 40, 30, 1.0), 0.0);
    }

    #[test]
    fn test_factor_stays_in_unit_range() {
        for strength in [-10.0, -1.0, 3.0, 1.0e6, f32::NAN, f32::INFINITY] {
            for (x, y) in [(0, 0), (9, 9), (5, 5), (0, 9)] {
                let factor = vignette_factor(x, y, 10, 10, strength);
                assert!((0.0..=1.0).contains(&factor), "{factor} for {strength}");
            }
        }
    }

    #[test]
    fn test_single_pixel_image() {
        let image = RgbImage::from_pixel(1, 1, Rgb([9, 8, 7]));
        assert_eq!(vignette(&image, 2.0), image);
    }

    #[test]
    fn test_vignette_keeps_center_darkens_corner() {
        let image = RgbImage::from_pixel(21, 21, Rgb([200, 150, 100]));
        let result = vignette(&image, 1.0);
        assert_eq!(result.get_pixel(10, 10).0, [200, 150, 100]);
        assert_eq!(result.get_pixel(0, 0).0, [0, 0, 0]);
        let mid = result.get_pixel(5, 10).0;
        assert!(mid[0] < 200 && mid[0] > 0);
    }

    #[test]
    fn test_vignette_zero_strength_is_identity() {
        let image = RgbImage::from_fn(9, 6, |x, y| Rgb([x as u8 * 20, y as u8 * 30, 77]));
        assert_eq!(vignette(&image, 0.0), image);
    }

    #[test]
    fn test_sketch_is_gray() {
        let image = RgbImage::from_fn(8, 8, |x, y| Rgb([(x * 30) as u8, (y * 30) as u8, 90]));
        let drawn = sketch(&image, 1.0);
        assert!(drawn.pixels().all(|p| p[0] == p[1] && p[1] == p[2]));
    }

    #[test]
    fn test_oil_painting_removes_speckle() {
        let mut image = RgbImage::from_pixel(9, 9, Rgb([40, 40, 40]));
        image.put_pixel(4, 4, Rgb([255, 0, 255]));
        let painted = oil_painting(&image, 1.0);
        assert_eq!(painted.get_pixel(4, 4).0, [40, 40, 40]);
    }

    #[test]
    fn test_watercolor_preserves_flat_gray() {
        let flat = RgbImage::from_pixel(6, 6, Rgb([120, 120, 120]));
        let painted = watercolor(&flat, 0.0);
        assert_eq!(painted.dimensions(), flat.dimensions());
        assert!(painted
            .pixels()
            .all(|p| p[0] == p[1] && p[1] == p[2] && p[0].abs_diff(120) <= 1));
    }
}
