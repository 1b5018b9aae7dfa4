//! Convolution-based filters: blur, sharpen and the fixed edge kernels.

use super::ops::{self, convolve3x3, Kernel3};
use crate::core::kind::FilterKind;
use crate::filters::registry::FilterRegistry;
use image::RgbImage;

/// Upper bound on the Gaussian sigma; keeps kernel allocation finite for
/// absurd strengths. Well above anything the [0, 2] strength range produces.
pub const MAX_BLUR_SIGMA: f32 = 256.0;

/// Register convolution filters.
pub fn register(registry: &mut FilterRegistry) {
    registry.register(FilterKind::Blur, blur);
    registry.register(FilterKind::Contour, contour);
    registry.register(FilterKind::Sharpen, sharpen);
    registry.register(FilterKind::EdgeEnhance, edge_enhance);
    registry.register(FilterKind::Emboss, emboss);
    registry.register(FilterKind::FindEdges, find_edges);
}

/// Gaussian blur with the given sigma. Non-positive or NaN sigma returns a copy.
pub fn gaussian_blur(image: &RgbImage, sigma: f32) -> RgbImage {
    if !(sigma > 0.0) {
        return image.clone();
    }
    imageproc::filter::gaussian_blur_f32(image, sigma.min(MAX_BLUR_SIGMA))
}

/// Gaussian blur with radius `strength * 2`.
pub fn blur(image: &RgbImage, strength: f32) -> RgbImage {
    gaussian_blur(image, strength * 2.0)
}

/// Outline-only rendering.
pub fn contour(image: &RgbImage, _strength: f32) -> RgbImage {
    convolve3x3(image, &Kernel3::CONTOUR)
}

/// Push the image away from its smoothed version by `1 + strength`.
pub fn sharpen(image: &RgbImage, strength: f32) -> RgbImage {
    let smoothed = convolve3x3(image, &Kernel3::SMOOTH);
    ops::blend(&smoothed, image, 1.0 + strength)
}

/// Fixed strong edge enhancement.
pub fn edge_enhance(image: &RgbImage, _strength: f32) -> RgbImage {
    convolve3x3(image, &Kernel3::EDGE_ENHANCE_MORE)
}

/// Fixed emboss relief.
pub fn emboss(image: &RgbImage, _strength: f32) -> RgbImage {
    convolve3x3(image, &Kernel3::EMBOSS)
}

/// Fixed Laplacian edge detection.
pub fn find_edges(image: &RgbImage, _strength: f32) -> RgbImage {
    convolve3x3(image, &Kernel3::FIND_EDGES)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;

    fn square(size: u32) -> RgbImage {
        let lo = size / 3;
        let hi = size - lo;
        RgbImage::from_fn(size, size, |x, y| {
            if (lo..hi).contains(&x) && (lo..hi).contains(&y) {
                Rgb([220, 220, 220])
            } else {
                Rgb([30, 30, 30])
            }
        })
    }

    fn variance(image: &RgbImage) -> f64 {
        let n = image.len() as f64;
        let mean = image.iter().map(|&v| v as f64).sum::<f64>() / n;
        image.iter().map(|&v| (v as f64 - mean).powi(2)).sum::<f64>() / n
    }

    #[test]
    fn test_blur_zero_strength_is_identity() {
        let image = square(12);
        assert_eq!(blur(&image, 0.0), image);
        assert_eq!(blur(&image, -1.0), image);
        assert_eq!(blur(&image, f32::NAN), image);
    }

    #[test]
    fn test_blur_reduces_variance() {
        let image = square(16);
        let blurred = blur(&image, 1.0);
        assert_eq!(blurred.dimensions(), image.dimensions());
        assert!(variance(&blurred) < variance(&image));
    }

    #[test]
    fn test_blur_huge_strength_is_bounded() {
        let image = square(9);
        let blurred = blur(&image, 1.0e9);
        assert_eq!(blurred.dimensions(), (9, 9));
    }

    #[test]
    fn test_sharpen_increases_variance() {
        let image = square(16);
        assert!(variance(&sharpen(&image, 1.0)) >= variance(&image));
    }

    #[test]
    fn test_sharpen_flat_image_unchanged() {
        let flat = RgbImage::from_pixel(8, 8, Rgb([77, 88, 99]));
        assert_eq!(sharpen(&flat, 2.0), flat);
    }

    #[test]
    fn test_find_edges_marks_boundary() {
        let edges = find_edges(&square(12), 1.0);
        // interior of the bright square and of the background are flat
        assert_eq!(edges.get_pixel(6, 6).0, [0, 0, 0]);
        assert_eq!(edges.get_pixel(1, 1).0, [0, 0, 0]);
        // the square's corner sits on an edge
        assert_eq!(edges.get_pixel(4, 4).0, [255, 255, 255]);
    }

    #[test]
    fn test_contour_background_is_white() {
        let outlined = contour(&square(12), 1.0);
        assert_eq!(outlined.get_pixel(6, 6).0, [255, 255, 255]);
        assert!(outlined.get_pixel(3, 4)[0] < 255);
    }

    #[test]
    fn test_edge_enhance_impulse() {
        let mut image = RgbImage::from_pixel(5, 5, Rgb([100, 100, 100]));
        image.put_pixel(2, 2, Rgb([110, 110, 110]));
        let enhanced = edge_enhance(&image, 1.0);
        // 9 * 110 - 8 * 100
        assert_eq!(enhanced.get_pixel(2, 2).0, [190, 190, 190]);
        // 9 * 100 - 7 * 100 - 110
        assert_eq!(enhanced.get_pixel(2, 1).0, [90, 90, 90]);
        assert_eq!(enhanced.get_pixel(1, 1).0, [90, 90, 90]);
        assert_eq!(enhanced.get_pixel(0, 2).0, [100, 100, 100]);
    }

    #[test]
    fn test_emboss_flat_is_mid_gray() {
        let flat = RgbImage::from_pixel(5, 5, Rgb([10, 200, 90]));
        assert_eq!(emboss(&flat, 1.0).get_pixel(2, 2).0, [128, 128, 128]);
    }
}
