//! Pixel primitives shared by the built-in filters.
//!
//! Everything here works on `image::RgbImage` and returns a fresh buffer of
//! the same dimensions. Channel arithmetic is done in `f32` and clamped back
//! into `u8` range, never wrapped.

use image::{Rgb, RgbImage};

/// ITU-R 601-2 luma, in 16.16 fixed point with rounding.
#[inline]
pub fn luma(pixel: &Rgb<u8>) -> u8 {
    let [r, g, b] = pixel.0;
    ((r as u32 * 19595 + g as u32 * 38470 + b as u32 * 7471 + 0x8000) >> 16) as u8
}

/// Clamp a computed channel value into `u8`, truncating the fraction.
///
/// NaN maps to 0.
#[inline]
pub fn clamp_channel(value: f32) -> u8 {
    if value >= 255.0 {
        255
    } else if value > 0.0 {
        value as u8
    } else {
        0
    }
}

/// `(a * b) / 255` with rounding.
#[inline]
pub fn mul_div_255(a: u8, b: u8) -> u8 {
    let t = a as u32 * b as u32 + 128;
    (((t >> 8) + t) >> 8) as u8
}

/// Apply one lookup table to every channel.
pub fn map_channels(image: &RgbImage, lut: &[u8; 256]) -> RgbImage {
    let mut result = image.clone();
    for value in result.iter_mut() {
        *value = lut[*value as usize];
    }
    result
}

/// Build a lookup table from a per-value function.
pub fn build_lut(f: impl Fn(u8) -> u8) -> [u8; 256] {
    let mut lut = [0u8; 256];
    for (i, slot) in lut.iter_mut().enumerate() {
        *slot = f(i as u8);
    }
    lut
}

/// Collapse to luma and replicate it across all three channels.
pub fn grayscale(image: &RgbImage) -> RgbImage {
    let mut result = image.clone();
    for pixel in result.pixels_mut() {
        let l = luma(pixel);
        *pixel = Rgb([l, l, l]);
    }
    result
}

/// Linear interpolation `a + alpha * (b - a)` per channel.
///
/// `alpha` outside [0, 1] extrapolates; results are clamped.
pub fn blend(a: &RgbImage, b: &RgbImage, alpha: f32) -> RgbImage {
    debug_assert_eq!(a.dimensions(), b.dimensions());

    let mut result = a.clone();
    for (out, &other) in result.iter_mut().zip(b.iter()) {
        let base = *out as f32;
        *out = clamp_channel(base + alpha * (other as f32 - base));
    }
    result
}

/// Blend against a single solid color instead of a second image.
pub fn blend_with_color(color: [u8; 3], image: &RgbImage, alpha: f32) -> RgbImage {
    let mut result = image.clone();
    for pixel in result.pixels_mut() {
        for (channel, &base) in pixel.0.iter_mut().zip(color.iter()) {
            let base = base as f32;
            *channel = clamp_channel(base + alpha * (*channel as f32 - base));
        }
    }
    result
}

/// Map a grayscale image onto a two-color gradient from `dark` to `light`.
///
/// Only the first channel of `gray` is read.
pub fn colorize(gray: &RgbImage, dark: [u8; 3], light: [u8; 3]) -> RgbImage {
    let ramp = |c: usize| -> [u8; 256] {
        let (lo, hi) = (dark[c] as i32, light[c] as i32);
        build_lut(|i| (lo + (i as i32 * (hi - lo)).div_euclid(255)).clamp(0, 255) as u8)
    };
    let (red, green, blue) = (ramp(0), ramp(1), ramp(2));

    let mut result = gray.clone();
    for pixel in result.pixels_mut() {
        let l = pixel.0[0] as usize;
        *pixel = Rgb([red[l], green[l], blue[l]]);
    }
    result
}

/// Per-channel multiply compositing.
pub fn multiply(a: &RgbImage, b: &RgbImage) -> RgbImage {
    debug_assert_eq!(a.dimensions(), b.dimensions());

    let mut result = a.clone();
    for (out, &other) in result.iter_mut().zip(b.iter()) {
        *out = mul_div_255(*out, other);
    }
    result
}

/// Mean luma of the whole image, rounded to the nearest level.
pub fn mean_luma(image: &RgbImage) -> u8 {
    let count = image.width() as u64 * image.height() as u64;
    if count == 0 {
        return 0;
    }
    let total: u64 = image.pixels().map(|p| luma(p) as u64).sum();
    ((total as f64 / count as f64) + 0.5) as u8
}

/// A 3x3 convolution kernel with a divisor and an offset.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Kernel3 {
    /// Row-major weights.
    pub weights: [f32; 9],
    /// Divisor applied to the weighted sum.
    pub scale: f32,
    /// Added after scaling.
    pub offset: f32,
}

impl Kernel3 {
    /// Smoothing kernel used as the degenerate image for sharpening.
    pub const SMOOTH: Kernel3 = Kernel3 {
        weights: [1.0, 1.0, 1.0, 1.0, 5.0, 1.0, 1.0, 1.0, 1.0],
        scale: 13.0,
        offset: 0.0,
    };

    /// Outline-only rendering on a white background.
    pub const CONTOUR: Kernel3 = Kernel3 {
        weights: [-1.0, -1.0, -1.0, -1.0, 8.0, -1.0, -1.0, -1.0, -1.0],
        scale: 1.0,
        offset: 255.0,
    };

    /// Strong edge enhancement.
    pub const EDGE_ENHANCE_MORE: Kernel3 = Kernel3 {
        weights: [-1.0, -1.0, -1.0, -1.0, 9.0, -1.0, -1.0, -1.0, -1.0],
        scale: 1.0,
        offset: 0.0,
    };

    /// Relief effect around mid-gray.
    pub const EMBOSS: Kernel3 = Kernel3 {
        weights: [-1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 0.0],
        scale: 1.0,
        offset: 128.0,
    };

    /// Laplacian edge detection on black.
    pub const FIND_EDGES: Kernel3 = Kernel3 {
        weights: [-1.0, -1.0, -1.0, -1.0, 8.0, -1.0, -1.0, -1.0, -1.0],
        scale: 1.0,
        offset: 0.0,
    };
}

/// Convolve every interior pixel with `kernel`; the one-pixel border is copied.
///
/// The first kernel row weighs the row below the pixel and the last row the
/// row above it, so asymmetric kernels (emboss) light from the upper left.
pub fn convolve3x3(image: &RgbImage, kernel: &Kernel3) -> RgbImage {
    let (width, height) = image.dimensions();
    let mut result = image.clone();
    if width < 3 || height < 3 {
        return result;
    }

    for y in 1..height - 1 {
        for x in 1..width - 1 {
            let mut sums = [0.0f32; 3];
            for row in 0..3u32 {
                // row 0 -> y + 1, row 2 -> y - 1
                let sy = y + 1 - row;
                for col in 0..3u32 {
                    let weight = kernel.weights[(row * 3 + col) as usize];
                    if weight == 0.0 {
                        continue;
                    }
                    let source = image.get_pixel(x + col - 1, sy);
                    for (sum, &value) in sums.iter_mut().zip(source.0.iter()) {
                        *sum += weight * value as f32;
                    }
                }
            }

            let out = result.get_pixel_mut(x, y);
            for (channel, sum) in out.0.iter_mut().zip(sums) {
                *channel = clamp_channel((sum / kernel.scale + kernel.offset).round());
            }
        }
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker(width: u32, height: u32) -> RgbImage {
        RgbImage::from_fn(width, height, |x, y| {
            if (x + y) % 2 == 0 {
                Rgb([200, 100, 50])
            } else {
                Rgb([10, 20, 30])
            }
        })
    }

    #[test]
    fn test_luma_extremes() {
        assert_eq!(luma(&Rgb([0, 0, 0])), 0);
        assert_eq!(luma(&Rgb([255, 255, 255])), 255);
        assert_eq!(luma(&Rgb([255, 0, 0])), 76);
        assert_eq!(luma(&Rgb([0, 255, 0])), 150);
        assert_eq!(luma(&Rgb([0, 0, 255])), 29);
    }

    #[test]
    fn test_clamp_channel() {
        assert_eq!(clamp_channel(-3.0), 0);
        assert_eq!(clamp_channel(12.9), 12);
        assert_eq!(clamp_channel(400.0), 255);
        assert_eq!(clamp_channel(f32::NAN), 0);
        assert_eq!(clamp_channel(f32::INFINITY), 255);
    }

    #[test]
    fn test_mul_div_255() {
        assert_eq!(mul_div_255(255, 255), 255);
        assert_eq!(mul_div_255(200, 0), 0);
        assert_eq!(mul_div_255(200, 255), 200);
        assert_eq!(mul_div_255(128, 128), 64);
    }

    #[test]
    fn test_blend_endpoints() {
        let a = checker(4, 4);
        let b = RgbImage::from_pixel(4, 4, Rgb([255, 255, 255]));
        assert_eq!(blend(&a, &b, 0.0), a);
        assert_eq!(blend(&a, &b, 1.0), b);
        // extrapolation saturates instead of wrapping
        let far = blend(&a, &b, 5.0);
        assert!(far.iter().all(|&v| v == 255));
    }

    #[test]
    fn test_colorize_endpoints() {
        let gray = RgbImage::from_fn(2, 1, |x, _| if x == 0 { Rgb([0; 3]) } else { Rgb([255; 3]) });
        let toned = colorize(&gray, [0x70, 0x42, 0x14], [0xC0, 0xA0, 0x80]);
        assert_eq!(toned.get_pixel(0, 0).0, [0x70, 0x42, 0x14]);
        assert_eq!(toned.get_pixel(1, 0).0, [0xC0, 0xA0, 0x80]);
    }

    #[test]
    fn test_convolve_flat_image() {
        let flat = RgbImage::from_pixel(5, 5, Rgb([90, 90, 90]));
        assert_eq!(convolve3x3(&flat, &Kernel3::SMOOTH), flat);

        let edges = convolve3x3(&flat, &Kernel3::FIND_EDGES);
        assert_eq!(edges.get_pixel(2, 2).0, [0, 0, 0]);
        // border is copied from the source
        assert_eq!(edges.get_pixel(0, 0).0, [90, 90, 90]);

        let contour = convolve3x3(&flat, &Kernel3::CONTOUR);
        assert_eq!(contour.get_pixel(2, 2).0, [255, 255, 255]);

        let relief = convolve3x3(&flat, &Kernel3::EMBOSS);
        assert_eq!(relief.get_pixel(2, 2).0, [128, 128, 128]);
    }

    #[test]
    fn test_convolve_tiny_image_is_copy() {
        let tiny = checker(2, 7);
        assert_eq!(convolve3x3(&tiny, &Kernel3::EDGE_ENHANCE_MORE), tiny);
    }

    #[test]
    fn test_mean_luma() {
        let flat = RgbImage::from_pixel(3, 3, Rgb([73, 109, 137]));
        assert_eq!(mean_luma(&flat), luma(&Rgb([73, 109, 137])));
    }
}
