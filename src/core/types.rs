//! Core value types handed to and returned from the filter engine.
//!
//! An [`Image`] is always a non-empty RGB8 buffer. Constructors validate that
//! invariant once so filter functions never need to.

use crate::core::error::{ProcessingError, ValidationError};
use image::{DynamicImage, RgbImage};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Image size in pixels.
///
/// # Examples
///
/// ```
/// use chitra::core::types::ImageSize;
///
/// let size = ImageSize { width: 10, height: 20 };
/// assert_eq!(size.area(), 200);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageSize {
    /// Width of the image in pixels
    pub width: u32,
    /// Height of the image in pixels
    pub height: u32,
}

impl ImageSize {
    /// Number of pixels.
    pub fn area(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl fmt::Display for ImageSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// A decoded RGB image.
///
/// Filters borrow an `Image` and return a new one; the input is never
/// modified in place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    buffer: RgbImage,
}

impl Image {
    /// Build an image from an interleaved RGB8 buffer of `width * height * 3` bytes.
    pub fn new(width: u32, height: u32, data: Vec<u8>) -> Result<Self, ProcessingError> {
        ensure_not_empty(width, height)?;

        let expected = width as usize * height as usize * 3;
        if data.len() != expected {
            return Err(ProcessingError::BufferSizeMismatch {
                expected,
                actual: data.len(),
            });
        }

        RgbImage::from_raw(width, height, data)
            .map(|buffer| Self { buffer })
            .ok_or_else(|| ProcessingError::Other("Failed to wrap pixel buffer".to_string()))
    }

    /// Wrap an existing RGB buffer.
    pub fn from_rgb(buffer: RgbImage) -> Result<Self, ProcessingError> {
        ensure_not_empty(buffer.width(), buffer.height())?;
        Ok(Self { buffer })
    }

    /// Convert any decoded image into RGB8, dropping alpha.
    pub fn from_dynamic(image: &DynamicImage) -> Result<Self, ProcessingError> {
        Self::from_rgb(image.to_rgb8())
    }

    /// A solid image of one color.
    pub fn filled(width: u32, height: u32, color: [u8; 3]) -> Result<Self, ProcessingError> {
        ensure_not_empty(width, height)?;
        Ok(Self {
            buffer: RgbImage::from_pixel(width, height, image::Rgb(color)),
        })
    }

    /// Filter outputs reuse the input dimensions, which were validated on entry.
    pub(crate) fn from_filter_output(buffer: RgbImage) -> Self {
        debug_assert!(buffer.width() > 0 && buffer.height() > 0);
        Self { buffer }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.buffer.width()
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.buffer.height()
    }

    /// Width and height together.
    pub fn size(&self) -> ImageSize {
        ImageSize {
            width: self.width(),
            height: self.height(),
        }
    }

    /// RGB triple at `(x, y)`. Panics when out of bounds, like `ImageBuffer::get_pixel`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 3] {
        self.buffer.get_pixel(x, y).0
    }

    /// Borrow the underlying buffer.
    pub fn as_rgb(&self) -> &RgbImage {
        &self.buffer
    }

    /// Interleaved RGB bytes, row-major.
    pub fn as_raw(&self) -> &[u8] {
        self.buffer.as_raw()
    }

    /// Take the underlying buffer.
    pub fn into_rgb(self) -> RgbImage {
        self.buffer
    }

    /// Convert into a `DynamicImage` for encoding.
    pub fn into_dynamic(self) -> DynamicImage {
        DynamicImage::ImageRgb8(self.buffer)
    }
}

fn ensure_not_empty(width: u32, height: u32) -> Result<(), ProcessingError> {
    if width == 0 || height == 0 {
        return Err(ProcessingError::EmptyImage { width, height });
    }
    Ok(())
}

/// Filter intensity as accepted at the boundary.
///
/// The engine itself takes a bare `f32` and tolerates any value; `Strength`
/// is what request handlers use to reject out-of-range input up front.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f32", into = "f32")]
pub struct Strength(f32);

impl Strength {
    /// Lowest accepted strength.
    pub const MIN: f32 = 0.0;
    /// Highest accepted strength.
    pub const MAX: f32 = 2.0;
    /// Strength used when the caller gives none.
    pub const DEFAULT: Strength = Strength(1.0);

    /// Validate a raw strength value.
    pub fn new(value: f32) -> Result<Self, ValidationError> {
        if !value.is_finite() {
            return Err(ValidationError::NonFiniteStrength);
        }
        if !(Self::MIN..=Self::MAX).contains(&value) {
            return Err(ValidationError::StrengthOutOfRange {
                value,
                min: Self::MIN,
                max: Self::MAX,
            });
        }
        Ok(Self(value))
    }

    /// The raw value.
    pub fn value(self) -> f32 {
        self.0
    }
}

impl Default for Strength {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<f32> for Strength {
    type Error = ValidationError;

    fn try_from(value: f32) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Strength> for f32 {
    fn from(strength: Strength) -> Self {
        strength.0
    }
}

impl fmt::Display for Strength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}
