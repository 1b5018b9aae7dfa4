//! Decoding and encoding at the boundary.
//!
//! The filter engine only sees decoded [`Image`]s. This module turns files and
//! byte buffers into that shape and back, choosing the output encoding from
//! the original file extension: PNG and GIF inputs round-trip in their own
//! format, everything else is written as JPEG.

use crate::core::error::ChitraResult;
use crate::core::kind::FilterKind;
use crate::core::types::Image;
use serde::{Deserialize, Serialize};
use std::io::{Cursor, Write};
use std::path::Path;

/// Encodings the boundary writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Lossy JPEG, the default for anything not PNG or GIF.
    Jpeg,
    /// Lossless PNG.
    Png,
    /// Palette GIF.
    Gif,
}

impl OutputFormat {
    /// Pick the output format for a file extension (case-insensitive).
    pub fn from_extension(extension: &str) -> Self {
        match extension.to_ascii_lowercase().as_str() {
            "png" => OutputFormat::Png,
            "gif" => OutputFormat::Gif,
            _ => OutputFormat::Jpeg,
        }
    }

    /// Pick the output format from a path's extension.
    pub fn from_path(path: &Path) -> Self {
        Self::from_extension(extension_of(path))
    }

    /// File extension written for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
            OutputFormat::Gif => "gif",
        }
    }

    /// MIME type for response headers.
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "image/jpeg",
            OutputFormat::Png => "image/png",
            OutputFormat::Gif => "image/gif",
        }
    }

    fn image_format(&self) -> image::ImageFormat {
        match self {
            OutputFormat::Jpeg => image::ImageFormat::Jpeg,
            OutputFormat::Png => image::ImageFormat::Png,
            OutputFormat::Gif => image::ImageFormat::Gif,
        }
    }
}

fn extension_of(path: &Path) -> &str {
    path.extension().and_then(|e| e.to_str()).unwrap_or("")
}

/// Name for a filtered file: `filtered_sepia.png`, or
/// `filtered_sepia_beach.png` when the source file's stem is given.
pub fn output_file_name(filter: FilterKind, stem: Option<&str>, extension: &str) -> String {
    let extension = extension.to_ascii_lowercase();
    match stem {
        Some(stem) if !stem.is_empty() => format!("filtered_{}_{}.{}", filter, stem, extension),
        _ => format!("filtered_{}.{}", filter, extension),
    }
}

/// Name for the filtered copy of `input`, keeping its stem and picking the
/// extension of the format it will be written in.
pub fn output_file_name_for(filter: FilterKind, input: &Path) -> String {
    let stem = input.file_stem().map(|s| s.to_string_lossy());
    output_file_name(filter, stem.as_deref(), OutputFormat::from_path(input).extension())
}

/// Decode an image from memory, converting it to RGB.
pub fn decode_image(bytes: &[u8]) -> ChitraResult<Image> {
    let decoded = image::load_from_memory(bytes)?;
    log::debug!(
        "Decoded {}x{} image ({:?})",
        decoded.width(),
        decoded.height(),
        decoded.color()
    );
    Ok(Image::from_dynamic(&decoded)?)
}

/// Load an image file, converting it to RGB.
pub fn load_image(path: impl AsRef<Path>) -> ChitraResult<Image> {
    let path = path.as_ref();
    log::debug!("Loading {}", path.display());
    let decoded = image::open(path)?;
    Ok(Image::from_dynamic(&decoded)?)
}

/// Encode into `writer` using the given format.
pub fn write_image<W: Write>(
    image: &Image,
    format: OutputFormat,
    jpeg_quality: u8,
    writer: &mut W,
) -> ChitraResult<()> {
    match format {
        OutputFormat::Jpeg => {
            let rgb = image.as_rgb();
            let mut encoder =
                image::codecs::jpeg::JpegEncoder::new_with_quality(writer, jpeg_quality);
            encoder.encode(
                rgb.as_raw(),
                rgb.width(),
                rgb.height(),
                image::ExtendedColorType::Rgb8,
            )?;
        }
        OutputFormat::Png | OutputFormat::Gif => {
            // the PNG and GIF encoders need a seekable sink
            let mut buffer = Cursor::new(Vec::new());
            image
                .clone()
                .into_dynamic()
                .write_to(&mut buffer, format.image_format())?;
            writer.write_all(buffer.get_ref())?;
        }
    }
    Ok(())
}

/// Encode to an in-memory buffer.
pub fn encode_image(
    image: &Image,
    format: OutputFormat,
    jpeg_quality: u8,
) -> ChitraResult<Vec<u8>> {
    let mut bytes = Vec::new();
    write_image(image, format, jpeg_quality, &mut bytes)?;
    Ok(bytes)
}

/// Save to `path`, choosing the format from its extension.
pub fn save_image(
    image: &Image,
    path: impl AsRef<Path>,
    jpeg_quality: u8,
) -> ChitraResult<OutputFormat> {
    let path = path.as_ref();
    let format = OutputFormat::from_path(path);

    let mut file = std::io::BufWriter::new(std::fs::File::create(path)?);
    write_image(image, format, jpeg_quality, &mut file)?;
    file.flush()?;

    log::debug!("Wrote {} as {:?}", path.display(), format);
    Ok(format)
}
