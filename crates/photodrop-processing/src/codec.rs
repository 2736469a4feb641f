//! Image codec seam.

use std::io::Cursor;

use image::{DynamicImage, ImageFormat, ImageReader};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CodecError {
    #[error("Image decode failed: {0}")]
    Decode(String),

    #[error("Image encode failed: {0}")]
    Encode(String),
}

/// Re-encode target for a downscaled image.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Lossy, quality ~0.9.
    Jpeg,
    /// Lossless.
    Png,
}

impl OutputFormat {
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
        }
    }
}

/// Decode / resize / encode capability. The downscale pipeline only uses
/// this trait, so tests can substitute a fake and assert on the calls.
pub trait ImageCodec {
    fn decode(&self, data: &[u8]) -> Result<DynamicImage, CodecError>;

    fn resize(&self, image: &DynamicImage, width: u32, height: u32) -> DynamicImage;

    fn encode(&self, image: &DynamicImage, format: OutputFormat) -> Result<Vec<u8>, CodecError>;
}

/// Default codec backed by the `image` crate.
pub struct BitmapCodec {
    jpeg_quality: u8,
}

impl BitmapCodec {
    pub fn new() -> Self {
        Self { jpeg_quality: 90 }
    }
}

impl Default for BitmapCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl ImageCodec for BitmapCodec {
    fn decode(&self, data: &[u8]) -> Result<DynamicImage, CodecError> {
        ImageReader::new(Cursor::new(data))
            .with_guessed_format()
            .map_err(|e| CodecError::Decode(e.to_string()))?
            .decode()
            .map_err(|e| CodecError::Decode(e.to_string()))
    }

    fn resize(&self, image: &DynamicImage, width: u32, height: u32) -> DynamicImage {
        image.resize_exact(width, height, image::imageops::FilterType::Lanczos3)
    }

    fn encode(&self, image: &DynamicImage, format: OutputFormat) -> Result<Vec<u8>, CodecError> {
        let mut buffer = Vec::new();
        let mut cursor = Cursor::new(&mut buffer);
        match format {
            OutputFormat::Jpeg => {
                // JPEG has no alpha channel; flatten first.
                let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(
                    &mut cursor,
                    self.jpeg_quality,
                );
                image
                    .to_rgb8()
                    .write_with_encoder(encoder)
                    .map_err(|e| CodecError::Encode(e.to_string()))?;
            }
            OutputFormat::Png => {
                image
                    .write_to(&mut cursor, ImageFormat::Png)
                    .map_err(|e| CodecError::Encode(e.to_string()))?;
            }
        }
        Ok(buffer)
    }
}
