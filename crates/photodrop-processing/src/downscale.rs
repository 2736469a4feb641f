//! Pre-upload downscale policy.
//!
//! Only declared PNG/JPEG files are touched. Images whose longer side fits
//! within [`MAX_DIMENSION`] pass through byte-identical; larger ones are
//! resized so the longer side is exactly [`MAX_DIMENSION`] and re-encoded.
//! A failure here is not fatal for an upload: the caller is expected to
//! fall back to the original bytes.

use crate::codec::{CodecError, ImageCodec, OutputFormat};

/// Longest permitted side, in pixels, before an image is downscaled.
pub const MAX_DIMENSION: u32 = 2500;

/// Outcome of running the policy against one file.
#[derive(Debug)]
pub enum Downscaled {
    /// Within bounds, or not a PNG/JPEG: the original bytes go up unchanged.
    Unchanged,
    /// Replacement bytes and filename for the upload.
    Resized {
        data: Vec<u8>,
        filename: String,
        width: u32,
        height: u32,
    },
}

pub fn downscale_if_needed<C: ImageCodec>(
    codec: &C,
    filename: &str,
    data: &[u8],
) -> Result<Downscaled, CodecError> {
    let Some(format) = output_format_for(filename) else {
        return Ok(Downscaled::Unchanged);
    };

    let image = codec.decode(data)?;
    let (width, height) = (image.width(), image.height());
    if width.max(height) <= MAX_DIMENSION {
        return Ok(Downscaled::Unchanged);
    }

    let (new_width, new_height) = scaled_dimensions(width, height, MAX_DIMENSION);
    let resized = codec.resize(&image, new_width, new_height);
    let data = codec.encode(&resized, format)?;

    tracing::debug!(
        from = format!("{width}x{height}"),
        to = format!("{new_width}x{new_height}"),
        "Image downscaled"
    );

    Ok(Downscaled::Resized {
        data,
        filename: swap_extension(filename, format),
        width: new_width,
        height: new_height,
    })
}

/// PNG stays PNG; JPEG stays JPEG; anything else is left alone entirely.
fn output_format_for(filename: &str) -> Option<OutputFormat> {
    let (_, ext) = filename.rsplit_once('.')?;
    match ext.to_ascii_lowercase().as_str() {
        "png" => Some(OutputFormat::Png),
        "jpg" | "jpeg" => Some(OutputFormat::Jpeg),
        _ => None,
    }
}

/// The longer side becomes exactly `max`; the other side is proportionally
/// rounded, never below 1.
fn scaled_dimensions(width: u32, height: u32, max: u32) -> (u32, u32) {
    if width >= height {
        let scaled = ((height as f64) * (max as f64) / (width as f64)).round() as u32;
        (max, scaled.max(1))
    } else {
        let scaled = ((width as f64) * (max as f64) / (height as f64)).round() as u32;
        (scaled.max(1), max)
    }
}

/// The output name keeps the stem and swaps the extension for the resolved
/// output format (`.png` stays `.png`, everything else becomes `.jpg`).
fn swap_extension(filename: &str, format: OutputFormat) -> String {
    let stem = filename.rsplit_once('.').map(|(s, _)| s).unwrap_or(filename);
    format!("{stem}.{}", format.extension())
}
