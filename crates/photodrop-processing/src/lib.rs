//! Photodrop processing library
//!
//! Pre-upload image normalization: decode, proportional downscale and
//! re-encode, behind the injectable [`ImageCodec`] seam so the policy is
//! testable without a real raster surface.

pub mod codec;
pub mod downscale;

pub use codec::{BitmapCodec, CodecError, ImageCodec, OutputFormat};
pub use downscale::{downscale_if_needed, Downscaled, MAX_DIMENSION};

// Callers implementing [`ImageCodec`] need the raster type without taking
// their own dependency on the image crate.
pub use image::DynamicImage;
