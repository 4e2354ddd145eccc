//! Encode/negotiation stage.
//!
//! This module provides functionality for:
//! - Encoding RGBA pixel buffers to JPEG with configurable quality
//! - Encoding RGBA pixel buffers to PNG
//! - Choosing between the two from an [`EncodeSpec`](crate::params::EncodeSpec)
//!
//! # Examples
//!
//! ```ignore
//! use thumbnail_core::encode::{encode, OutputFormat};
//!
//! let encoded = encode(&image, OutputFormat::Jpeg { quality: 90 }).unwrap();
//! assert_eq!(encoded.content_type, "image/jpeg");
//! ```

mod jpeg;
mod png;

pub use jpeg::encode_jpeg;
pub use png::encode_png;

use thiserror::Error;

use crate::decode::DecodedImage;

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 4), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying encoder failed
    #[error("{format} encoding failed: {reason}")]
    EncodingFailed { format: &'static str, reason: String },
}

/// Format of the response body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// JPEG at the given quality (0-100; 0 is encoded as 1).
    Jpeg { quality: u8 },
    Png,
}

impl OutputFormat {
    pub fn content_type(self) -> &'static str {
        match self {
            OutputFormat::Jpeg { .. } => "image/jpeg",
            OutputFormat::Png => "image/png",
        }
    }
}

/// Encoded image bytes together with their content type.
#[derive(Debug, Clone)]
pub struct EncodedImage {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
}

/// Serialize `image` in the requested format.
pub fn encode(image: &DecodedImage, format: OutputFormat) -> Result<EncodedImage, EncodeError> {
    let bytes = match format {
        OutputFormat::Jpeg { quality } => {
            encode_jpeg(&image.pixels, image.width, image.height, quality)?
        }
        OutputFormat::Png => encode_png(&image.pixels, image.width, image.height)?,
    };
    Ok(EncodedImage {
        bytes,
        content_type: format.content_type(),
    })
}

/// Check that an RGBA buffer is non-empty and matches its dimensions.
fn validate_rgba(pixels: &[u8], width: u32, height: u32) -> Result<(), EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }

    let expected = (width as usize) * (height as usize) * 4;
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }
    Ok(())
}
