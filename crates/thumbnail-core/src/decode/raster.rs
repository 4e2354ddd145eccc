//! Raster image decoding (PNG, GIF, JPEG).

use std::io::Cursor;

use image::{ImageFormat, ImageReader};

use super::{DecodeError, DecodedImage};

/// Decode raster bytes using the decoder for `format` only.
///
/// The format is not guessed from the content: a `.png` upload holding JPEG
/// bytes is rejected. Animated GIFs yield their first frame.
///
/// # Errors
///
/// Returns `DecodeError::Malformed` with the decoder's reason if the bytes are
/// not a valid image of the given format.
pub fn decode_raster(bytes: &[u8], format: ImageFormat) -> Result<DecodedImage, DecodeError> {
    let mut reader = ImageReader::new(Cursor::new(bytes));
    reader.set_format(format);

    let img = reader
        .decode()
        .map_err(|e| DecodeError::Malformed(e.to_string()))?;

    Ok(DecodedImage::from_rgba_image(img.into_rgba8()))
}

pub fn decode_png(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    decode_raster(bytes, ImageFormat::Png)
}

pub fn decode_gif(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    decode_raster(bytes, ImageFormat::Gif)
}

pub fn decode_jpeg(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    decode_raster(bytes, ImageFormat::Jpeg)
}
