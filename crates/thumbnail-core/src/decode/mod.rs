//! Decode adapters and the resize stage.
//!
//! This module provides functionality for:
//! - Decoding PNG, GIF and JPEG uploads
//! - Extracting a still frame from WebM clips through ffmpeg
//! - Rasterizing SVG documents
//! - Thumbnail resizing with a selectable interpolation algorithm
//!
//! # Architecture
//!
//! Every adapter has the same shape, bytes in and [`DecodedImage`] out, and
//! [`decode`] picks one with a `match` on the [`SourceFormat`]. All operations
//! are synchronous; the HTTP layer runs them on a blocking thread.
//!
//! # Examples
//!
//! ```ignore
//! use thumbnail_core::decode::{decode, FfmpegExtractor};
//! use thumbnail_core::format::SourceFormat;
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! let image = decode(SourceFormat::Jpeg, &bytes, &FfmpegExtractor::default()).unwrap();
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod raster;
mod resize;
mod svg;
mod types;
mod video;

pub use raster::{decode_gif, decode_jpeg, decode_png, decode_raster};
pub use resize::{apply_resize, resize, thumbnail, thumbnail_dimensions};
pub use svg::{decode_svg, SVG_DPI};
pub use types::{DecodeError, DecodedImage, Dimensions, Interpolation};
pub use video::{decode_video_frame, FfmpegExtractor, FrameExtractor, DEFAULT_FFMPEG_TIMEOUT};

use crate::format::SourceFormat;

/// Decode an upload with the adapter for `format`.
///
/// `extractor` is only consulted for [`SourceFormat::Webm`].
pub fn decode(
    format: SourceFormat,
    bytes: &[u8],
    extractor: &dyn FrameExtractor,
) -> Result<DecodedImage, DecodeError> {
    match format {
        SourceFormat::Webm => decode_video_frame(bytes, extractor),
        SourceFormat::Png => decode_png(bytes),
        SourceFormat::Gif => decode_gif(bytes),
        SourceFormat::Jpeg => decode_jpeg(bytes),
        SourceFormat::Svg => decode_svg(bytes),
    }
}
