//! SVG rasterization via resvg.

use resvg::tiny_skia::{Pixmap, Transform};
use resvg::usvg::{Options, Tree};

use super::{DecodeError, DecodedImage};

/// Resolution used to resolve physical units (`in`, `mm`, `pt`) in the markup.
pub const SVG_DPI: f32 = 96.0;

/// Largest width or height a document may declare.
pub const MAX_SVG_DIMENSION: u32 = 16_384;

/// Largest pixel count a document may declare (256 MiB of RGBA).
pub const MAX_SVG_PIXELS: u64 = 64 * 1024 * 1024;

/// Parse SVG markup and rasterize it at the document's declared size.
///
/// # Errors
///
/// Returns `DecodeError::SvgParse` if the markup does not yield a scene, or
/// `DecodeError::RasterizerInit` if the document size exceeds the decode
/// limits or no pixmap can be allocated for it.
pub fn decode_svg(bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
    let options = Options {
        dpi: SVG_DPI,
        ..Options::default()
    };
    let tree = Tree::from_data(bytes, &options).map_err(|e| DecodeError::SvgParse(e.to_string()))?;

    let size = tree.size();
    let width = size.width().ceil() as u32;
    let height = size.height().ceil() as u32;
    enforce_decode_limits(width, height)?;

    let mut pixmap =
        Pixmap::new(width, height).ok_or(DecodeError::RasterizerInit { width, height })?;
    resvg::render(&tree, Transform::identity(), &mut pixmap.as_mut());

    let pixels = pixmap
        .pixels()
        .iter()
        .flat_map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
        .collect();

    Ok(DecodedImage::new(width, height, pixels))
}

/// Reject sizes whose pixmap would be too large to allocate safely.
fn enforce_decode_limits(width: u32, height: u32) -> Result<(), DecodeError> {
    if width > MAX_SVG_DIMENSION
        || height > MAX_SVG_DIMENSION
        || u64::from(width) * u64::from(height) > MAX_SVG_PIXELS
    {
        tracing::debug!(width, height, "svg exceeds decode limits");
        return Err(DecodeError::RasterizerInit { width, height });
    }
    Ok(())
}
