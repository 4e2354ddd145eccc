//! Core types for image decoding and resizing.

use std::time::Duration;
use thiserror::Error;

/// Error types for the decode adapters and the resize stage.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The bytes are not a valid image of the declared format.
    #[error("{0}")]
    Malformed(String),

    /// I/O error while talking to the frame extraction process.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// ffmpeg exited abnormally and wrote diagnostics to stderr.
    /// The message is the captured stderr, verbatim.
    #[error("{0}")]
    Ffmpeg(String),

    /// ffmpeg exited abnormally without any diagnostics.
    #[error("frame extraction failed: {0}")]
    ProcessFailed(String),

    /// ffmpeg did not finish before the deadline and was killed.
    #[error("frame extraction timed out after {0:?}")]
    ProcessTimeout(Duration),

    /// The SVG markup could not be parsed into a scene.
    #[error("Could not open SVG image: {0}")]
    SvgParse(String),

    /// No pixmap could be allocated for the SVG document.
    #[error("Could not init rasterizer for {width}x{height} image")]
    RasterizerInit { width: u32, height: u32 },

    /// The resampler rejected the buffers it was given.
    #[error("resize failed: {0}")]
    Resize(String),
}

/// Interpolation algorithm used by the resize stage.
///
/// Names follow the selector values accepted in the `interp` form field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interpolation {
    /// Nearest neighbor (fastest, blocky).
    #[default]
    NearestNeighbor,
    /// Bilinear (triangle) filter.
    Bilinear,
    /// Bicubic (Catmull-Rom) filter.
    Bicubic,
    /// Mitchell-Netravali cubic filter.
    MitchellNetravali,
    /// Lanczos windowed sinc with a = 2.
    Lanczos2,
    /// Lanczos windowed sinc with a = 3.
    Lanczos3,
}

impl Interpolation {
    /// Every supported algorithm, in declaration order.
    pub const ALL: [Interpolation; 6] = [
        Interpolation::NearestNeighbor,
        Interpolation::Bilinear,
        Interpolation::Bicubic,
        Interpolation::MitchellNetravali,
        Interpolation::Lanczos2,
        Interpolation::Lanczos3,
    ];

    /// Look up an algorithm by name, ignoring ASCII case.
    ///
    /// Returns `None` for names that are not in the supported set, including
    /// the empty string. Defaulting an empty selector is the caller's job.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|interp| interp.name().eq_ignore_ascii_case(name))
    }

    /// Canonical selector name.
    pub fn name(self) -> &'static str {
        match self {
            Interpolation::NearestNeighbor => "NearestNeighbor",
            Interpolation::Bilinear => "Bilinear",
            Interpolation::Bicubic => "Bicubic",
            Interpolation::MitchellNetravali => "MitchellNetravali",
            Interpolation::Lanczos2 => "Lanczos2",
            Interpolation::Lanczos3 => "Lanczos3",
        }
    }
}

/// Width and height of an image in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// A decoded image with RGBA pixel data.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGBA pixel data in row-major order (4 bytes per pixel, straight alpha).
    /// Length should be width * height * 4.
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    /// Create a new DecodedImage with the given dimensions and pixel data.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * 4,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Create a DecodedImage from an image::RgbaImage.
    pub fn from_rgba_image(img: image::RgbaImage) -> Self {
        let (width, height) = img.dimensions();
        let pixels = img.into_raw();
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn dimensions(&self) -> Dimensions {
        Dimensions {
            width: self.width,
            height: self.height,
        }
    }
}
