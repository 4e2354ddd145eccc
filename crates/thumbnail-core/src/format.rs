//! Upload classification by filename extension.

use crate::pipeline::PipelineError;

/// The decode strategy selected for an upload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceFormat {
    /// WebM clip; the first frame is extracted with ffmpeg.
    Webm,
    Png,
    /// GIF; only the first frame is used.
    Gif,
    Jpeg,
    /// SVG document, rasterized at its declared size.
    Svg,
}

impl SourceFormat {
    /// Map an extension (with the leading dot, as returned by [`extension`]) to a format.
    ///
    /// Matching is exact: `.PNG` is not recognized.
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext {
            ".webm" => Some(SourceFormat::Webm),
            ".png" => Some(SourceFormat::Png),
            ".gif" => Some(SourceFormat::Gif),
            ".jpg" | ".jpeg" => Some(SourceFormat::Jpeg),
            ".svg" => Some(SourceFormat::Svg),
            _ => None,
        }
    }

    /// Media type of the upload, as recorded in request logs.
    pub fn mime_type(self) -> &'static str {
        match self {
            SourceFormat::Webm => "video/webm",
            SourceFormat::Png => "image/png",
            SourceFormat::Gif => "image/gif",
            SourceFormat::Jpeg => "image/jpeg",
            SourceFormat::Svg => "image/svg+xml",
        }
    }
}

/// Return the extension of the last path segment of `filename`, including the dot.
///
/// Returns an empty string when the last segment has no dot. A bare `.png`
/// counts as having the extension `.png`.
pub fn extension(filename: &str) -> &str {
    let segment_start = filename.rfind('/').map_or(0, |i| i + 1);
    match filename[segment_start..].rfind('.') {
        Some(dot) => &filename[segment_start + dot..],
        None => "",
    }
}

/// Select the decode strategy for an uploaded file.
///
/// # Errors
///
/// Returns [`PipelineError::BadFileType`] carrying the filename when the
/// extension is not one of `.webm`, `.png`, `.gif`, `.jpg`, `.jpeg`, `.svg`.
pub fn classify(filename: &str) -> Result<SourceFormat, PipelineError> {
    SourceFormat::from_extension(extension(filename))
        .ok_or_else(|| PipelineError::BadFileType(filename.to_string()))
}
