//! Request orchestration: classify → decode → resize → encode.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

use crate::decode::{
    self, apply_resize, DecodeError, Dimensions, FfmpegExtractor, FrameExtractor,
    DEFAULT_FFMPEG_TIMEOUT,
};
use crate::encode::{self, EncodeError};
use crate::format::{classify, SourceFormat};
use crate::params::{EncodeSpec, Params, ResizeSpec};

/// Failure of one pipeline stage. Every failure is terminal for the request.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The filename extension does not select any decoder.
    #[error("Bad file type: {0}")]
    BadFileType(String),

    /// Decoding, frame extraction, rasterization or resizing failed.
    #[error("{0}")]
    Decode(#[from] DecodeError),

    /// The final image could not be serialized.
    #[error("{0}")]
    Encode(#[from] EncodeError),
}

/// An uploaded file plus the form fields that came with it.
#[derive(Debug, Clone, Default)]
pub struct UploadRequest {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub params: Params,
}

/// The encoded thumbnail and the dimensions before and after resizing.
#[derive(Debug, Clone)]
pub struct PipelineResult {
    pub bytes: Vec<u8>,
    pub content_type: &'static str,
    pub source_format: SourceFormat,
    pub source: Dimensions,
    pub destination: Dimensions,
}

/// Process-wide pipeline settings, fixed at startup.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Path or name of the ffmpeg binary.
    pub ffmpeg_path: String,
    /// Deadline for a single frame extraction.
    pub ffmpeg_timeout: Duration,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            ffmpeg_path: "ffmpeg".to_string(),
            ffmpeg_timeout: DEFAULT_FFMPEG_TIMEOUT,
        }
    }
}

/// Stateless image pipeline; cheap to clone and share across requests.
#[derive(Clone)]
pub struct Pipeline {
    extractor: Arc<dyn FrameExtractor>,
}

impl Pipeline {
    pub fn new(config: &PipelineConfig) -> Self {
        Self::with_extractor(Arc::new(FfmpegExtractor::new(
            config.ffmpeg_path.clone(),
            config.ffmpeg_timeout,
        )))
    }

    /// Use a custom frame extractor for WebM uploads.
    pub fn with_extractor(extractor: Arc<dyn FrameExtractor>) -> Self {
        Self { extractor }
    }

    /// Run the whole pipeline for one upload.
    ///
    /// Width and height come from the `w` and `h` fields, the algorithm from
    /// `interp` and the output format from `jpeg`; see [`crate::params`].
    pub fn run(&self, request: &UploadRequest) -> Result<PipelineResult, PipelineError> {
        let format = classify(&request.filename)?;
        let resize_spec = ResizeSpec::from_params(&request.params);
        let encode_spec = EncodeSpec::from_params(&request.params);

        let image = decode::decode(format, &request.bytes, self.extractor.as_ref())?;
        let source = image.dimensions();

        let image = apply_resize(image, &resize_spec)?;
        let destination = image.dimensions();

        let encoded = encode::encode(&image, encode_spec.format)?;

        Ok(PipelineResult {
            bytes: encoded.bytes,
            content_type: encoded.content_type,
            source_format: format,
            source,
            destination,
        })
    }
}

impl Default for Pipeline {
    fn default() -> Self {
        Self::new(&PipelineConfig::default())
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline").finish_non_exhaustive()
    }
}
