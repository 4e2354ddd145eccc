//! Thumbnail Core - image pipeline for the thumbnail service
//!
//! This crate turns an uploaded file into a thumbnail. The stages are:
//!
//! 1. [`format`] classifies the upload by filename extension.
//! 2. [`decode`] turns the bytes into an RGBA [`DecodedImage`], using ffmpeg
//!    for WebM clips and resvg for SVG documents.
//! 3. [`decode::apply_resize`] shrinks the image to fit the requested bounds.
//! 4. [`encode`] serializes the result as JPEG or PNG.
//!
//! [`Pipeline`] runs the stages in order for an [`UploadRequest`]. It has no
//! knowledge of HTTP; the server crate maps [`PipelineError`] onto status codes.

pub mod decode;
pub mod encode;
pub mod format;
pub mod params;
pub mod pipeline;

pub use decode::{DecodeError, DecodedImage, Dimensions, FfmpegExtractor, FrameExtractor, Interpolation};
pub use encode::{EncodeError, EncodedImage, OutputFormat};
pub use format::SourceFormat;
pub use params::{EncodeSpec, Params, ResizeSpec};
pub use pipeline::{Pipeline, PipelineConfig, PipelineError, PipelineResult, UploadRequest};
