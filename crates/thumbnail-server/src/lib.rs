//! Thumbnail Server - HTTP bindings for thumbnail-core
//!
//! This crate exposes the thumbnail pipeline over HTTP.
//!
//! # Routes
//!
//! - `POST /` - multipart upload with fields `file` (required), `w`, `h`,
//!   `interp` and `jpeg`; responds with the encoded thumbnail and the
//!   `SrcImage-Width`, `SrcImage-Height`, `DstImage-Width`, `DstImage-Height`
//!   headers
//! - `GET /form` - static HTML upload form
//!
//! Any other method on `/` gets `405 Method Not Allowed`. Pipeline work runs on
//! tokio's blocking pool so a slow ffmpeg does not stall other requests.

use axum::extract::DefaultBodyLimit;
use axum::routing::{any, get};
use axum::Router;
use thumbnail_core::Pipeline;

pub mod config;
pub mod error;
mod form;
mod handler;

pub use config::{Args, ServerConfig};
pub use error::HttpError;
pub use handler::{DST_HEIGHT_HEADER, DST_WIDTH_HEADER, SRC_HEIGHT_HEADER, SRC_WIDTH_HEADER};

/// Shared, immutable state handed to every request.
#[derive(Clone, Debug)]
pub struct AppState {
    pub pipeline: Pipeline,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            pipeline: Pipeline::new(&config.pipeline),
            max_upload_bytes: config.max_upload_bytes,
        }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    let body_limit = DefaultBodyLimit::max(state.max_upload_bytes);

    Router::new()
        .route("/", any(handler::thumbnail))
        .route("/form", get(form::form))
        .layer(body_limit)
        .with_state(state)
}
