//! HTTP error responses.

use axum::http::{header, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use thiserror::Error;
use thumbnail_core::PipelineError;

/// Everything that can end a request without an image.
#[derive(Debug, Error)]
pub enum HttpError {
    #[error("Hint: use POST method")]
    MethodNotAllowed,

    /// The multipart body was unreadable or had no `file` field.
    #[error("Err: {0}")]
    BadRequest(String),

    #[error(transparent)]
    Pipeline(#[from] PipelineError),

    /// The blocking worker running the pipeline did not complete.
    #[error("Err: {0}")]
    Internal(String),
}

impl HttpError {
    pub fn status(&self) -> StatusCode {
        match self {
            HttpError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            HttpError::BadRequest(_) => StatusCode::BAD_REQUEST,
            HttpError::Pipeline(PipelineError::BadFileType(_)) => StatusCode::BAD_REQUEST,
            HttpError::Pipeline(_) | HttpError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Explanation written after the status line in the response body.
    pub fn message(&self) -> String {
        match self {
            HttpError::Pipeline(err @ PipelineError::BadFileType(_)) => err.to_string(),
            HttpError::Pipeline(PipelineError::Decode(err)) => format!("Convert Err: {err}"),
            HttpError::Pipeline(PipelineError::Encode(err)) => format!("Err: {err}"),
            other => other.to_string(),
        }
    }

    /// Record a failed request.
    pub fn log(&self, method: &Method, uri: &Uri) {
        let status = self.status();
        tracing::warn!(
            %method,
            status = status.as_u16(),
            %uri,
            status_text = status.canonical_reason().unwrap_or(""),
            error = %self,
            "request failed"
        );
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = format!(
            "{}\n\n{}",
            status.canonical_reason().unwrap_or(""),
            self.message()
        );
        (
            status,
            [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
            body,
        )
            .into_response()
    }
}
