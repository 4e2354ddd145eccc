//! `POST /` thumbnail endpoint.

use axum::extract::multipart::MultipartRejection;
use axum::extract::{Multipart, Query, State};
use axum::http::header::{self, HeaderName};
use axum::http::{HeaderMap, HeaderValue, Method, Uri};
use axum::response::{IntoResponse, Response};
use thumbnail_core::{Params, PipelineResult, UploadRequest};

use crate::error::HttpError;
use crate::AppState;

/// Multipart field holding the upload.
pub const FILE_FIELD: &str = "file";

pub const SRC_WIDTH_HEADER: HeaderName = HeaderName::from_static("srcimage-width");
pub const SRC_HEIGHT_HEADER: HeaderName = HeaderName::from_static("srcimage-height");
pub const DST_WIDTH_HEADER: HeaderName = HeaderName::from_static("dstimage-width");
pub const DST_HEIGHT_HEADER: HeaderName = HeaderName::from_static("dstimage-height");

pub async fn thumbnail(
    State(state): State<AppState>,
    method: Method,
    uri: Uri,
    query: Option<Query<Params>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Response {
    let query = query.map(|Query(q)| q).unwrap_or_default();

    match handle(&state, &method, query, multipart).await {
        Ok(result) => {
            tracing::info!(
                %method,
                status = 200,
                %uri,
                source_type = result.source_format.mime_type(),
                src_width = result.source.width,
                src_height = result.source.height,
                dst_width = result.destination.width,
                dst_height = result.destination.height,
                content_type = result.content_type,
                bytes = result.bytes.len(),
                "thumbnail served"
            );
            image_response(result)
        }
        Err(err) => {
            err.log(&method, &uri);
            err.into_response()
        }
    }
}

async fn handle(
    state: &AppState,
    method: &Method,
    query: Params,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<PipelineResult, HttpError> {
    if *method != Method::POST {
        return Err(HttpError::MethodNotAllowed);
    }

    let multipart = multipart.map_err(|e| HttpError::BadRequest(e.to_string()))?;
    let request = read_upload(multipart, query).await?;

    let pipeline = state.pipeline.clone();
    let result = tokio::task::spawn_blocking(move || pipeline.run(&request))
        .await
        .map_err(|e| HttpError::Internal(e.to_string()))??;

    Ok(result)
}

/// Collect the `file` field and the text fields of a multipart body.
///
/// Form fields take precedence over query parameters of the same name, and
/// the first occurrence of a repeated field wins.
async fn read_upload(mut multipart: Multipart, query: Params) -> Result<UploadRequest, HttpError> {
    let mut file = None;
    let mut params = Params::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| HttpError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == FILE_FIELD {
            let filename = field.file_name().unwrap_or_default().to_string();
            let bytes = field
                .bytes()
                .await
                .map_err(|e| HttpError::BadRequest(e.to_string()))?;
            if file.is_none() {
                file = Some((filename, bytes.to_vec()));
            }
        } else {
            let value = field
                .text()
                .await
                .map_err(|e| HttpError::BadRequest(e.to_string()))?;
            params.entry(name).or_insert(value);
        }
    }

    let Some((filename, bytes)) = file else {
        return Err(HttpError::BadRequest("no such file".to_string()));
    };

    for (key, value) in query {
        params.entry(key).or_insert(value);
    }

    Ok(UploadRequest {
        bytes,
        filename,
        params,
    })
}

fn image_response(result: PipelineResult) -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(result.content_type));
    headers.insert(SRC_WIDTH_HEADER, HeaderValue::from(result.source.width));
    headers.insert(SRC_HEIGHT_HEADER, HeaderValue::from(result.source.height));
    headers.insert(DST_WIDTH_HEADER, HeaderValue::from(result.destination.width));
    headers.insert(DST_HEIGHT_HEADER, HeaderValue::from(result.destination.height));

    (headers, result.bytes).into_response()
}
