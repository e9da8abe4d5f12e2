//! Axum REST API handlers

use std::sync::Arc;

use axum::{
    Router,
    extract::multipart::MultipartRejection,
    extract::{DefaultBodyLimit, Multipart, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{Html, IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use super::auth::{require_auth, BasicAuth};
use super::html;
use crate::convert::encode::sniff_mime;
use crate::convert::Converter;

/// POST field carrying the uploaded file
const IMAGE_PAYLOAD_FIELD: &str = "f";

/// Application state shared across handlers
pub struct AppState {
    pub converter: Converter,
    pub auth: Option<BasicAuth>,
    pub max_payload_size: usize,
}

/// Create the REST router
pub fn create_router(state: Arc<AppState>) -> Router {
    let max_payload = state.max_payload_size;

    Router::new()
        .route("/", get(form_handler).post(convert_handler))
        .route("/health", get(health_handler))
        // The credential check is all-or-nothing across every route
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_auth,
        ))
        // Backstop for chunked or length-spoofed bodies
        .layer(DefaultBodyLimit::max(max_payload))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Request-validation errors get 4xx codes; every image-processing failure
/// collapses into a single invalid-format response.
#[derive(Debug)]
enum AppError {
    InvalidRequest,
    MissingImage,
    PayloadTooLarge,
    InvalidImage,
    ProcessingFailed,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AppError::InvalidRequest => (StatusCode::BAD_REQUEST, "Invalid request."),
            AppError::MissingImage => (StatusCode::BAD_REQUEST, "No image specified."),
            AppError::PayloadTooLarge => (StatusCode::PAYLOAD_TOO_LARGE, "Image is too large."),
            AppError::InvalidImage => {
                (StatusCode::UNSUPPORTED_MEDIA_TYPE, "Invalid image format.")
            }
            AppError::ProcessingFailed => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Unable to process image.")
            }
        };
        (status, message).into_response()
    }
}

/// Response mode for successful conversions: raw image bytes, or an HTML
/// page embedding the image with a download trigger.
#[derive(Debug, Clone, Copy, PartialEq)]
enum ResponseMode {
    Raw,
    Html,
}

#[derive(Debug, Deserialize)]
struct ConvertQuery {
    mode: Option<String>,
}

/// An explicit `mode` query parameter wins; otherwise clients that accept
/// text/html get the interactive page and everyone else the raw bytes.
fn negotiate_mode(query: &ConvertQuery, headers: &HeaderMap) -> ResponseMode {
    match query.mode.as_deref() {
        Some("raw") => return ResponseMode::Raw,
        Some("html") => return ResponseMode::Html,
        _ => {}
    }

    let accepts_html = headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.contains("text/html"))
        .unwrap_or(false);

    if accepts_html {
        ResponseMode::Html
    } else {
        ResponseMode::Raw
    }
}

async fn health_handler() -> impl IntoResponse {
    (StatusCode::OK, "ok")
}

/// GET / — static upload form
async fn form_handler() -> Html<&'static str> {
    Html(html::UPLOAD_FORM)
}

/// POST / — validate the upload, run the conversion pipeline, and respond
/// in the negotiated mode.
async fn convert_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ConvertQuery>,
    headers: HeaderMap,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Response, AppError> {
    // Reject oversized payloads before touching the body; spoofed lengths
    // are caught by the body limit layer instead.
    let content_length = headers
        .get(header::CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.parse::<usize>().ok());
    if content_length.is_some_and(|len| len > state.max_payload_size) {
        return Err(AppError::PayloadTooLarge);
    }

    // Extraction fails for anything that is not multipart/form-data
    let mut multipart = multipart.map_err(|_| AppError::InvalidRequest)?;

    let mut payload: Option<(Vec<u8>, String)> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| AppError::InvalidRequest)?
    {
        if field.name() == Some(IMAGE_PAYLOAD_FIELD) {
            let filename = field.file_name().unwrap_or("image").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|_| AppError::InvalidRequest)?
                .to_vec();
            payload = Some((data, filename));
        }
    }

    let (data, filename) = payload.ok_or(AppError::MissingImage)?;
    info!(
        payload_size = data.len(),
        filename = %filename,
        "handling conversion request"
    );

    // Early rejection of payloads that are not images at all
    if sniff_mime(&data).is_none() {
        return Err(AppError::InvalidImage);
    }

    let converted = state.converter.convert(&data).map_err(|e| {
        warn!("conversion failed: {e}");
        AppError::InvalidImage
    })?;

    // The pipeline always emits JPEG; a non-image result here is a server
    // bug. The sniff also supplies the response content type.
    let mime = sniff_mime(&converted).ok_or_else(|| {
        error!("converter produced a non-image result");
        AppError::ProcessingFailed
    })?;

    match negotiate_mode(&query, &headers) {
        ResponseMode::Raw => {
            Ok((StatusCode::OK, [(header::CONTENT_TYPE, mime)], converted).into_response())
        }
        ResponseMode::Html => {
            let download = html::download_filename(&filename, mime);
            Ok(Html(html::result_page(&converted, mime, &download)).into_response())
        }
    }
}
