/**
 * Conditional JSON Body Parser
 *
 * Buffers and validates JSON request bodies for every path except the
 * document upload endpoint. The upload stream is multipart and must reach
 * its handler untouched, so the skip decision is taken here, before any
 * byte of the body is read.
 *
 * # Behaviour
 *
 * - path == skip path → passed through, body never polled
 * - no JSON content type → passed through
 * - declared `Content-Length` above the limit → 413
 * - body not valid JSON → 400 `Malformed JSON body`
 * - otherwise the buffered bytes are handed on as the new body
 */

use axum::{
    body::Body,
    extract::{Request, State},
    http::{header::CONTENT_LENGTH, header::CONTENT_TYPE, HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};

use crate::backend::error::BackendError;

/// The only path whose body is never parsed as JSON
pub const UPLOAD_PATH: &str = "/api/documents/upload";

/// Parser settings, shared as middleware state
#[derive(Debug, Clone)]
pub struct JsonBodyParser {
    skip_path: String,
    limit: usize,
}

impl JsonBodyParser {
    pub fn new(skip_path: impl Into<String>, limit: usize) -> Self {
        Self {
            skip_path: skip_path.into(),
            limit,
        }
    }

    /// Whether a request to `path` bypasses parsing
    pub fn skips(&self, path: &str) -> bool {
        path == self.skip_path
    }
}

fn is_json(headers: &HeaderMap) -> bool {
    let Some(value) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let essence = value.split(';').next().unwrap_or("").trim().to_ascii_lowercase();
    essence == "application/json" || (essence.starts_with("application/") && essence.ends_with("+json"))
}

fn declared_length(headers: &HeaderMap) -> Option<usize> {
    headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok())
}

/// Middleware entry point
pub async fn conditional_json_body(
    State(parser): State<JsonBodyParser>,
    request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    if parser.skips(request.uri().path()) {
        tracing::debug!("Skipping JSON parsing for {}", request.uri().path());
        return Ok(next.run(request).await);
    }
    if !is_json(request.headers()) {
        return Ok(next.run(request).await);
    }

    if let Some(length) = declared_length(request.headers()) {
        if length > parser.limit {
            return Err(BackendError::handler(
                StatusCode::PAYLOAD_TOO_LARGE,
                format!("Request body exceeds {} bytes", parser.limit),
            ));
        }
    }

    let (parts, body) = request.into_parts();
    let bytes = axum::body::to_bytes(body, parser.limit).await.map_err(|e| {
        tracing::warn!("Failed to read JSON body for {}: {}", parts.uri.path(), e);
        BackendError::bad_request("Failed to read request body")
    })?;

    if !bytes.is_empty() {
        if let Err(e) = serde_json::from_slice::<serde::de::IgnoredAny>(&bytes) {
            tracing::warn!("Malformed JSON body for {}: {}", parts.uri.path(), e);
            return Err(BackendError::bad_request(format!("Malformed JSON body: {}", e)));
        }
    }

    Ok(next.run(Request::from_parts(parts, Body::from(bytes))).await)
}
