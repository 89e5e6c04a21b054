/**
 * Error Conversion
 *
 * `BackendError` → JSON response. Client errors carry their message;
 * server faults carry a generic message plus a [`FaultDetail`] extension
 * for the terminal fault handler.
 */

use axum::{
    extract::{
        multipart::{MultipartError, MultipartRejection},
        rejection::{JsonRejection, PathRejection, QueryRejection},
    },
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde_json::Value;

use crate::backend::error::types::BackendError;

/// Server-side detail of a 500, attached as a response extension
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FaultDetail(pub String);

/// The structured error body every failure uses
pub fn error_body(status: StatusCode, message: &str) -> Value {
    serde_json::json!({
        "error": message,
        "status": status.as_u16(),
    })
}

impl IntoResponse for BackendError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let message = self.message();

        let mut response = (status, Json(error_body(status, &message))).into_response();
        if let Some(detail) = self.fault_detail() {
            response.extensions_mut().insert(FaultDetail(detail));
        }
        response
    }
}

/// Extractor rejections keep axum's status and message but use our body
macro_rules! from_rejection {
    ($($rejection:ty),* $(,)?) => {
        $(
            impl From<$rejection> for BackendError {
                fn from(rejection: $rejection) -> Self {
                    BackendError::handler(rejection.status(), rejection.body_text())
                }
            }
        )*
    };
}

from_rejection!(JsonRejection, QueryRejection, PathRejection, MultipartRejection, MultipartError);
