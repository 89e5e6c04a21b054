/**
 * Terminal Fault Handler
 *
 * Innermost wrapper around the routes. Handler errors that are server
 * faults and caught panics both arrive here as responses carrying a
 * [`FaultDetail`]; this layer logs the detail and renders the final
 * structured 500, with the detail only outside production.
 */

use std::any::Any;

use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
};

use crate::backend::error::{error_body, FaultDetail};
use crate::backend::server::config::Environment;

pub async fn terminal_fault_handler(
    State(environment): State<Environment>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();

    let mut response = next.run(request).await;
    let Some(FaultDetail(detail)) = response.extensions_mut().remove::<FaultDetail>() else {
        return response;
    };

    tracing::error!(%method, %path, "Unhandled server fault: {}", detail);
    render_fault(environment, response.status(), &detail)
}

fn render_fault(environment: Environment, status: StatusCode, detail: &str) -> Response {
    let status = if status.is_server_error() {
        status
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };
    let mut body = error_body(status, "Internal server error");
    if !environment.is_production() {
        body["detail"] = serde_json::Value::String(detail.to_string());
    }
    (status, Json(body)).into_response()
}

/// `CatchPanicLayer` callback: turn a panic into a fault response
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    let mut response = StatusCode::INTERNAL_SERVER_ERROR.into_response();
    response
        .extensions_mut()
        .insert(FaultDetail(format!("handler panicked: {}", detail)));
    response
}
