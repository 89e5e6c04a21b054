//! Liveness endpoint
//!
//! One handler, mounted on `/`, `/health` and `/api/health`. It touches no
//! store, so it answers as long as the process is serving.

use std::sync::Arc;

use axum::{extract::State, response::Json};

use crate::backend::server::config::Environment;
use crate::backend::server::lifecycle::Lifecycle;
use crate::shared::HealthResponse;

pub const HEALTH_PATHS: [&str; 3] = ["/", "/health", "/api/health"];

pub async fn health(
    State(lifecycle): State<Arc<Lifecycle>>,
    State(environment): State<Environment>,
) -> Json<HealthResponse> {
    Json(lifecycle.health(environment))
}
