/**
 * Registration Handler
 *
 * POST /api/auth/register: creates the user and logs them straight in.
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::Json,
};

use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;
use crate::shared::{AuthResponse, RegisterRequest};

/// Register handler
///
/// # Errors
///
/// * `400` - blank fields or malformed email
/// * `409` - email already registered
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<AuthResponse>), BackendError> {
    let Json(request) = payload?;
    request.validate()?;

    let cost = state.config.bcrypt_cost;
    let password = request.password.clone();
    let password_hash = tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| BackendError::internal(format!("hashing task failed: {}", e)))?
        .map_err(|e| BackendError::internal(format!("failed to hash password: {}", e)))?;

    let user = state
        .users
        .create(&request.name, &request.email, password_hash)
        .await?;

    let token = state
        .sessions
        .create_token(user.id, &user.email)
        .map_err(|e| BackendError::internal(format!("failed to create token: {}", e)))?;

    tracing::info!("User registered: {} ({})", user.email, user.id);

    Ok((
        StatusCode::CREATED,
        Json(AuthResponse {
            token,
            user: user.profile(),
        }),
    ))
}
