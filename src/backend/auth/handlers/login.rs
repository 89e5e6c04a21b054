/**
 * Login Handler
 *
 * POST /api/auth/login
 *
 * 1. Look up the user by email
 * 2. Verify the password with bcrypt
 * 3. Issue a session token
 */

use axum::{
    extract::{rejection::JsonRejection, State},
    response::Json,
};

use crate::backend::auth::sessions::SessionKeys;
use crate::backend::auth::users::UserStore;
use crate::backend::error::BackendError;
use crate::shared::{AuthResponse, LoginRequest};

const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// Login handler
///
/// # Errors
///
/// * `400` - blank email or password
/// * `401` - unknown email or wrong password (same message for both)
/// * `500` - hashing or token failure
pub async fn login(
    State(users): State<UserStore>,
    State(keys): State<SessionKeys>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<AuthResponse>, BackendError> {
    let Json(request) = payload?;
    request.validate()?;
    tracing::info!("Login request for: {}", request.email);

    let user = users.find_by_email(&request.email).await.ok_or_else(|| {
        tracing::warn!("Login for unknown email: {}", request.email);
        BackendError::unauthorized(INVALID_CREDENTIALS)
    })?;

    let valid = bcrypt::verify(&request.password, &user.password_hash)
        .map_err(|e| BackendError::internal(format!("password verification failed: {}", e)))?;
    if !valid {
        tracing::warn!("Invalid password for user: {}", user.email);
        return Err(BackendError::unauthorized(INVALID_CREDENTIALS));
    }

    let token = keys
        .create_token(user.id, &user.email)
        .map_err(|e| BackendError::internal(format!("failed to create token: {}", e)))?;

    tracing::info!("User logged in: {} ({})", user.name, user.email);

    Ok(Json(AuthResponse {
        token,
        user: user.profile(),
    }))
}
