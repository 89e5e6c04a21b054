//! Demo account provisioning
//!
//! Run by the lifecycle manager shortly after the server starts listening.
//! Idempotent: an existing account is left alone.

use crate::backend::auth::users::UserStore;
use crate::backend::error::BackendError;

pub const DEMO_NAME: &str = "Admin";
pub const DEMO_EMAIL: &str = "admin@mail.com";
pub const DEMO_PASSWORD: &str = "admin123";

/// Create the demo account if missing. Returns `true` when it was created.
pub async fn ensure_demo_account(users: &UserStore, bcrypt_cost: u32) -> Result<bool, BackendError> {
    if users.find_by_email(DEMO_EMAIL).await.is_some() {
        tracing::debug!("Demo account already present");
        return Ok(false);
    }

    let hash = tokio::task::spawn_blocking(move || bcrypt::hash(DEMO_PASSWORD, bcrypt_cost))
        .await
        .map_err(|e| BackendError::internal(format!("demo seed task panicked: {}", e)))?
        .map_err(|e| BackendError::internal(format!("failed to hash demo password: {}", e)))?;

    match users.create(DEMO_NAME, DEMO_EMAIL, hash).await {
        Ok(user) => {
            tracing::info!("Demo account created: {} ({})", user.email, user.id);
            Ok(true)
        }
        // Someone registered the address while we were hashing
        Err(BackendError::HandlerError { status, .. }) if status == axum::http::StatusCode::CONFLICT => {
            Ok(false)
        }
        Err(e) => Err(e),
    }
}
