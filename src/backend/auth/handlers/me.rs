use axum::{extract::State, response::Json};

use crate::backend::auth::users::UserStore;
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::shared::UserProfile;

/// GET /api/auth/me
pub async fn me(
    State(users): State<UserStore>,
    AuthUser(user): AuthUser,
) -> Result<Json<UserProfile>, BackendError> {
    let record = users
        .find_by_id(user.user_id)
        .await
        .ok_or_else(|| BackendError::not_found("User not found"))?;
    Ok(Json(record.profile()))
}
