/**
 * Authentication Middleware
 *
 * Guards the document, chat and AI routes. Extracts the bearer token,
 * verifies it and makes sure the user still exists, then hands the
 * identity to handlers through request extensions.
 */

use axum::{
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts},
    middleware::Next,
    response::Response,
};
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::backend::server::state::AppState;

/// Identity taken from a verified session token
#[derive(Clone, Debug, PartialEq)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: String,
}

/// Bearer token authentication middleware
///
/// Returns 401 if the header is missing, malformed, the token does not
/// verify, or the user it names is gone.
pub async fn auth_middleware(
    State(app_state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, BackendError> {
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| {
            tracing::warn!("Missing Authorization header");
            BackendError::unauthorized("Authentication required")
        })?;

    let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
        tracing::warn!("Invalid Authorization header format");
        BackendError::unauthorized("Invalid authorization header")
    })?;

    let claims = app_state.sessions.verify_token(token.trim()).map_err(|e| {
        tracing::warn!("Invalid token: {:?}", e);
        BackendError::unauthorized("Invalid or expired token")
    })?;

    let user_id = Uuid::parse_str(&claims.sub).map_err(|e| {
        tracing::warn!("Invalid user ID in token: {:?}", e);
        BackendError::unauthorized("Invalid or expired token")
    })?;

    if app_state.users.find_by_id(user_id).await.is_none() {
        tracing::warn!("Token for unknown user: {}", user_id);
        return Err(BackendError::unauthorized("User no longer exists"));
    }

    request.extensions_mut().insert(AuthenticatedUser {
        user_id,
        email: claims.email,
    });

    Ok(next.run(request).await)
}

/// Extractor for the identity set by [`auth_middleware`]
#[derive(Clone, Debug)]
pub struct AuthUser(pub AuthenticatedUser);

impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = BackendError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthenticatedUser>()
            .cloned()
            .map(AuthUser)
            .ok_or_else(|| {
                tracing::warn!("AuthenticatedUser not found in request extensions");
                BackendError::unauthorized("Authentication required")
            })
    }
}

impl AuthenticatedUser {
    /// Refuse when a body/query `userId` names someone else
    pub fn ensure_is(&self, claimed: Uuid) -> Result<(), BackendError> {
        if self.user_id != claimed {
            tracing::warn!("User {} acted as {}", self.user_id, claimed);
            return Err(BackendError::forbidden("userId does not match the authenticated user"));
        }
        Ok(())
    }
}
