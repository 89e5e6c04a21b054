/**
 * Authentication Types
 *
 * Request bodies for `POST /auth/login` and `POST /auth/register` and the
 * envelope both endpoints return.
 */

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::shared::error::SharedError;

/// Login request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Registration request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegisterRequest {
    /// Display name
    pub name: String,
    pub email: String,
    /// Plain password, hashed before storage
    pub password: String,
}

impl LoginRequest {
    /// Reject blank credentials before they reach the user store
    pub fn validate(&self) -> Result<(), SharedError> {
        require_non_blank("email", &self.email)?;
        require_non_blank("password", &self.password)
    }
}

impl RegisterRequest {
    /// Reject blank fields and obviously malformed emails
    pub fn validate(&self) -> Result<(), SharedError> {
        require_non_blank("name", &self.name)?;
        require_non_blank("email", &self.email)?;
        require_non_blank("password", &self.password)?;
        if !self.email.contains('@') {
            return Err(SharedError::validation("email", "must be an email address"));
        }
        Ok(())
    }
}

fn require_non_blank(field: &str, value: &str) -> Result<(), SharedError> {
    if value.trim().is_empty() {
        return Err(SharedError::validation(field, "is required"));
    }
    Ok(())
}

/// User information safe to hand to clients
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub email: String,
}

/// Auth response
///
/// Returned by login and register. The token goes into the client's token
/// store and is sent back as `Authorization: Bearer <token>`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: UserProfile,
}
