/**
 * User Records
 *
 * Users live in an in-memory map keyed by id. Emails are unique,
 * compared case-insensitively.
 */

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::shared::UserProfile;

/// A stored user
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    /// Lowercased, trimmed
    pub email: String,
    /// bcrypt hash
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

impl User {
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            id: self.id,
            name: self.name.clone(),
            email: self.email.clone(),
        }
    }
}

/// Shared user store
#[derive(Debug, Clone, Default)]
pub struct UserStore {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

impl UserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new user; 409 if the email is taken
    pub async fn create(
        &self,
        name: &str,
        email: &str,
        password_hash: String,
    ) -> Result<User, BackendError> {
        let email = normalize_email(email);
        let mut users = self.users.write().await;
        if users.values().any(|u| u.email == email) {
            return Err(BackendError::conflict("Email already registered"));
        }

        let user = User {
            id: Uuid::new_v4(),
            name: name.trim().to_string(),
            email,
            password_hash,
            created_at: Utc::now(),
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    pub async fn find_by_email(&self, email: &str) -> Option<User> {
        let email = normalize_email(email);
        self.users
            .read()
            .await
            .values()
            .find(|u| u.email == email)
            .cloned()
    }

    pub async fn find_by_id(&self, id: Uuid) -> Option<User> {
        self.users.read().await.get(&id).cloned()
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
