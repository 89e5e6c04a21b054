//! Test configuration and users

use std::sync::Arc;
use std::time::Duration;

use docchat::backend::server::config::{Environment, ServerConfig};
use docchat::backend::server::{AppState, Lifecycle};
use uuid::Uuid;

/// bcrypt's minimum cost keeps tests fast
pub const TEST_BCRYPT_COST: u32 = 4;

pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        environment: Environment::Test,
        bcrypt_cost: TEST_BCRYPT_COST,
        demo_seed_delay: Duration::from_millis(10),
        ..ServerConfig::default()
    }
}

pub fn test_state() -> AppState {
    state_with(test_config())
}

pub fn state_with(config: ServerConfig) -> AppState {
    AppState::new(config, Arc::new(Lifecycle::new()))
}

/// Test user credentials
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: Uuid,
    pub email: String,
    pub password: String,
    pub token: String,
}

impl TestUser {
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.token)
    }
}

/// Create a user directly in the store and issue a token
pub async fn create_test_user(state: &AppState, email: &str, password: &str) -> TestUser {
    let hash = bcrypt::hash(password, TEST_BCRYPT_COST).unwrap();
    let user = state.users.create("Test User", email, hash).await.unwrap();
    let token = state.sessions.create_token(user.id, &user.email).unwrap();

    TestUser {
        id: user.id,
        email: user.email,
        password: password.to_string(),
        token,
    }
}

/// Create a user with a unique email
pub async fn create_unique_test_user(state: &AppState) -> TestUser {
    let email = format!("test_{}@example.com", Uuid::new_v4());
    create_test_user(state, &email, "test_password_123").await
}
