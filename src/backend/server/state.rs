/**
 * Application State
 *
 * `AppState` is the one value every handler and middleware can reach.
 * Each store is a cheap handle (an `Arc` inside), so cloning the state per
 * request costs a handful of reference-count bumps.
 *
 * The `FromRef` implementations let a handler ask for just the part it
 * needs, e.g. `State(documents): State<DocumentStore>`.
 */

use std::sync::Arc;

use axum::extract::FromRef;

use crate::backend::auth::{SessionKeys, UserStore};
use crate::backend::chat::ChatStore;
use crate::backend::documents::DocumentStore;
use crate::backend::server::config::{Environment, ServerConfig};
use crate::backend::server::lifecycle::Lifecycle;

#[derive(Clone, Debug)]
pub struct AppState {
    pub config: Arc<ServerConfig>,
    /// Owned by the lifecycle manager; handlers only read it
    pub lifecycle: Arc<Lifecycle>,
    pub users: UserStore,
    pub sessions: SessionKeys,
    pub documents: DocumentStore,
    pub chat: ChatStore,
}

impl AppState {
    pub fn new(config: ServerConfig, lifecycle: Arc<Lifecycle>) -> Self {
        let sessions = SessionKeys::new(&config.jwt_secret, config.token_ttl);
        Self {
            config: Arc::new(config),
            lifecycle,
            users: UserStore::new(),
            sessions,
            documents: DocumentStore::new(),
            chat: ChatStore::new(),
        }
    }
}

impl FromRef<AppState> for Arc<ServerConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}

impl FromRef<AppState> for Environment {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.environment
    }
}

impl FromRef<AppState> for Arc<Lifecycle> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.lifecycle.clone()
    }
}

impl FromRef<AppState> for UserStore {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.users.clone()
    }
}

impl FromRef<AppState> for SessionKeys {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.sessions.clone()
    }
}

impl FromRef<AppState> for DocumentStore {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.documents.clone()
    }
}

impl FromRef<AppState> for ChatStore {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.chat.clone()
    }
}
