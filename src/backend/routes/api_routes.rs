/**
 * API Routes
 *
 * ## Public
 * - `POST /api/auth/register`
 * - `POST /api/auth/login`
 *
 * ## Bearer token required
 * - `GET /api/auth/me`
 * - `/api/documents/...` - list, get, upload, delete, reprocess,
 *   test-extraction, summary, questions
 * - `/api/chat/sessions/...` - sessions and messages
 *
 * The guard is a `route_layer`, so unknown paths still reach the 404
 * fallback instead of answering 401.
 */

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, post},
    Router,
};

use crate::backend::ai::{generate_questions, generate_summary};
use crate::backend::auth::{login, me, register};
use crate::backend::chat::{
    create_session, delete_session, get_session, list_messages, list_sessions, send_message,
};
use crate::backend::documents::{
    delete_document, get_document, list_documents, reprocess_document, test_extraction,
    upload_document,
};
use crate::backend::middleware::{auth_middleware, UPLOAD_PATH};
use crate::backend::server::state::AppState;

pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
}

pub fn protected_routes(app_state: &AppState) -> Router<AppState> {
    let upload_limit = app_state.config.max_upload_bytes;

    Router::new()
        .route("/api/auth/me", get(me))
        // Documents
        .route("/api/documents", get(list_documents))
        .route(
            UPLOAD_PATH,
            post(upload_document).layer(DefaultBodyLimit::max(upload_limit)),
        )
        .route(
            "/api/documents/{id}",
            get(get_document).delete(delete_document),
        )
        .route("/api/documents/{id}/reprocess", post(reprocess_document))
        .route("/api/documents/{id}/test-extraction", get(test_extraction))
        // AI
        .route("/api/documents/{id}/summary", post(generate_summary))
        .route("/api/documents/{id}/questions", post(generate_questions))
        // Chat
        .route(
            "/api/chat/sessions",
            post(create_session).get(list_sessions),
        )
        .route(
            "/api/chat/sessions/{id}",
            get(get_session).delete(delete_session),
        )
        .route(
            "/api/chat/sessions/{id}/messages",
            post(send_message).get(list_messages),
        )
        .route_layer(middleware::from_fn_with_state(
            app_state.clone(),
            auth_middleware,
        ))
}
