/**
 * Chat Handlers
 *
 * The client names the acting user explicitly (`userId` in the body or
 * the query string). It must match the bearer identity; a mismatch is
 * refused with 403 before anything is read.
 *
 * - POST   /api/chat/sessions
 * - GET    /api/chat/sessions?userId=
 * - GET    /api/chat/sessions/{id}?userId=           (message list)
 * - DELETE /api/chat/sessions/{id}?userId=
 * - POST   /api/chat/sessions/{id}/messages
 * - GET    /api/chat/sessions/{id}/messages?userId=
 */

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    http::StatusCode,
    response::Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::backend::chat::reply::compose_reply;
use crate::backend::chat::store::ChatStore;
use crate::backend::documents::DocumentStore;
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::shared::{
    ChatMessage, ChatSession, CreateSessionRequest, MessageRole, SendMessageRequest,
    SendMessageResponse, StatusMessage,
};

/// `?userId=` on the read and delete routes
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserQuery {
    pub user_id: Uuid,
}

pub async fn create_session(
    State(chat): State<ChatStore>,
    State(documents): State<DocumentStore>,
    AuthUser(user): AuthUser,
    payload: Result<Json<CreateSessionRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<ChatSession>), BackendError> {
    let Json(request) = payload?;
    user.ensure_is(request.user_id)?;

    let document = documents.get(user.user_id, request.document_id).await?;
    let title = request
        .title
        .map(|t| t.trim().to_string())
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| format!("Chat about {}", document.file_name));

    let session = chat.create(user.user_id, document.id, title).await;
    tracing::info!("Chat session {} created over {}", session.id, document.id);
    Ok((StatusCode::CREATED, Json(session)))
}

pub async fn list_sessions(
    State(chat): State<ChatStore>,
    AuthUser(user): AuthUser,
    query: Result<Query<UserQuery>, QueryRejection>,
) -> Result<Json<Vec<ChatSession>>, BackendError> {
    let Query(query) = query?;
    user.ensure_is(query.user_id)?;
    Ok(Json(chat.list_for(user.user_id).await))
}

/// A session's messages
pub async fn get_session(
    State(chat): State<ChatStore>,
    AuthUser(user): AuthUser,
    id: Result<Path<Uuid>, PathRejection>,
    query: Result<Query<UserQuery>, QueryRejection>,
) -> Result<Json<Vec<ChatMessage>>, BackendError> {
    let Path(id) = id?;
    let Query(query) = query?;
    user.ensure_is(query.user_id)?;
    Ok(Json(chat.messages(user.user_id, id).await?))
}

pub async fn list_messages(
    chat: State<ChatStore>,
    user: AuthUser,
    id: Result<Path<Uuid>, PathRejection>,
    query: Result<Query<UserQuery>, QueryRejection>,
) -> Result<Json<Vec<ChatMessage>>, BackendError> {
    get_session(chat, user, id, query).await
}

/// Store the question, answer it from the document, store the answer
///
/// # Errors
///
/// * `400` - blank message
/// * `403` - `userId` is not the caller
/// * `404` - unknown session, or its document is gone
/// * `409` - the document has no extracted text
pub async fn send_message(
    State(chat): State<ChatStore>,
    State(documents): State<DocumentStore>,
    AuthUser(user): AuthUser,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<SendMessageRequest>, JsonRejection>,
) -> Result<Json<SendMessageResponse>, BackendError> {
    let Path(id) = id?;
    let Json(request) = payload?;
    user.ensure_is(request.user_id)?;

    let question = request.message.trim();
    if question.is_empty() {
        return Err(BackendError::bad_request("Message cannot be empty"));
    }

    let session = chat.session(user.user_id, id).await?;
    let (document, text) = documents.ready_text(user.user_id, session.document_id).await?;

    let user_message = chat
        .append(user.user_id, id, MessageRole::User, question.to_string())
        .await?;
    let reply = compose_reply(question, &document.file_name, &text);
    let assistant_message = chat
        .append(user.user_id, id, MessageRole::Assistant, reply)
        .await?;

    Ok(Json(SendMessageResponse {
        user_message,
        assistant_message,
    }))
}

pub async fn delete_session(
    State(chat): State<ChatStore>,
    AuthUser(user): AuthUser,
    id: Result<Path<Uuid>, PathRejection>,
    query: Result<Query<UserQuery>, QueryRejection>,
) -> Result<Json<StatusMessage>, BackendError> {
    let Path(id) = id?;
    let Query(query) = query?;
    user.ensure_is(query.user_id)?;

    chat.remove(user.user_id, id).await?;
    tracing::info!("Chat session {} deleted", id);
    Ok(Json(StatusMessage::new("Chat session deleted successfully")))
}
