/**
 * AI Handlers
 *
 * - POST /api/documents/{id}/summary    `{ userId }`
 * - POST /api/documents/{id}/questions  `{ userId }`
 *
 * 409 when the document has no extracted text.
 */

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    response::Json,
};
use uuid::Uuid;

use crate::backend::ai::generate::{questions, summarize};
use crate::backend::documents::DocumentStore;
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::shared::{AiRequest, QuestionsResponse, SummaryResponse};

pub async fn generate_summary(
    State(documents): State<DocumentStore>,
    AuthUser(user): AuthUser,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<AiRequest>, JsonRejection>,
) -> Result<Json<SummaryResponse>, BackendError> {
    let Path(id) = id?;
    let Json(request) = payload?;
    user.ensure_is(request.user_id)?;

    let (document, text) = documents.ready_text(user.user_id, id).await?;
    let summary = summarize(&text);
    documents.set_summary(document.id, &summary).await;
    tracing::info!("Summary generated for {}", document.id);

    Ok(Json(SummaryResponse {
        document_id: document.id,
        summary,
    }))
}

pub async fn generate_questions(
    State(documents): State<DocumentStore>,
    AuthUser(user): AuthUser,
    id: Result<Path<Uuid>, PathRejection>,
    payload: Result<Json<AiRequest>, JsonRejection>,
) -> Result<Json<QuestionsResponse>, BackendError> {
    let Path(id) = id?;
    let Json(request) = payload?;
    user.ensure_is(request.user_id)?;

    let (document, text) = documents.ready_text(user.user_id, id).await?;
    Ok(Json(QuestionsResponse {
        document_id: document.id,
        questions: questions(&document.file_name, &text),
    }))
}
