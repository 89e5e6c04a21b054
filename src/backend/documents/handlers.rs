/**
 * Document Handlers
 *
 * All routes sit behind the bearer middleware and act on the caller's own
 * documents only.
 *
 * - GET    /api/documents
 * - GET    /api/documents/{id}
 * - POST   /api/documents/upload            (multipart, field `document`)
 * - DELETE /api/documents/{id}
 * - POST   /api/documents/{id}/reprocess
 * - GET    /api/documents/{id}/test-extraction
 */

use axum::{
    extract::{
        multipart::MultipartRejection,
        rejection::PathRejection,
        Multipart, Path, State,
    },
    http::StatusCode,
    response::Json,
};
use uuid::Uuid;

use crate::backend::chat::ChatStore;
use crate::backend::documents::store::DocumentStore;
use crate::backend::error::BackendError;
use crate::backend::middleware::AuthUser;
use crate::shared::{Document, ExtractionReport, ReprocessResponse, StatusMessage};

/// Multipart field carrying the file
pub const UPLOAD_FIELD: &str = "document";

const DEFAULT_FILE_NAME: &str = "upload";
const DEFAULT_MIME_TYPE: &str = "application/octet-stream";

pub async fn list_documents(
    State(documents): State<DocumentStore>,
    AuthUser(user): AuthUser,
) -> Json<Vec<Document>> {
    Json(documents.list_for(user.user_id).await)
}

pub async fn get_document(
    State(documents): State<DocumentStore>,
    AuthUser(user): AuthUser,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<Document>, BackendError> {
    let Path(id) = id?;
    Ok(Json(documents.get(user.user_id, id).await?))
}

/// Upload handler
///
/// # Errors
///
/// * `400` - no `document` field, or the multipart stream is malformed
/// * `413` - the stream exceeds the upload limit
pub async fn upload_document(
    State(documents): State<DocumentStore>,
    AuthUser(user): AuthUser,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<(StatusCode, Json<Document>), BackendError> {
    let mut multipart = multipart?;

    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(UPLOAD_FIELD) {
            tracing::debug!("Ignoring multipart field {:?}", field.name());
            continue;
        }

        let file_name = field
            .file_name()
            .filter(|name| !name.trim().is_empty())
            .unwrap_or(DEFAULT_FILE_NAME)
            .to_string();
        let mime_type = field
            .content_type()
            .unwrap_or(DEFAULT_MIME_TYPE)
            .to_string();
        let bytes = field.bytes().await?;

        tracing::info!(
            "Upload from {}: {} ({}, {} bytes)",
            user.user_id,
            file_name,
            mime_type,
            bytes.len()
        );
        let document = documents
            .insert(user.user_id, &file_name, &mime_type, bytes)
            .await;
        return Ok((StatusCode::CREATED, Json(document)));
    }

    Err(BackendError::bad_request(format!(
        "Missing multipart field '{}'",
        UPLOAD_FIELD
    )))
}

/// Delete a document and every chat session over it
pub async fn delete_document(
    State(documents): State<DocumentStore>,
    State(chat): State<ChatStore>,
    AuthUser(user): AuthUser,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<StatusMessage>, BackendError> {
    let Path(id) = id?;
    let document = documents.remove(user.user_id, id).await?;
    let sessions = chat.remove_for_document(document.id).await;
    tracing::info!(
        "Deleted document {} ({} chat sessions)",
        document.id,
        sessions
    );
    Ok(Json(StatusMessage::new("Document deleted successfully")))
}

pub async fn reprocess_document(
    State(documents): State<DocumentStore>,
    AuthUser(user): AuthUser,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<ReprocessResponse>, BackendError> {
    let Path(id) = id?;
    let document = documents.reprocess(user.user_id, id).await?;
    Ok(Json(ReprocessResponse {
        message: "Document reprocessed".to_string(),
        document_id: document.id,
        status: document.status,
    }))
}

pub async fn test_extraction(
    State(documents): State<DocumentStore>,
    AuthUser(user): AuthUser,
    id: Result<Path<Uuid>, PathRejection>,
) -> Result<Json<ExtractionReport>, BackendError> {
    let Path(id) = id?;
    Ok(Json(documents.extraction_report(user.user_id, id).await?))
}
