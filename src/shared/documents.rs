//! Document Types
//!
//! Document records as returned by `/documents` and the small envelopes of
//! the mutating document endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Processing state of an uploaded document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentStatus {
    Processing,
    Ready,
    Failed,
}

impl DocumentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Processing => "processing",
            Self::Ready => "ready",
            Self::Failed => "failed",
        }
    }
}

/// A document record
///
/// The raw upload bytes never travel back to the client; `extracted_text`
/// is present once processing succeeded.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Original file name as sent by the uploader
    pub file_name: String,
    pub mime_type: String,
    pub size: u64,
    pub status: DocumentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extracted_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Plain `{ "message": ... }` acknowledgement
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusMessage {
    pub message: String,
}

impl StatusMessage {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Response of `POST /documents/{id}/reprocess`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReprocessResponse {
    pub message: String,
    pub document_id: Uuid,
    pub status: DocumentStatus,
}

/// Response of `GET /documents/{id}/test-extraction`
///
/// Tagged by `status` so a caller can match on the outcome instead of
/// poking at an untyped object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum ExtractionReport {
    #[serde(rename_all = "camelCase")]
    Extracted {
        document_id: Uuid,
        characters: usize,
        words: usize,
        preview: String,
    },
    #[serde(rename_all = "camelCase")]
    Empty { document_id: Uuid },
    #[serde(rename_all = "camelCase")]
    Failed { document_id: Uuid, reason: String },
}

impl ExtractionReport {
    pub fn document_id(&self) -> Uuid {
        match self {
            Self::Extracted { document_id, .. }
            | Self::Empty { document_id }
            | Self::Failed { document_id, .. } => *document_id,
        }
    }
}
