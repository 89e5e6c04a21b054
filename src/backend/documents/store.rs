/**
 * Document Store
 *
 * Documents keyed by id, each owned by one user. Every read and write is
 * scoped by owner: a document belonging to someone else is reported as
 * not found rather than forbidden, so ids cannot be probed.
 */

use std::collections::HashMap;
use std::sync::Arc;

use bytes::Bytes;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::backend::documents::extraction::{extract_text, preview, word_count, Extraction};
use crate::backend::error::BackendError;
use crate::shared::{Document, DocumentStatus, ExtractionReport};

#[derive(Debug, Clone)]
struct StoredDocument {
    record: Document,
    bytes: Bytes,
}

impl StoredDocument {
    /// Run extraction over the stored bytes and update the record
    fn process(&mut self) {
        self.record.status = DocumentStatus::Processing;
        match extract_text(&self.bytes, &self.record.mime_type) {
            Extraction::Text(text) => {
                self.record.extracted_text = Some(text);
                self.record.status = DocumentStatus::Ready;
            }
            Extraction::Empty => {
                tracing::warn!("Document {} has no text", self.record.id);
                self.record.extracted_text = None;
                self.record.status = DocumentStatus::Failed;
            }
            Extraction::Unsupported(reason) => {
                tracing::warn!("Extraction failed for {}: {}", self.record.id, reason);
                self.record.extracted_text = None;
                self.record.status = DocumentStatus::Failed;
            }
        }
        self.record.updated_at = Utc::now();
    }
}

fn not_found() -> BackendError {
    BackendError::not_found("Document not found")
}

#[derive(Debug, Clone, Default)]
pub struct DocumentStore {
    documents: Arc<RwLock<HashMap<Uuid, StoredDocument>>>,
}

impl DocumentStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store an upload and extract its text
    pub async fn insert(
        &self,
        user_id: Uuid,
        file_name: &str,
        mime_type: &str,
        bytes: Bytes,
    ) -> Document {
        let now = Utc::now();
        let mut stored = StoredDocument {
            record: Document {
                id: Uuid::new_v4(),
                user_id,
                file_name: file_name.to_string(),
                mime_type: mime_type.to_string(),
                size: bytes.len() as u64,
                status: DocumentStatus::Processing,
                extracted_text: None,
                summary: None,
                created_at: now,
                updated_at: now,
            },
            bytes,
        };
        stored.process();

        let record = stored.record.clone();
        self.documents.write().await.insert(record.id, stored);
        record
    }

    /// Newest first
    pub async fn list_for(&self, user_id: Uuid) -> Vec<Document> {
        let mut documents: Vec<Document> = self
            .documents
            .read()
            .await
            .values()
            .filter(|d| d.record.user_id == user_id)
            .map(|d| d.record.clone())
            .collect();
        documents.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        documents
    }

    pub async fn get(&self, user_id: Uuid, id: Uuid) -> Result<Document, BackendError> {
        self.documents
            .read()
            .await
            .get(&id)
            .filter(|d| d.record.user_id == user_id)
            .map(|d| d.record.clone())
            .ok_or_else(not_found)
    }

    pub async fn remove(&self, user_id: Uuid, id: Uuid) -> Result<Document, BackendError> {
        let mut documents = self.documents.write().await;
        match documents.get(&id) {
            Some(d) if d.record.user_id == user_id => {}
            _ => return Err(not_found()),
        }
        documents.remove(&id).map(|d| d.record).ok_or_else(not_found)
    }

    /// Re-run extraction over the stored bytes
    pub async fn reprocess(&self, user_id: Uuid, id: Uuid) -> Result<Document, BackendError> {
        let mut documents = self.documents.write().await;
        let stored = documents
            .get_mut(&id)
            .filter(|d| d.record.user_id == user_id)
            .ok_or_else(not_found)?;
        stored.record.summary = None;
        stored.process();
        Ok(stored.record.clone())
    }

    /// Extraction diagnostic; does not change the record
    pub async fn extraction_report(
        &self,
        user_id: Uuid,
        id: Uuid,
    ) -> Result<ExtractionReport, BackendError> {
        let documents = self.documents.read().await;
        let stored = documents
            .get(&id)
            .filter(|d| d.record.user_id == user_id)
            .ok_or_else(not_found)?;

        Ok(match extract_text(&stored.bytes, &stored.record.mime_type) {
            Extraction::Text(text) => ExtractionReport::Extracted {
                document_id: id,
                characters: text.chars().count(),
                words: word_count(&text),
                preview: preview(&text),
            },
            Extraction::Empty => ExtractionReport::Empty { document_id: id },
            Extraction::Unsupported(reason) => ExtractionReport::Failed {
                document_id: id,
                reason,
            },
        })
    }

    /// Extracted text of a ready document; 409 while it is not ready
    pub async fn ready_text(&self, user_id: Uuid, id: Uuid) -> Result<(Document, String), BackendError> {
        let document = self.get(user_id, id).await?;
        match (&document.status, &document.extracted_text) {
            (DocumentStatus::Ready, Some(text)) => {
                let text = text.clone();
                Ok((document, text))
            }
            (status, _) => Err(BackendError::conflict(format!(
                "Document is not ready (status: {})",
                status.as_str()
            ))),
        }
    }

    pub async fn set_summary(&self, id: Uuid, summary: &str) {
        if let Some(stored) = self.documents.write().await.get_mut(&id) {
            stored.record.summary = Some(summary.to_string());
            stored.record.updated_at = Utc::now();
        }
    }
}
