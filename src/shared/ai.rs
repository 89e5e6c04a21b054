/**
 * AI Generation Types
 *
 * Envelopes for `POST /documents/{id}/summary` and
 * `POST /documents/{id}/questions`.
 */

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Body of both generation endpoints
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AiRequest {
    pub user_id: Uuid,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryResponse {
    pub document_id: Uuid,
    pub summary: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionsResponse {
    pub document_id: Uuid,
    pub questions: Vec<String>,
}
