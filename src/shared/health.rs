use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Liveness payload served by `/`, `/health` and `/api/health`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub uptime_seconds: u64,
    pub environment: String,
}
