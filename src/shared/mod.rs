//! Shared Module
//!
//! Wire types used by both the typed client and the backend. Everything in
//! here is plain serde data: request bodies, response envelopes and the
//! small configuration/error types both sides need.
//!
//! Field names follow the JSON the browser client has always spoken
//! (`camelCase`, e.g. `documentId`, `userId`).

/// Authentication request/response types
pub mod auth;

/// Document records and document endpoint envelopes
pub mod documents;

/// Chat sessions and messages
pub mod chat;

/// Summary and question generation envelopes
pub mod ai;

/// Liveness payload
pub mod health;

/// Shared error types
pub mod error;

/// Client-side API configuration
pub mod config;

pub use ai::{AiRequest, QuestionsResponse, SummaryResponse};
pub use auth::{AuthResponse, LoginRequest, RegisterRequest, UserProfile};
pub use chat::{
    ChatMessage, ChatSession, CreateSessionRequest, MessageRole, SendMessageRequest,
    SendMessageResponse,
};
pub use config::{ApiConfig, ApiConfigBuilder, ConfigError};
pub use documents::{
    Document, DocumentStatus, ExtractionReport, ReprocessResponse, StatusMessage,
};
pub use error::SharedError;
pub use health::HealthResponse;
