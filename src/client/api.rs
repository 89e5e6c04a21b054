//! Typed endpoint methods
//!
//! Thin callers into [`ApiClient::execute`]; each one only knows its path,
//! its method and its envelope type.

use reqwest::multipart::{Form, Part};
use uuid::Uuid;

use crate::client::error::ClientError;
use crate::client::executor::{ApiClient, RequestOptions};
use crate::shared::{
    AiRequest, AuthResponse, ChatMessage, ChatSession, CreateSessionRequest, Document,
    ExtractionReport, HealthResponse, LoginRequest, QuestionsResponse, RegisterRequest,
    ReprocessResponse, SendMessageRequest, SendMessageResponse, StatusMessage, SummaryResponse,
    UserProfile,
};

/// Multipart field the upload endpoint reads
pub const UPLOAD_FIELD: &str = "document";

impl ApiClient {
    // Auth

    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ClientError> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.execute("/auth/login", RequestOptions::post_json(&body)?)
            .await
    }

    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
    ) -> Result<AuthResponse, ClientError> {
        let body = RegisterRequest {
            name: name.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        self.execute("/auth/register", RequestOptions::post_json(&body)?)
            .await
    }

    /// Profile of the user the current token belongs to
    pub async fn me(&self) -> Result<UserProfile, ClientError> {
        self.execute("/auth/me", RequestOptions::get()).await
    }

    // Documents

    pub async fn get_documents(&self) -> Result<Vec<Document>, ClientError> {
        self.execute("/documents", RequestOptions::get()).await
    }

    pub async fn get_document(&self, id: Uuid) -> Result<Document, ClientError> {
        self.execute(&format!("/documents/{}", id), RequestOptions::get())
            .await
    }

    /// Upload a file as the `document` multipart field
    ///
    /// `mime_type` defaults to `application/octet-stream`.
    pub async fn upload_document(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
        mime_type: Option<&str>,
    ) -> Result<Document, ClientError> {
        let part = Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str(mime_type.unwrap_or("application/octet-stream"))
            .map_err(|e| ClientError::InvalidRequest(format!("invalid mime type: {}", e)))?;
        let form = Form::new().part(UPLOAD_FIELD, part);
        self.execute("/documents/upload", RequestOptions::multipart(form))
            .await
    }

    pub async fn delete_document(&self, id: Uuid) -> Result<StatusMessage, ClientError> {
        self.execute(&format!("/documents/{}", id), RequestOptions::delete())
            .await
    }

    pub async fn reprocess_document(&self, id: Uuid) -> Result<ReprocessResponse, ClientError> {
        self.execute(&format!("/documents/{}/reprocess", id), RequestOptions::post())
            .await
    }

    pub async fn test_extraction(&self, id: Uuid) -> Result<ExtractionReport, ClientError> {
        self.execute(
            &format!("/documents/{}/test-extraction", id),
            RequestOptions::get(),
        )
        .await
    }

    // Chat

    pub async fn create_chat_session(
        &self,
        document_id: Uuid,
        user_id: Uuid,
        title: Option<&str>,
    ) -> Result<ChatSession, ClientError> {
        let body = CreateSessionRequest {
            document_id,
            user_id,
            title: title.map(str::to_string),
        };
        self.execute("/chat/sessions", RequestOptions::post_json(&body)?)
            .await
    }

    pub async fn get_chat_sessions(&self, user_id: Uuid) -> Result<Vec<ChatSession>, ClientError> {
        self.execute(
            &format!("/chat/sessions?userId={}", user_id),
            RequestOptions::get(),
        )
        .await
    }

    /// Messages of one session
    pub async fn get_chat_session(
        &self,
        session_id: Uuid,
        user_id: Uuid,
    ) -> Result<Vec<ChatMessage>, ClientError> {
        self.execute(
            &format!("/chat/sessions/{}?userId={}", session_id, user_id),
            RequestOptions::get(),
        )
        .await
    }

    pub async fn send_message(
        &self,
        session_id: Uuid,
        message: &str,
        user_id: Uuid,
    ) -> Result<SendMessageResponse, ClientError> {
        let body = SendMessageRequest {
            message: message.to_string(),
            user_id,
        };
        self.execute(
            &format!("/chat/sessions/{}/messages", session_id),
            RequestOptions::post_json(&body)?,
        )
        .await
    }

    pub async fn get_messages(
        &self,
        session_id: Uuid,
        user_id: Uuid,
    ) -> Result<Vec<ChatMessage>, ClientError> {
        self.execute(
            &format!("/chat/sessions/{}/messages?userId={}", session_id, user_id),
            RequestOptions::get(),
        )
        .await
    }

    pub async fn delete_chat_session(
        &self,
        session_id: Uuid,
        user_id: Uuid,
    ) -> Result<StatusMessage, ClientError> {
        self.execute(
            &format!("/chat/sessions/{}?userId={}", session_id, user_id),
            RequestOptions::delete(),
        )
        .await
    }

    // AI

    pub async fn generate_summary(
        &self,
        document_id: Uuid,
        user_id: Uuid,
    ) -> Result<SummaryResponse, ClientError> {
        self.execute(
            &format!("/documents/{}/summary", document_id),
            RequestOptions::post_json(&AiRequest { user_id })?,
        )
        .await
    }

    pub async fn generate_questions(
        &self,
        document_id: Uuid,
        user_id: Uuid,
    ) -> Result<QuestionsResponse, ClientError> {
        self.execute(
            &format!("/documents/{}/questions", document_id),
            RequestOptions::post_json(&AiRequest { user_id })?,
        )
        .await
    }

    /// Liveness of the backend (`<base>/health`)
    pub async fn health(&self) -> Result<HealthResponse, ClientError> {
        self.execute("/health", RequestOptions::get()).await
    }
}
