//! Chat session storage
//!
//! Sessions and their messages live under one lock so a session is never
//! observed without its message list.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::backend::error::BackendError;
use crate::shared::{ChatMessage, ChatSession, MessageRole};

#[derive(Debug, Default)]
struct ChatState {
    sessions: HashMap<Uuid, ChatSession>,
    messages: HashMap<Uuid, Vec<ChatMessage>>,
}

impl ChatState {
    fn owned(&self, user_id: Uuid, session_id: Uuid) -> Result<&ChatSession, BackendError> {
        self.sessions
            .get(&session_id)
            .filter(|s| s.user_id == user_id)
            .ok_or_else(|| BackendError::not_found("Chat session not found"))
    }
}

#[derive(Debug, Clone, Default)]
pub struct ChatStore {
    state: Arc<RwLock<ChatState>>,
}

impl ChatStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn create(&self, user_id: Uuid, document_id: Uuid, title: String) -> ChatSession {
        let now = Utc::now();
        let session = ChatSession {
            id: Uuid::new_v4(),
            document_id,
            user_id,
            title,
            created_at: now,
            updated_at: now,
        };

        let mut state = self.state.write().await;
        state.messages.insert(session.id, Vec::new());
        state.sessions.insert(session.id, session.clone());
        session
    }

    /// Most recently active first
    pub async fn list_for(&self, user_id: Uuid) -> Vec<ChatSession> {
        let mut sessions: Vec<ChatSession> = self
            .state
            .read()
            .await
            .sessions
            .values()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        sessions.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        sessions
    }

    pub async fn session(&self, user_id: Uuid, session_id: Uuid) -> Result<ChatSession, BackendError> {
        self.state.read().await.owned(user_id, session_id).cloned()
    }

    /// Oldest first
    pub async fn messages(&self, user_id: Uuid, session_id: Uuid) -> Result<Vec<ChatMessage>, BackendError> {
        let state = self.state.read().await;
        state.owned(user_id, session_id)?;
        Ok(state.messages.get(&session_id).cloned().unwrap_or_default())
    }

    pub async fn append(
        &self,
        user_id: Uuid,
        session_id: Uuid,
        role: MessageRole,
        content: String,
    ) -> Result<ChatMessage, BackendError> {
        let mut state = self.state.write().await;
        state.owned(user_id, session_id)?;

        let message = ChatMessage {
            id: Uuid::new_v4(),
            session_id,
            role,
            content,
            created_at: Utc::now(),
        };
        state
            .messages
            .entry(session_id)
            .or_default()
            .push(message.clone());
        if let Some(session) = state.sessions.get_mut(&session_id) {
            session.updated_at = message.created_at;
        }
        Ok(message)
    }

    pub async fn remove(&self, user_id: Uuid, session_id: Uuid) -> Result<(), BackendError> {
        let mut state = self.state.write().await;
        state.owned(user_id, session_id)?;
        state.sessions.remove(&session_id);
        state.messages.remove(&session_id);
        Ok(())
    }

    /// Drop every session over a document; returns how many went
    pub async fn remove_for_document(&self, document_id: Uuid) -> usize {
        let mut state = self.state.write().await;
        let doomed: Vec<Uuid> = state
            .sessions
            .values()
            .filter(|s| s.document_id == document_id)
            .map(|s| s.id)
            .collect();
        for id in &doomed {
            state.sessions.remove(id);
            state.messages.remove(id);
        }
        doomed.len()
    }
}
