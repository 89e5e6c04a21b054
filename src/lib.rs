//! docchat - Main Library
//!
//! Document chat: users upload documents, then ask questions about them in
//! chat sessions and request summaries or study questions.
//!
//! # Module Structure
//!
//! - **`shared`** - Wire types used by both sides
//!   - auth, document, chat and AI envelopes
//!   - client API configuration, shared validation errors
//!
//! - **`client`** - Typed request executor
//!   - one `execute` pipeline (URL, headers, body, status, decode)
//!   - a typed method per backend operation
//!   - injectable token source and transport
//!
//! - **`backend`** - HTTP server (only compiled with the `ssr` feature)
//!   - axum router behind a fixed middleware pipeline
//!   - lifecycle manager with graceful shutdown
//!
//! # Feature Flags
//!
//! - **`ssr`** (default) - builds the server. Without it the crate is the
//!   client and shared types only.
//!
//! # Usage
//!
//! ```rust,no_run
//! use docchat::client::{ApiClient, SharedToken};
//! use docchat::shared::ApiConfig;
//!
//! # async fn example() -> Result<(), docchat::client::ClientError> {
//! let token = SharedToken::default();
//! let client = ApiClient::new(ApiConfig::default()).with_token_source(token.clone());
//!
//! let auth = client.login("admin@mail.com", "admin123").await?;
//! token.set(Some(auth.token));
//! let documents = client.get_documents().await?;
//! # Ok(())
//! # }
//! ```

/// Shared types and data structures
pub mod shared;

/// Typed HTTP client for the backend API
pub mod client;

/// Backend server-side code
#[cfg(feature = "ssr")]
pub mod backend;
