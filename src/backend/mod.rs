//! Backend Module
//!
//! The docchat HTTP server: an axum application with a fixed middleware
//! pipeline, in-memory auth/document/chat/AI route modules and an explicit
//! lifecycle manager.
//!
//! This module is only compiled when the `ssr` feature is enabled.
//!
//! # Module Structure
//!
//! ```text
//! backend/
//! ├── mod.rs          - Module exports and documentation
//! ├── server/         - Configuration, state, lifecycle, startup
//! ├── routes/         - Route assembly and the request pipeline
//! ├── middleware/     - Security headers, JSON parser, auth, fault handler
//! ├── auth/           - Users, session tokens, demo seed, auth handlers
//! ├── documents/      - Document store, text extraction, handlers
//! ├── chat/           - Chat sessions, replies, handlers
//! ├── ai/             - Summaries and study questions
//! └── error/          - Backend error type and its HTTP rendering
//! ```
//!
//! # Request Pipeline
//!
//! Every request passes, in order: security headers → CORS → request
//! logging → conditional JSON body parser (skipped for
//! `/api/documents/upload`) → terminal fault handler → catch-panic →
//! route. See [`routes::router`].
//!
//! # Lifecycle
//!
//! `Starting → Listening → ShuttingDown → Terminated`, owned by
//! [`server::Lifecycle`]. See [`server::lifecycle`].
//!
//! # Example
//!
//! ```rust,no_run
//! use docchat::backend::server::{run, ServerConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! run(ServerConfig::from_env()?).await?;
//! # Ok(())
//! # }
//! ```

/// Server setup and configuration
#[cfg(feature = "ssr")]
pub mod server;

/// Route configuration
#[cfg(feature = "ssr")]
pub mod routes;

/// Backend error types
#[cfg(feature = "ssr")]
pub mod error;

/// Authentication and user management
#[cfg(feature = "ssr")]
pub mod auth;

/// Middleware for request processing
#[cfg(feature = "ssr")]
pub mod middleware;

/// Document storage and endpoints
#[cfg(feature = "ssr")]
pub mod documents;

/// Chat sessions over documents
#[cfg(feature = "ssr")]
pub mod chat;

/// Summary and question generation
#[cfg(feature = "ssr")]
pub mod ai;

/// Re-export commonly used types
#[cfg(feature = "ssr")]
pub use error::BackendError;
#[cfg(feature = "ssr")]
pub use server::{create_app, AppState, Lifecycle, LifecycleError, Phase, ServerConfig};
