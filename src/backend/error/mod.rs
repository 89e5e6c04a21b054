//! Backend Error Module
//!
//! Error types raised by handlers and middleware, and their conversion into
//! structured JSON responses.
//!
//! # Module Structure
//!
//! ```text
//! error/
//! ├── mod.rs        - Module exports and documentation
//! ├── types.rs      - BackendError and its constructors
//! └── conversion.rs - IntoResponse and the FaultDetail extension
//! ```
//!
//! # Response Format
//!
//! ```json
//! { "error": "Document not found", "status": 404 }
//! ```
//!
//! Server faults (500) never put their detail in the body directly. The
//! detail rides along as a [`FaultDetail`] response extension and the
//! terminal fault handler decides whether the environment may see it.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use conversion::{error_body, FaultDetail};
pub use types::BackendError;
