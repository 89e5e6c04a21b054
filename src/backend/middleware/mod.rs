//! Middleware Module
//!
//! Cross-cutting request transformers. The router applies them in this
//! order, outermost first:
//!
//! 1. **`security`** - security response headers
//! 2. CORS (`tower_http::cors`)
//! 3. request logging (`tower_http::trace`)
//! 4. **`body_parser`** - JSON parsing, skipped for the upload path
//! 5. **`fault`** - terminal fault handler, wrapping catch-panic
//!
//! **`auth`** is applied per route group, not globally.

pub mod auth;
pub mod body_parser;
pub mod fault;
pub mod security;

pub use auth::{auth_middleware, AuthUser, AuthenticatedUser};
pub use body_parser::{conditional_json_body, JsonBodyParser, UPLOAD_PATH};
pub use fault::{panic_response, terminal_fault_handler};
pub use security::security_headers;
