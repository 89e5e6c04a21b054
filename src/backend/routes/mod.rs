//! Routes Module
//!
//! - **`router`** - route assembly and the middleware pipeline
//! - **`api_routes`** - auth, document, chat and AI routes
//! - **`health`** - liveness endpoint

pub mod api_routes;
pub mod health;
pub mod router;

pub use router::{create_router, with_pipeline};
