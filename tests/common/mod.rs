//! Common test utilities and helpers
//!
//! - Assertion macros
//! - Test configuration, users and tokens
//! - Real servers on ephemeral ports and in-process request helpers

pub mod assertions;
#[cfg(feature = "ssr")]
pub mod auth_helpers;

#[cfg(feature = "ssr")]
pub use auth_helpers::*;
#[cfg(feature = "ssr")]
pub use test_server::*;
