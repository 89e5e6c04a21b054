//! Authentication Handlers
//!
//! - **`register`** - POST /api/auth/register
//! - **`login`** - POST /api/auth/login
//! - **`me`** - GET /api/auth/me (behind the bearer middleware)

pub mod login;
pub mod me;
pub mod register;

pub use login::login;
pub use me::me;
pub use register::register;
