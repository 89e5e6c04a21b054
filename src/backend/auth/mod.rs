//! Authentication Module
//!
//! In-memory stand-in for the auth collaborator: user records, password
//! hashing, session tokens and the three auth endpoints.
//!
//! # Module Structure
//!
//! ```text
//! auth/
//! ├── mod.rs       - Module exports and documentation
//! ├── users.rs     - User records and the in-memory user store
//! ├── sessions.rs  - JWT session tokens
//! ├── seed.rs      - Demo account provisioning
//! └── handlers/    - HTTP handlers (register, login, me)
//! ```
//!
//! # Authentication Flow
//!
//! 1. **Register**: name, email, password → user created → token returned
//! 2. **Login**: email, password → bcrypt verify → token returned
//! 3. **Me**: bearer token → user profile
//!
//! Invalid credentials always answer 401 with the same message, whether the
//! email is unknown or the password is wrong.

/// User records and storage
pub mod users;

/// JWT token generation and validation
pub mod sessions;

/// Demo account seeding
pub mod seed;

/// HTTP handlers for authentication endpoints
pub mod handlers;

pub use handlers::{login, me, register};
pub use sessions::{Claims, SessionKeys};
pub use users::{User, UserStore};
