//! Typed API Client
//!
//! Every call the application makes to the backend goes through
//! [`ApiClient::execute`]. The executor composes the target from the
//! configured base address, injects `Authorization` and `Content-Type`,
//! dispatches through a [`Transport`] and turns the response into either a
//! typed envelope or a [`ClientError`].
//!
//! # Module Structure
//!
//! ```text
//! client/
//! ├── mod.rs       - Module exports and documentation
//! ├── error.rs     - ClientError (transport / application / decode)
//! ├── token.rs     - TokenSource implementations
//! ├── transport.rs - Transport trait and the reqwest-backed transport
//! ├── executor.rs  - RequestOptions, RequestBody and ApiClient::execute
//! └── api.rs       - One typed method per backend endpoint
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use docchat::client::{ApiClient, SharedToken};
//! use docchat::shared::ApiConfig;
//!
//! # async fn example() -> Result<(), docchat::client::ClientError> {
//! let token = SharedToken::new();
//! let client = ApiClient::new(ApiConfig::default()).with_token_source(token.clone());
//!
//! let auth = client.login("admin@mail.com", "admin123").await?;
//! token.set(Some(auth.token));
//! let documents = client.get_documents().await?;
//! # Ok(())
//! # }
//! ```

/// Client error taxonomy
pub mod error;

/// Bearer token sources
pub mod token;

/// Request dispatch
pub mod transport;

/// The request executor
pub mod executor;

/// Typed endpoint methods
pub mod api;

pub use error::ClientError;
pub use executor::{ApiClient, BodyKind, RequestBody, RequestOptions};
pub use token::{FileTokenStore, NoToken, SharedToken, StaticToken, TokenSource};
pub use transport::{HttpTransport, Transport};
