//! Chat Module
//!
//! Chat sessions over a single document and the messages inside them.
//! The assistant side is a plain extractive responder: it answers with
//! the document sentences that share the most words with the question.
//!
//! ```text
//! chat/
//! ├── mod.rs       - Module exports
//! ├── store.rs     - Sessions and messages, scoped per user
//! ├── reply.rs     - Assistant reply composition
//! └── handlers.rs  - HTTP handlers
//! ```

pub mod handlers;
pub mod reply;
pub mod store;

pub use handlers::{
    create_session, delete_session, get_session, list_messages, list_sessions, send_message,
};
pub use reply::compose_reply;
pub use store::ChatStore;
