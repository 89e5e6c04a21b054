//! Documents Module
//!
//! In-memory document storage and the document endpoints. Uploads keep
//! their raw bytes so a document can be reprocessed later; text is pulled
//! out at upload time.
//!
//! # Module Structure
//!
//! ```text
//! documents/
//! ├── mod.rs         - Module exports and documentation
//! ├── extraction.rs  - Text extraction and sentence splitting
//! ├── store.rs       - Per-user document store
//! └── handlers.rs    - HTTP handlers
//! ```

pub mod extraction;
pub mod handlers;
pub mod store;

pub use extraction::{extract_text, sentences, Extraction};
pub use handlers::{
    delete_document, get_document, list_documents, reprocess_document, test_extraction,
    upload_document,
};
pub use store::DocumentStore;
