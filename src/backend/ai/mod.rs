//! AI Module
//!
//! Summary and study-question generation over a ready document. Both are
//! computed locally from the extracted text, so these routes never wait on
//! an outside provider.

pub mod generate;
pub mod handlers;

pub use generate::{questions, summarize};
pub use handlers::{generate_questions, generate_summary};
