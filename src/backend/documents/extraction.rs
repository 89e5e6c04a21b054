//! Text extraction
//!
//! Only plain text is understood: bytes that decode as UTF-8 become the
//! document's text. Anything else is reported as unsupported.

/// Characters kept in an extraction preview
pub const PREVIEW_CHARS: usize = 200;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    Text(String),
    Empty,
    Unsupported(String),
}

pub fn extract_text(bytes: &[u8], mime_type: &str) -> Extraction {
    let text = match std::str::from_utf8(bytes) {
        Ok(text) => text,
        Err(e) => {
            return Extraction::Unsupported(format!(
                "{} content is not valid UTF-8 text (byte {})",
                mime_type,
                e.valid_up_to()
            ))
        }
    };

    if text.contains('\0') {
        return Extraction::Unsupported(format!("{} content is binary", mime_type));
    }

    let text = text.trim();
    if text.is_empty() {
        Extraction::Empty
    } else {
        Extraction::Text(text.to_string())
    }
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

pub fn preview(text: &str) -> String {
    text.chars().take(PREVIEW_CHARS).collect()
}

/// Split text into trimmed, non-empty sentences
pub fn sentences(text: &str) -> Vec<&str> {
    text.split_inclusive(['.', '!', '?', '\n'])
        .map(str::trim)
        .filter(|s| s.chars().any(char::is_alphanumeric))
        .collect()
}
