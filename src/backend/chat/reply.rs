//! Assistant replies
//!
//! Scores each document sentence by how many distinct question words it
//! contains and answers with the best ones, in document order.

use std::collections::HashSet;

use crate::backend::documents::sentences;

/// Sentences quoted in one reply, at most
const MAX_SENTENCES: usize = 3;

const STOPWORDS: &[&str] = &[
    "the", "and", "for", "are", "was", "what", "who", "how", "why", "when", "where", "which",
    "does", "did", "this", "that", "with", "from", "about", "can", "you", "tell", "there",
    "have", "has", "its", "into", "their", "they", "them", "any", "all", "document",
];

fn keywords(text: &str) -> HashSet<String> {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.chars().count() > 2)
        .map(str::to_lowercase)
        .filter(|w| !STOPWORDS.contains(&w.as_str()))
        .collect()
}

/// Answer `question` from `document_text`
pub fn compose_reply(question: &str, document_name: &str, document_text: &str) -> String {
    let wanted = keywords(question);
    let candidates = sentences(document_text);

    let mut scored: Vec<(usize, usize)> = candidates
        .iter()
        .enumerate()
        .map(|(index, sentence)| (index, keywords(sentence).intersection(&wanted).count()))
        .filter(|(_, score)| *score > 0)
        .collect();

    if scored.is_empty() {
        return format!(
            "I couldn't find anything in \"{}\" that answers that. Try asking about a topic the document covers.",
            document_name
        );
    }

    // best score first, earlier sentence on ties
    scored.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));
    scored.truncate(MAX_SENTENCES);
    scored.sort_by_key(|(index, _)| *index);

    let quoted: Vec<&str> = scored.iter().map(|(index, _)| candidates[*index]).collect();
    format!("According to \"{}\": {}", document_name, quoted.join(" "))
}
