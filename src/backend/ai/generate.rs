//! Extractive generation
//!
//! `summarize` keeps the opening sentences; `questions` turns the most
//! frequent content words into prompts.

use std::collections::HashMap;

use crate::backend::documents::sentences;

pub const SUMMARY_SENTENCES: usize = 3;
pub const MAX_QUESTIONS: usize = 5;

/// Words shorter than this never become question topics
const MIN_TOPIC_CHARS: usize = 5;

const COMMON_WORDS: &[&str] = &[
    "about", "after", "again", "because", "before", "being", "between", "could", "every",
    "other", "should", "their", "there", "these", "those", "through", "under", "where",
    "which", "while", "would",
];

pub fn summarize(text: &str) -> String {
    sentences(text)
        .into_iter()
        .take(SUMMARY_SENTENCES)
        .collect::<Vec<_>>()
        .join(" ")
}

/// Most frequent topic words, ties broken by first appearance
fn topics(text: &str, limit: usize) -> Vec<String> {
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    let words = text
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| w.chars().count() >= MIN_TOPIC_CHARS)
        .map(str::to_lowercase)
        .filter(|w| !COMMON_WORDS.contains(&w.as_str()));

    for (position, word) in words.enumerate() {
        counts.entry(word).or_insert((0, position)).0 += 1;
    }

    let mut ranked: Vec<(String, (usize, usize))> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1 .0.cmp(&a.1 .0).then(a.1 .1.cmp(&b.1 .1)));
    ranked.into_iter().take(limit).map(|(word, _)| word).collect()
}

pub fn questions(file_name: &str, text: &str) -> Vec<String> {
    let mut questions = vec![format!("What is the main point of \"{}\"?", file_name)];
    questions.extend(
        topics(text, MAX_QUESTIONS - 1)
            .into_iter()
            .map(|topic| format!("What does the document say about {}?", topic)),
    );
    questions
}
