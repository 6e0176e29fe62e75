//! Turning "You also see ..." text into exit candidates.

use std::sync::LazyLock;

use regex::Regex;

use crate::config::{words, ParserConfig};

static CONJUNCTION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+(?:and|&)\s+").unwrap());
static ARTICLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?:a|an|the|some)(?:\s+|$)").unwrap());

/// Split an English list ("a, b and c.") into its items.
pub fn split_list(text: &str) -> Vec<String> {
    let text = text.trim().trim_end_matches('.');
    let text = CONJUNCTION_RE.replace_all(text, ", ");
    text.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(str::to_string)
        .collect()
}

/// Drop one leading article.
pub fn strip_article(phrase: &str) -> &str {
    match ARTICLE_RE.find(phrase) {
        Some(m) => &phrase[m.end()..],
        None => phrase,
    }
}

/// Lowercase, article-free, punctuation-free form of a noun phrase.
pub fn normalize_phrase(phrase: &str) -> String {
    let lowered = phrase.trim().to_lowercase();
    let bare = strip_article(&lowered);
    let cleaned: String = bare
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace() || *c == '-')
        .collect();
    cleaned.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// The likely go/enter keyword inside a noun phrase.
///
/// The longest exit-capable noun in the phrase wins; otherwise the last
/// word of the phrase is used.
pub fn candidate_key(phrase: &str, config: &ParserConfig) -> Option<String> {
    let normalized = normalize_phrase(phrase);
    let mut best: Option<String> = None;
    for word in words(&normalized) {
        if config.is_exit_noun(&word) && best.as_ref().map_or(true, |b| word.len() >= b.len()) {
            best = Some(word);
        }
    }
    best.or_else(|| normalized.split_whitespace().last().map(str::to_string))
}

/// Candidate keys for every item of a scenery mention, deduplicated in
/// first-seen order.
pub fn candidates(mention: &str, config: &ParserConfig) -> Vec<String> {
    let mut keys: Vec<String> = Vec::new();
    for item in split_list(mention) {
        if let Some(key) = candidate_key(&item, config) {
            if !keys.contains(&key) {
                keys.push(key);
            }
        }
    }
    keys
}
