//! Confirmation of hidden exits.
//!
//! Scenery text names many things that are not exits. A mentioned noun
//! only becomes an exit when the player successfully moves toward it with
//! `go`/`enter` while still in the room that mentioned it. Targets may be
//! abbreviated: `go walk` confirms `walkway`.

use tracing::debug;

use crate::scenery::strip_article;

/// Shortest abbreviation accepted as a prefix match.
pub const MIN_PREFIX_LEN: usize = 3;

/// Outcome of a go/enter command against the open room's candidates.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Confirmation {
    /// A scenery candidate was confirmed.
    Candidate(String),
    /// Nothing matched; the normalized token itself names the exit.
    Unmatched(String),
}

impl Confirmation {
    /// The exit name to record.
    pub fn key(&self) -> &str {
        match self {
            Confirmation::Candidate(key) | Confirmation::Unmatched(key) => key,
        }
    }
}

/// Unconfirmed scenery candidates for one open room observation.
#[derive(Debug, Clone, Default)]
pub struct ExitConfirmationEngine {
    candidates: Vec<String>,
}

impl ExitConfirmationEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register candidate keys, keeping first-seen order.
    pub fn register<I>(&mut self, keys: I)
    where
        I: IntoIterator<Item = String>,
    {
        for key in keys {
            if !key.is_empty() && !self.candidates.contains(&key) {
                self.candidates.push(key);
            }
        }
    }

    pub fn candidates(&self) -> &[String] {
        &self.candidates
    }

    /// Resolve a go/enter target against the candidates.
    ///
    /// Returns `None` when the target normalizes to nothing.
    pub fn confirm(&self, target: &str) -> Option<Confirmation> {
        let token = normalize_target(target);
        if token.is_empty() {
            return None;
        }
        if token.len() >= MIN_PREFIX_LEN {
            let best = self
                .candidates
                .iter()
                .enumerate()
                .filter(|(_, c)| c.starts_with(&token))
                .min_by_key(|(index, c)| (c.as_str() != token, c.len(), *index))
                .map(|(_, c)| c.clone());
            if let Some(candidate) = best {
                debug!(token = %token, confirmed = %candidate, "confirmed hidden exit");
                return Some(Confirmation::Candidate(candidate));
            }
        }
        debug!(token = %token, "unmatched go target recorded as hidden exit");
        Some(Confirmation::Unmatched(token))
    }
}

/// Normalize a go/enter target: lowercase, drop a leading article, keep
/// the first word, keep only alphanumerics.
pub fn normalize_target(target: &str) -> String {
    let lowered = target.trim().to_lowercase();
    let bare = strip_article(&lowered);
    bare.split_whitespace()
        .next()
        .unwrap_or("")
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect()
}
