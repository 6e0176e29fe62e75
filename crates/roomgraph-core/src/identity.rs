//! Content-derived room identity.
//!
//! A room is identified by the SHA-256 of its trimmed title and its
//! whitespace-normalized description, truncated to 64 bits. The slug
//! derived from the title travels with the fingerprint for readability
//! but never takes part in comparisons.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::CoreError;

/// Number of hex characters kept from the digest.
pub const FINGERPRINT_LEN: usize = 16;

/// Longest slug kept, in characters.
const MAX_SLUG_LEN: usize = 80;

/// Canonical identity of a room.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct RoomId {
    slug: String,
    fingerprint: String,
}

impl RoomId {
    /// Compute the identity of a (title, description) pair.
    ///
    /// The description is normalized here as well, so callers may pass
    /// wrapped or unevenly spaced text.
    pub fn compute(title: &str, description: &str) -> Self {
        Self {
            slug: slugify(title),
            fingerprint: fingerprint(title, description),
        }
    }

    /// The hex fingerprint used for equality.
    pub fn fingerprint(&self) -> &str {
        &self.fingerprint
    }

    /// Human-readable slug derived from the title.
    pub fn slug(&self) -> &str {
        &self.slug
    }
}

impl PartialEq for RoomId {
    fn eq(&self, other: &Self) -> bool {
        self.fingerprint == other.fingerprint
    }
}

impl Eq for RoomId {}

impl Hash for RoomId {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.fingerprint.hash(state);
    }
}

impl PartialOrd for RoomId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for RoomId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.fingerprint.cmp(&other.fingerprint)
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.slug, self.fingerprint)
    }
}

impl FromStr for RoomId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || CoreError::MalformedRoomId(s.to_string());
        let (slug, fingerprint) = s.rsplit_once('_').ok_or_else(malformed)?;
        let well_formed = !slug.is_empty()
            && fingerprint.len() == FINGERPRINT_LEN
            && fingerprint.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f'));
        if !well_formed {
            return Err(malformed());
        }
        Ok(Self {
            slug: slug.to_string(),
            fingerprint: fingerprint.to_string(),
        })
    }
}

impl From<RoomId> for String {
    fn from(id: RoomId) -> Self {
        id.to_string()
    }
}

impl TryFrom<String> for RoomId {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Collapse every whitespace run to one space and trim the ends.
pub fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Truncated SHA-256 over `len(title) || trim(title) || normalize(description)`.
///
/// The title is length-prefixed so no (title, description) split of the
/// same bytes can produce the same input.
pub fn fingerprint(title: &str, description: &str) -> String {
    let title = title.trim();
    let mut hasher = Sha256::new();
    hasher.update((title.len() as u64).to_le_bytes());
    hasher.update(title.as_bytes());
    hasher.update(normalize_whitespace(description).as_bytes());
    let digest = hasher.finalize();
    let mut hex = hash_hex(&digest);
    hex.truncate(FINGERPRINT_LEN);
    hex
}

/// Format digest bytes as lowercase hex.
pub fn hash_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

/// Lowercase, apostrophe-free, underscore-separated form of a title.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_sep = false;
    for ch in title.chars().flat_map(char::to_lowercase) {
        if matches!(ch, '\'' | '\u{2019}' | '\u{2018}' | '`') {
            continue;
        }
        if ch.is_ascii_alphanumeric() {
            if pending_sep && !slug.is_empty() {
                slug.push('_');
            }
            pending_sep = false;
            slug.push(ch);
        } else {
            pending_sep = true;
        }
    }
    if slug.len() > MAX_SLUG_LEN {
        slug.truncate(MAX_SLUG_LEN);
        while slug.ends_with('_') {
            slug.pop();
        }
    }
    if slug.is_empty() {
        slug.push_str("room");
    }
    slug
}
