//! Reading transcripts into numbered logical lines.

use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{ParseError, Result};

/// A command and a header the capture tool ran together: `>north[Market Row]`.
static FUSED_HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<command>\s*>\s*[A-Za-z]+(?: [A-Za-z]+)?)(?P<header>\[[^\[\]]+\]\s*(?:\([^()]*\))?\s*)$")
        .unwrap()
});

/// One logical line, numbered from 1 by its physical line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranscriptLine {
    pub number: usize,
    pub text: String,
}

/// A captured session, ready for parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transcript {
    source: String,
    lines: Vec<TranscriptLine>,
}

impl Transcript {
    /// Read a transcript from disk. Invalid UTF-8 is replaced, not rejected.
    pub fn from_path(path: &Path) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|source| ParseError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let text = String::from_utf8_lossy(&bytes);
        Ok(Self::from_text(path.display().to_string(), &text))
    }

    pub fn from_text(source: impl Into<String>, text: &str) -> Self {
        let mut lines = Vec::new();
        for (index, raw) in text.lines().enumerate() {
            let number = index + 1;
            let raw = raw.trim_end_matches('\r');
            match FUSED_HEADER_RE.captures(raw) {
                Some(caps) => {
                    for part in ["command", "header"] {
                        let text = caps.name(part).map_or("", |m| m.as_str());
                        lines.push(TranscriptLine {
                            number,
                            text: text.to_string(),
                        });
                    }
                }
                None => lines.push(TranscriptLine {
                    number,
                    text: raw.to_string(),
                }),
            }
        }
        Self {
            source: source.into(),
            lines,
        }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn lines(&self) -> &[TranscriptLine] {
        &self.lines
    }
}
