//! Provenance: where a room was observed.
//!
//! Every room records the transcript it came from and the span of lines
//! its observations covered. Revisits within the same transcript widen
//! the span. Across transcripts the smallest source name wins, so the
//! result does not depend on merge order.

use std::fmt;

use serde::{Deserialize, Serialize};

/// An inclusive range of 1-based transcript line numbers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineSpan {
    pub start: usize,
    pub end: usize,
}

impl LineSpan {
    /// A span covering a single line.
    pub fn at(line: usize) -> Self {
        Self {
            start: line,
            end: line,
        }
    }

    /// Extend the span to include `line`.
    pub fn include(&mut self, line: usize) {
        self.start = self.start.min(line);
        self.end = self.end.max(line);
    }

    /// Smallest span covering both.
    pub fn union(self, other: LineSpan) -> LineSpan {
        LineSpan {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Number of lines covered.
    pub fn line_count(&self) -> usize {
        self.end - self.start + 1
    }
}

impl fmt::Display for LineSpan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "L{}", self.start)
        } else {
            write!(f, "L{}-L{}", self.start, self.end)
        }
    }
}

/// Source metadata for a room record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provenance {
    /// Identifier of the transcript (usually its path).
    pub source: String,
    /// Lines the observations of this room covered.
    pub lines: LineSpan,
}

impl Provenance {
    pub fn new(source: impl Into<String>, lines: LineSpan) -> Self {
        Self {
            source: source.into(),
            lines,
        }
    }

    /// Fold another observation of the same room into this record.
    ///
    /// Spans from the same transcript are unioned. Between transcripts the
    /// record whose source sorts first is kept.
    pub fn absorb(&mut self, other: &Provenance) {
        match self.source.cmp(&other.source) {
            std::cmp::Ordering::Equal => self.lines = self.lines.union(other.lines),
            std::cmp::Ordering::Greater => *self = other.clone(),
            std::cmp::Ordering::Less => {}
        }
    }
}

impl fmt::Display for Provenance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.source, self.lines)
    }
}
