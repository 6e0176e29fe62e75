//! Line classification.
//!
//! Each transcript line is classified on its own, with no state. Several
//! patterns overlap, so they are tried in a fixed priority order: header,
//! declared exits, presence, scenery mention, movement, go/enter, other
//! commands, noise, and finally description text.

use std::sync::LazyLock;

use regex::Regex;
use roomgraph_core::Direction;

use crate::config::ParserConfig;

static HEADER_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*\[(?P<title>[^\[\]]+)\]\s*(?:\((?P<uid>[^()]*)\))?\s*$").unwrap()
});
static DECLARED_EXITS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*obvious\s+(?:paths|exits)\s*:\s*(?P<list>.*?)\s*$").unwrap()
});
static PRESENCE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^\s*also here\s*:").unwrap());
static PRESENCE_INLINE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\s+also here\s*:\s+.*$").unwrap());
static SCENERY_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*you also see\b\s*:?\s*(?P<mention>.*?)\s*$").unwrap()
});
static SCENERY_TRAILING_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(?P<lead>.*?[.!?])\s+you also see\s+(?P<mention>.+?)\s*$").unwrap()
});
static COMMAND_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*>\s*(?P<command>.*?)\s*$").unwrap());
static GO_ENTER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^(?P<verb>go|enter)\s+(?P<target>.+)$").unwrap());

/// The classification of one transcript line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    Blank,
    /// `[Title]`, optionally followed by `(uid)`.
    Header { title: &'a str, uid: Option<&'a str> },
    /// `Obvious exits: ...` / `Obvious paths: ...`.
    DeclaredExits { list: &'a str },
    /// `Also here: ...`: other actors, always discarded.
    Presence,
    /// `You also see ...`, on its own or trailing a description sentence.
    Scenery {
        leading: Option<&'a str>,
        mention: &'a str,
    },
    /// `>north`, `>ne`, ...
    Movement { direction: Direction },
    /// `>go gate`, `>enter the inn`.
    GoEnter { verb: &'a str, target: &'a str },
    /// Any other player command.
    OtherCommand { command: &'a str },
    /// Transient engine output from the deny-list.
    Noise,
    /// Opens with `[` but is not a header.
    MalformedHeader { text: &'a str },
    Description { text: &'a str },
}

/// Classify a single line.
pub fn classify<'a>(line: &'a str, config: &ParserConfig) -> LineKind<'a> {
    if line.trim().is_empty() {
        return LineKind::Blank;
    }

    if let Some(caps) = HEADER_RE.captures(line) {
        let title = caps.name("title").map_or("", |m| m.as_str().trim());
        if !title.is_empty() {
            let uid = caps
                .name("uid")
                .map(|m| m.as_str().trim())
                .filter(|u| !u.is_empty());
            return LineKind::Header { title, uid };
        }
    }

    if let Some(caps) = DECLARED_EXITS_RE.captures(line) {
        let list = caps.name("list").map_or("", |m| m.as_str());
        return LineKind::DeclaredExits { list };
    }

    if PRESENCE_RE.is_match(line) {
        return LineKind::Presence;
    }

    if let Some(caps) = SCENERY_LINE_RE.captures(line) {
        let mention = caps.name("mention").map_or("", |m| m.as_str());
        return LineKind::Scenery {
            leading: None,
            mention,
        };
    }
    if let Some(caps) = SCENERY_TRAILING_RE.captures(line) {
        let lead = caps.name("lead").map_or("", |m| m.as_str());
        let mention = caps.name("mention").map_or("", |m| m.as_str());
        let lead = strip_inline_presence(lead).trim();
        return LineKind::Scenery {
            leading: (!lead.is_empty()).then_some(lead),
            mention,
        };
    }

    if let Some(caps) = COMMAND_RE.captures(line) {
        let command = caps.name("command").map_or("", |m| m.as_str());
        return classify_command(command);
    }

    if config.is_noise(line) {
        return LineKind::Noise;
    }

    if line.trim_start().starts_with('[') {
        return LineKind::MalformedHeader { text: line.trim() };
    }

    LineKind::Description {
        text: strip_inline_presence(line).trim(),
    }
}

fn classify_command(command: &str) -> LineKind<'_> {
    if command.is_empty() {
        return LineKind::Noise;
    }
    if let Some(direction) = Direction::parse_token(command) {
        return LineKind::Movement { direction };
    }
    if let Some(caps) = GO_ENTER_RE.captures(command) {
        let verb = caps.name("verb").map_or("", |m| m.as_str());
        let target = caps.name("target").map_or("", |m| m.as_str().trim());
        // `go north` is a movement spelled long-hand.
        if let Some(direction) = Direction::parse_token(target) {
            return LineKind::Movement { direction };
        }
        return LineKind::GoEnter { verb, target };
    }
    LineKind::OtherCommand { command }
}

/// Cut a trailing `Also here: ...` clause from description text.
fn strip_inline_presence(text: &str) -> &str {
    match PRESENCE_INLINE_RE.find(text) {
        Some(m) => &text[..m.start()],
        None => text,
    }
}
