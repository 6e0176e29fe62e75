//! Non-fatal findings reported while parsing, linking, and merging.
//!
//! None of these abort work. They are collected into reports and
//! surfaced to the caller, who decides whether a run succeeded.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::exit::ExitName;
use crate::identity::RoomId;

/// A data-quality finding from the line parser.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParseWarning {
    /// Text appeared before the first room header and was dropped.
    LineOutsideRoom { line: usize, text: String },
    /// A line opened with `[` but was not a well-formed header.
    MalformedHeader { line: usize, text: String },
    /// A player command that is neither a movement nor go/enter.
    UnrecognizedCommand { line: usize, command: String },
    /// A token on a declared-exits line that is not an ordinal.
    UnknownDeclaredExit { line: usize, token: String },
    /// A go/enter command whose target normalized to nothing.
    EmptyGoTarget { line: usize, command: String },
}

impl ParseWarning {
    /// Transcript line the warning refers to.
    pub fn line(&self) -> usize {
        match self {
            ParseWarning::LineOutsideRoom { line, .. }
            | ParseWarning::MalformedHeader { line, .. }
            | ParseWarning::UnrecognizedCommand { line, .. }
            | ParseWarning::UnknownDeclaredExit { line, .. }
            | ParseWarning::EmptyGoTarget { line, .. } => *line,
        }
    }
}

impl fmt::Display for ParseWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseWarning::LineOutsideRoom { line, text } => {
                write!(f, "L{line}: text before first room header ignored: {text:?}")
            }
            ParseWarning::MalformedHeader { line, text } => {
                write!(f, "L{line}: malformed room header treated as description: {text:?}")
            }
            ParseWarning::UnrecognizedCommand { line, command } => {
                write!(f, "L{line}: command {command:?} is not a movement")
            }
            ParseWarning::UnknownDeclaredExit { line, token } => {
                write!(f, "L{line}: declared exit {token:?} is not an ordinal")
            }
            ParseWarning::EmptyGoTarget { line, command } => {
                write!(f, "L{line}: go/enter command {command:?} has no usable target")
            }
        }
    }
}

/// Two different resolved targets met for the same room and exit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExitConflict {
    pub room: RoomId,
    pub exit: ExitName,
    /// The target that was already held and was kept.
    pub kept: RoomId,
    /// The target that was offered and rejected.
    pub rejected: RoomId,
}

impl fmt::Display for ExitConflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "exit conflict on {} --[{}]-->: kept {}, rejected {}",
            self.room, self.exit, self.kept, self.rejected
        )
    }
}

/// A movement whose departure and arrival share one identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelfLoop {
    pub room: RoomId,
    pub via: ExitName,
}

impl fmt::Display for SelfLoop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "self-loop skipped: {} --[{}]--> (self)", self.room, self.via)
    }
}

/// Two rooms share a fingerprint but not their normalized content.
///
/// The truncated digest makes this possible in principle. Such rooms are
/// never merged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, thiserror::Error)]
#[error("identity collision on {id}: {existing_title:?} ({existing_source}) vs {incoming_title:?} ({incoming_source})")]
pub struct IdentityIntegrityError {
    pub id: RoomId,
    pub existing_title: String,
    pub existing_description: String,
    pub existing_source: String,
    pub incoming_title: String,
    pub incoming_description: String,
    pub incoming_source: String,
}

/// Any finding a run can report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Diagnostic {
    Parse { source: String, warning: ParseWarning },
    SelfLoop(SelfLoop),
    ExitConflict(ExitConflict),
    IdentityIntegrity(IdentityIntegrityError),
    FatalIo { source: String, message: String },
}

/// How much a diagnostic matters to the outcome of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Diagnostic {
    pub fn severity(&self) -> Severity {
        match self {
            Diagnostic::SelfLoop(_) => Severity::Info,
            Diagnostic::Parse { .. } | Diagnostic::ExitConflict(_) => Severity::Warning,
            Diagnostic::IdentityIntegrity(_) | Diagnostic::FatalIo { .. } => Severity::Error,
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::Parse { source, warning } => write!(f, "{source}: {warning}"),
            Diagnostic::SelfLoop(s) => write!(f, "{s}"),
            Diagnostic::ExitConflict(c) => write!(f, "{c}"),
            Diagnostic::IdentityIntegrity(e) => write!(f, "{e}"),
            Diagnostic::FatalIo { source, message } => {
                write!(f, "{source}: unreadable transcript: {message}")
            }
        }
    }
}
