//! Transcript parsing for the room graph.
//!
//! A [`Transcript`] is classified line by line and fed through a state
//! machine that produces one [`roomgraph_core::Room`] per header occurrence,
//! the ordered [`Visit`]s between them, and any [`roomgraph_core::ParseWarning`]s.

pub mod classify;
pub mod config;
pub mod confirm;
pub mod error;
pub mod labels;
pub mod observation;
pub mod parser;
pub mod scenery;
pub mod transcript;

pub use classify::{classify, LineKind};
pub use config::ParserConfig;
pub use confirm::{Confirmation, ExitConfirmationEngine};
pub use error::{ParseError, Result};
pub use labels::LabelRegistry;
pub use observation::RoomObservation;
pub use parser::{parse_transcript, Arrival, ParsedTranscript, TranscriptParser, Visit};
pub use transcript::{Transcript, TranscriptLine};
