//! The transcript state machine.
//!
//! Lines are consumed strictly in order. A header closes the open
//! observation and opens the next one. Movement commands appear *before*
//! the header of the room they lead to, so each one is held as the pending
//! arrival of the next observation rather than applied to the current one.

use roomgraph_core::{Direction, ExitName, ParseWarning, Room, RoomId};
use tracing::debug;

use crate::classify::{classify, LineKind};
use crate::config::ParserConfig;
use crate::labels::LabelRegistry;
use crate::observation::RoomObservation;
use crate::transcript::Transcript;

/// The exit taken out of the previous room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arrival {
    pub exit: ExitName,
    /// Set when the move was a go/enter, even if the confirmed scenery
    /// noun happens to spell a direction.
    pub by_name: bool,
}

impl Arrival {
    /// A plain ordinal move.
    pub fn walked(direction: Direction) -> Self {
        Self {
            exit: direction.into(),
            by_name: false,
        }
    }

    /// A go/enter move toward `exit`.
    pub fn named(exit: ExitName) -> Self {
        Self {
            exit,
            by_name: true,
        }
    }

    /// The return exit implied by this move, if any.
    pub fn reverse(&self) -> Option<ExitName> {
        if self.by_name {
            return None;
        }
        self.exit.direction()?.reverse().map(ExitName::from)
    }
}

/// One arrival in a room, in transcript order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visit {
    pub room: RoomId,
    /// How the player left the previous room, if a movement preceded
    /// the header.
    pub arrival: Option<Arrival>,
    /// Line of the header that opened the visit.
    pub line: usize,
}

/// Everything one transcript produced.
#[derive(Debug, Clone)]
pub struct ParsedTranscript {
    pub source: String,
    /// One finalized room per header occurrence, in order.
    pub rooms: Vec<Room>,
    pub visits: Vec<Visit>,
    pub warnings: Vec<ParseWarning>,
}

enum State {
    Idle,
    Accumulating {
        observation: RoomObservation,
        arrival: Option<Arrival>,
    },
}

/// Parses transcripts with a fixed configuration.
#[derive(Debug, Clone, Copy)]
pub struct TranscriptParser<'c> {
    config: &'c ParserConfig,
}

impl<'c> TranscriptParser<'c> {
    pub fn new(config: &'c ParserConfig) -> Self {
        Self { config }
    }

    pub fn parse(&self, transcript: &Transcript) -> ParsedTranscript {
        let mut run = Run {
            config: self.config,
            source: transcript.source(),
            state: State::Idle,
            pending: None,
            labels: LabelRegistry::new(),
            rooms: Vec::new(),
            visits: Vec::new(),
            warnings: Vec::new(),
        };
        for line in transcript.lines() {
            run.step(&line.text, line.number);
        }
        run.close();
        debug!(
            source = transcript.source(),
            rooms = run.rooms.len(),
            warnings = run.warnings.len(),
            "parsed transcript"
        );
        ParsedTranscript {
            source: transcript.source().to_string(),
            rooms: run.rooms,
            visits: run.visits,
            warnings: run.warnings,
        }
    }
}

/// State for a single pass over one transcript.
struct Run<'a> {
    config: &'a ParserConfig,
    source: &'a str,
    state: State,
    pending: Option<Arrival>,
    labels: LabelRegistry,
    rooms: Vec<Room>,
    visits: Vec<Visit>,
    warnings: Vec<ParseWarning>,
}

impl Run<'_> {
    fn step(&mut self, text: &str, line: usize) {
        let kind = classify(text, self.config);

        if let LineKind::Header { title, uid } = kind {
            self.close();
            self.state = State::Accumulating {
                observation: RoomObservation::open(title, uid, line),
                arrival: self.pending.take(),
            };
            return;
        }

        let State::Accumulating { observation, .. } = &mut self.state else {
            self.outside_room(kind, text, line);
            return;
        };

        match kind {
            LineKind::Header { .. } | LineKind::Blank | LineKind::Presence | LineKind::Noise => {}
            LineKind::DeclaredExits { list } => {
                let warnings = observation.declare_exits(list, line);
                self.warnings.extend(warnings);
            }
            LineKind::Scenery { leading, mention } => {
                if let Some(leading) = leading {
                    observation.push_description(leading, self.config, line);
                }
                observation.note_scenery(mention, self.config, line);
            }
            LineKind::Movement { direction } => {
                debug!(from = observation.title(), %direction, line, "pending movement");
                self.pending = Some(Arrival::walked(direction));
            }
            LineKind::GoEnter { target, .. } => match observation.go_enter(target, line) {
                Some(name) => {
                    debug!(from = observation.title(), exit = %name, line, "pending go/enter");
                    self.pending = Some(Arrival::named(name));
                }
                None => self.warnings.push(ParseWarning::EmptyGoTarget {
                    line,
                    command: text.trim().to_string(),
                }),
            },
            LineKind::OtherCommand { command } => {
                self.warnings.push(ParseWarning::UnrecognizedCommand {
                    line,
                    command: command.to_string(),
                });
            }
            LineKind::MalformedHeader { text } => {
                self.warnings.push(ParseWarning::MalformedHeader {
                    line,
                    text: text.to_string(),
                });
                observation.push_description(text, self.config, line);
            }
            LineKind::Description { text } => {
                observation.push_description(text, self.config, line);
            }
        }
    }

    /// Lines before the first header have no room to belong to.
    fn outside_room(&mut self, kind: LineKind<'_>, text: &str, line: usize) {
        match kind {
            LineKind::Blank | LineKind::Presence | LineKind::Noise => {}
            LineKind::Movement { .. } => {}
            LineKind::OtherCommand { command } => {
                self.warnings.push(ParseWarning::UnrecognizedCommand {
                    line,
                    command: command.to_string(),
                });
            }
            LineKind::MalformedHeader { text } => {
                self.warnings.push(ParseWarning::MalformedHeader {
                    line,
                    text: text.to_string(),
                });
            }
            _ => self.warnings.push(ParseWarning::LineOutsideRoom {
                line,
                text: text.trim().to_string(),
            }),
        }
    }

    /// Finalize the open observation, if any.
    fn close(&mut self) {
        let State::Accumulating {
            observation,
            arrival,
        } = std::mem::replace(&mut self.state, State::Idle)
        else {
            return;
        };
        let mut room = observation.finalize(self.source);
        room.label = self.labels.label(&room.id);
        self.visits.push(Visit {
            room: room.id.clone(),
            arrival,
            line: room.provenance.lines.start,
        });
        self.rooms.push(room);
    }
}

/// Parse one transcript with `config`.
pub fn parse_transcript(transcript: &Transcript, config: &ParserConfig) -> ParsedTranscript {
    TranscriptParser::new(config).parse(transcript)
}
