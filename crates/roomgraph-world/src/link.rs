//! Sequence linking.
//!
//! Replays the visits of one transcript and connects each room to the one
//! the player arrived in next. Ordinal moves also add the return exit;
//! go/enter moves and `out` never do.

use std::collections::BTreeSet;

use roomgraph_core::{
    Diagnostic, ExitConflict, ExitName, ExitTarget, IdentityIntegrityError, ParseWarning, Room,
    RoomId, SelfLoop,
};
use roomgraph_parse::{ParsedTranscript, Visit};
use tracing::{debug, warn};

use crate::graph::WorldGraph;

/// What linking one transcript found.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkReport {
    pub source: String,
    /// Exits created or resolved, counting reverse exits.
    pub links: usize,
    pub self_loops: Vec<SelfLoop>,
    pub conflicts: Vec<ExitConflict>,
    pub integrity_errors: Vec<IdentityIntegrityError>,
    pub warnings: Vec<ParseWarning>,
}

impl LinkReport {
    /// Flatten the report into diagnostics.
    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        let mut out: Vec<Diagnostic> = self
            .warnings
            .iter()
            .map(|w| Diagnostic::Parse {
                source: self.source.clone(),
                warning: w.clone(),
            })
            .collect();
        out.extend(self.self_loops.iter().cloned().map(Diagnostic::SelfLoop));
        out.extend(self.conflicts.iter().cloned().map(Diagnostic::ExitConflict));
        out.extend(
            self.integrity_errors
                .iter()
                .cloned()
                .map(Diagnostic::IdentityIntegrity),
        );
        out
    }
}

/// A transcript reduced to its partial graph.
#[derive(Debug, Clone)]
pub struct LinkedTranscript {
    pub graph: WorldGraph,
    pub report: LinkReport,
}

/// Connects consecutive visits in a graph.
#[derive(Debug, Default)]
pub struct SequenceLinker {
    /// Identities whose records were refused; links touching them are skipped.
    tainted: BTreeSet<RoomId>,
}

impl SequenceLinker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Skip links involving `id`.
    pub fn taint(&mut self, id: RoomId) {
        self.tainted.insert(id);
    }

    /// Link every adjacent pair of visits that has an arrival exit.
    pub fn link(&self, graph: &mut WorldGraph, visits: &[Visit], report: &mut LinkReport) {
        for pair in visits.windows(2) {
            let (prev, cur) = (&pair[0], &pair[1]);
            let Some(arrival) = &cur.arrival else {
                continue;
            };
            let via = &arrival.exit;
            if self.tainted.contains(&prev.room) || self.tainted.contains(&cur.room) {
                debug!(from = %prev.room, to = %cur.room, "skipping link through refused room");
                continue;
            }
            if prev.room == cur.room {
                debug!(room = %prev.room, %via, line = cur.line, "self-loop suppressed");
                report.self_loops.push(SelfLoop {
                    room: prev.room.clone(),
                    via: via.clone(),
                });
                continue;
            }

            if offer(graph, &prev.room, via.clone(), &cur.room, report) {
                report.links += 1;
            }
            if let Some(back) = arrival.reverse() {
                if offer(graph, &cur.room, back, &prev.room, report) {
                    report.links += 1;
                }
            }
        }
    }
}

/// Offer `from --[via]--> to`. Returns whether the exit changed.
fn offer(
    graph: &mut WorldGraph,
    from: &RoomId,
    via: ExitName,
    to: &RoomId,
    report: &mut LinkReport,
) -> bool {
    let Some(room) = graph.get_mut(from) else {
        return false;
    };
    let (outcome, conflict) = room.offer_exit(via, ExitTarget::Resolved(to.clone()));
    if let Some(conflict) = conflict {
        warn!(%conflict, "link conflicts with an earlier observation");
        report.conflicts.push(conflict);
    }
    outcome.changed()
}

/// Fold a parsed transcript into a partial graph and link its visits.
pub fn link_transcript(parsed: ParsedTranscript) -> LinkedTranscript {
    let mut graph = WorldGraph::new();
    let mut linker = SequenceLinker::new();
    let mut report = LinkReport {
        source: parsed.source,
        warnings: parsed.warnings,
        ..LinkReport::default()
    };

    for room in parsed.rooms {
        absorb(&mut graph, room, &mut linker, &mut report);
    }
    linker.link(&mut graph, &parsed.visits, &mut report);

    debug!(
        source = %report.source,
        rooms = graph.room_count(),
        links = report.links,
        self_loops = report.self_loops.len(),
        "linked transcript"
    );
    LinkedTranscript { graph, report }
}

fn absorb(graph: &mut WorldGraph, room: Room, linker: &mut SequenceLinker, report: &mut LinkReport) {
    match graph.absorb(room) {
        Ok(_) => {}
        Err(err) => {
            warn!(%err, "refusing to fold room with colliding identity");
            linker.taint(err.id.clone());
            report.integrity_errors.push(err);
        }
    }
}
