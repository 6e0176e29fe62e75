//! World-level graph merging.
//!
//! Folds independently produced graphs into one master graph, keyed by room
//! identity. Sentinel exits give way to resolved targets; two different
//! resolved targets keep the one merged first and raise a conflict.

use roomgraph_core::{Diagnostic, ExitConflict, IdentityIntegrityError};
use tracing::{info, warn};

use crate::graph::{Absorbed, WorldGraph};

/// Outcome of merging one or more graphs into a master.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Rooms new to the master.
    pub added: usize,
    /// Existing rooms that gained exits, features, or items.
    pub updated: usize,
    pub conflicts: Vec<ExitConflict>,
    pub integrity_errors: Vec<IdentityIntegrityError>,
}

impl MergeReport {
    /// Accumulate another report into this one.
    pub fn extend(&mut self, other: MergeReport) {
        self.added += other.added;
        self.updated += other.updated;
        self.conflicts.extend(other.conflicts);
        self.integrity_errors.extend(other.integrity_errors);
    }

    /// Record the outcome of absorbing one room.
    pub(crate) fn record(&mut self, outcome: Result<Absorbed, IdentityIntegrityError>) {
        match outcome {
            Ok(Absorbed::Added) => self.added += 1,
            Ok(Absorbed::Merged(merge)) => {
                if merge.changed {
                    self.updated += 1;
                }
                for conflict in merge.conflicts {
                    warn!(%conflict, "exit conflict while merging");
                    self.conflicts.push(conflict);
                }
            }
            Err(err) => {
                warn!(%err, "identity collision while merging");
                self.integrity_errors.push(err);
            }
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.integrity_errors.is_empty()
    }

    pub fn diagnostics(&self) -> Vec<Diagnostic> {
        self.conflicts
            .iter()
            .cloned()
            .map(Diagnostic::ExitConflict)
            .chain(
                self.integrity_errors
                    .iter()
                    .cloned()
                    .map(Diagnostic::IdentityIntegrity),
            )
            .collect()
    }
}

/// Sequential merger over an owned master graph.
#[derive(Debug, Clone, Default)]
pub struct WorldMerger {
    master: WorldGraph,
    report: MergeReport,
}

impl WorldMerger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing master graph.
    pub fn from_graph(master: WorldGraph) -> Self {
        Self {
            master,
            report: MergeReport::default(),
        }
    }

    /// Merge one incoming graph, returning what it changed.
    pub fn merge(&mut self, incoming: &WorldGraph) -> MergeReport {
        let mut report = MergeReport::default();
        for room in incoming.rooms() {
            report.record(self.master.absorb(room.clone()));
        }
        info!(
            added = report.added,
            updated = report.updated,
            conflicts = report.conflicts.len(),
            "merged graph"
        );
        self.report.extend(report.clone());
        report
    }

    pub fn master(&self) -> &WorldGraph {
        &self.master
    }

    /// Totals across every merge so far.
    pub fn report(&self) -> &MergeReport {
        &self.report
    }

    pub fn finish(self) -> (WorldGraph, MergeReport) {
        (self.master, self.report)
    }
}

/// Merge `incoming` graphs into `master` in order.
pub fn merge_graphs<'a, I>(master: WorldGraph, incoming: I) -> (WorldGraph, MergeReport)
where
    I: IntoIterator<Item = &'a WorldGraph>,
{
    let mut merger = WorldMerger::from_graph(master);
    for graph in incoming {
        merger.merge(graph);
    }
    merger.finish()
}
