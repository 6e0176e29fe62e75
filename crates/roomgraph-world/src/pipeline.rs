//! Batch processing of transcripts.
//!
//! Transcripts are read, parsed and linked on worker threads, at most one
//! per available core at a time. The resulting partial graphs merge into a
//! [`SharedWorld`] as they finish.
//! An unreadable transcript is reported and skipped without affecting the
//! others.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};
use std::thread;

use roomgraph_core::{Diagnostic, Severity};
use roomgraph_parse::{parse_transcript, ParseError, ParserConfig, Transcript};
use tracing::{info, warn};

use crate::graph::WorldGraph;
use crate::link::link_transcript;
use crate::merge::MergeReport;
use crate::shared::SharedWorld;

/// Result of a batch run.
#[derive(Debug, Clone, Default)]
pub struct BatchOutcome {
    pub world: WorldGraph,
    pub merge: MergeReport,
    /// Every finding, grouped by transcript in input order.
    pub diagnostics: Vec<Diagnostic>,
    /// Transcripts that were read and parsed.
    pub parsed: usize,
    /// Transcripts that could not be read.
    pub failed: usize,
}

impl BatchOutcome {
    /// Whether any error-severity diagnostic was reported.
    pub fn has_errors(&self) -> bool {
        self.diagnostics
            .iter()
            .any(|d| d.severity() == Severity::Error)
    }
}

/// Parse `paths` in parallel and merge them into `master`.
pub fn parse_batch_into(
    master: WorldGraph,
    paths: &[PathBuf],
    config: &ParserConfig,
) -> BatchOutcome {
    let width = thread::available_parallelism().map_or(1, NonZeroUsize::get);
    parse_batch_with_width(master, paths, config, width)
}

/// Like [`parse_batch_into`], running at most `width` transcripts at once.
pub fn parse_batch_with_width(
    master: WorldGraph,
    paths: &[PathBuf],
    config: &ParserConfig,
    width: usize,
) -> BatchOutcome {
    let world = SharedWorld::from_graph(master);

    let mut results: Vec<TranscriptResult> = Vec::with_capacity(paths.len());
    for chunk in paths.chunks(width.max(1)) {
        thread::scope(|scope| {
            let handles: Vec<_> = chunk
                .iter()
                .map(|path| {
                    let world = &world;
                    scope.spawn(move || process(path, config, world))
                })
                .collect();
            results.extend(handles.into_iter().zip(chunk).map(|(handle, path)| {
                handle.join().unwrap_or_else(|_| TranscriptResult::Failed {
                    diagnostic: Diagnostic::FatalIo {
                        source: path.display().to_string(),
                        message: "parser thread panicked".to_string(),
                    },
                })
            }));
        });
    }

    let mut outcome = BatchOutcome::default();
    for result in results {
        match result {
            TranscriptResult::Parsed { diagnostics, merge } => {
                outcome.parsed += 1;
                outcome.diagnostics.extend(diagnostics);
                outcome.diagnostics.extend(merge.diagnostics());
                outcome.merge.extend(merge);
            }
            TranscriptResult::Failed { diagnostic } => {
                outcome.failed += 1;
                outcome.diagnostics.push(diagnostic);
            }
        }
    }

    let mut graph = world.into_graph();
    graph.relabel();
    outcome.world = graph;

    info!(
        parsed = outcome.parsed,
        failed = outcome.failed,
        rooms = outcome.world.room_count(),
        added = outcome.merge.added,
        updated = outcome.merge.updated,
        conflicts = outcome.merge.conflicts.len(),
        "batch complete"
    );
    outcome
}

/// Parse `paths` in parallel into a fresh world.
pub fn parse_batch(paths: &[PathBuf], config: &ParserConfig) -> BatchOutcome {
    parse_batch_into(WorldGraph::new(), paths, config)
}

enum TranscriptResult {
    Parsed {
        diagnostics: Vec<Diagnostic>,
        merge: MergeReport,
    },
    Failed {
        diagnostic: Diagnostic,
    },
}

fn process(path: &Path, config: &ParserConfig, world: &SharedWorld) -> TranscriptResult {
    let transcript = match Transcript::from_path(path) {
        Ok(transcript) => transcript,
        Err(err) => {
            warn!(path = %path.display(), %err, "skipping unreadable transcript");
            let message = match &err {
                ParseError::Io { source: io, .. } => io.to_string(),
            };
            return TranscriptResult::Failed {
                diagnostic: Diagnostic::FatalIo {
                    source: path.display().to_string(),
                    message,
                },
            };
        }
    };

    let parsed = parse_transcript(&transcript, config);
    let linked = link_transcript(parsed);
    info!(
        source = transcript.source(),
        rooms = linked.graph.room_count(),
        links = linked.report.links,
        warnings = linked.report.warnings.len(),
        "parsed transcript"
    );
    let diagnostics = linked.report.diagnostics();
    let merge = world.merge_graph(linked.graph);
    TranscriptResult::Parsed { diagnostics, merge }
}
