//! World assembly: linking transcripts into graphs, merging graphs into a
//! master world, and persisting it.

pub mod document;
pub mod error;
pub mod graph;
pub mod link;
pub mod merge;
pub mod pipeline;
pub mod shared;

pub use document::{load_world, save_world, WorldDocument, FORMAT};
pub use error::{Result, WorldError};
pub use graph::{Absorbed, WorldGraph};
pub use link::{link_transcript, LinkReport, LinkedTranscript, SequenceLinker};
pub use merge::{merge_graphs, MergeReport, WorldMerger};
pub use pipeline::{parse_batch, parse_batch_into, parse_batch_with_width, BatchOutcome};
pub use shared::SharedWorld;
