//! CLI command implementations.

pub mod init;
pub mod inspect;
pub mod merge;
pub mod parse;

use roomgraph_core::{Diagnostic, Severity};
use tracing::{error, info, warn};

/// Log each diagnostic at the level its severity calls for and return how
/// many were errors.
pub(crate) fn log_diagnostics(diagnostics: &[Diagnostic]) -> usize {
    let mut errors = 0;
    for diagnostic in diagnostics {
        match diagnostic.severity() {
            Severity::Info => info!("{diagnostic}"),
            Severity::Warning => warn!("{diagnostic}"),
            Severity::Error => {
                error!("{diagnostic}");
                errors += 1;
            }
        }
    }
    errors
}
