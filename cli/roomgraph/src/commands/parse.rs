//! `roomgraph parse`: transcripts in, world document out.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use roomgraph_world::{load_world, parse_batch_into, save_world, WorldDocument, WorldGraph};

use super::log_diagnostics;
use crate::manifest::RoomgraphManifest;

/// Flags for one `parse` invocation.
#[derive(Debug, Default)]
pub struct ParseOptions<'a> {
    pub transcripts: &'a [PathBuf],
    pub output: Option<&'a Path>,
    /// Existing world to merge the new rooms into.
    pub master: Option<&'a Path>,
    pub region: Option<&'a str>,
    pub pretty: bool,
}

pub fn run(
    project_dir: &Path,
    manifest: Option<&RoomgraphManifest>,
    options: &ParseOptions<'_>,
) -> Result<()> {
    if options.transcripts.is_empty() {
        bail!("no transcripts given");
    }
    let defaults = RoomgraphManifest::default();
    let manifest = manifest.unwrap_or(&defaults);

    let master = match options.master {
        Some(path) => load_world(path).with_context(|| format!("loading {}", path.display()))?,
        None => WorldGraph::new(),
    };

    let config = manifest.parser_config();
    let mut outcome = parse_batch_into(master, options.transcripts, &config);

    let scoped = options.region.or(manifest.project.region.as_deref());
    let table = manifest.region_table();
    outcome.world.annotate_regions(&table, scoped);

    let errors = log_diagnostics(&outcome.diagnostics);

    let output = options
        .output
        .map(Path::to_path_buf)
        .or_else(|| manifest.output.path.as_ref().map(|p| project_dir.join(p)));
    let pretty = options.pretty || manifest.output.pretty;

    match output {
        Some(path) => {
            save_world(&outcome.world, &path, pretty)
                .with_context(|| format!("writing {}", path.display()))?;
            let (exits, resolved) = outcome.world.exit_counts();
            println!(
                "Parsed {} transcript(s): {} rooms, {} exits ({} resolved) -> {}",
                outcome.parsed,
                outcome.world.room_count(),
                exits,
                resolved,
                path.display()
            );
        }
        None => {
            let doc = WorldDocument::from_graph(&outcome.world)?;
            println!("{}", doc.to_json(pretty)?);
        }
    }

    if errors > 0 {
        bail!("{errors} error(s) reported while parsing");
    }
    Ok(())
}
