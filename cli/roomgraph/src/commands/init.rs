//! `roomgraph init`: write a project manifest.

use std::fs;
use std::path::Path;

use anyhow::{bail, Context, Result};

use crate::manifest::{RoomgraphManifest, MANIFEST_FILE};

/// Write `roomgraph.toml` into `dir`. The project name defaults to the
/// directory name.
pub fn run(dir: &Path, name: Option<&str>) -> Result<()> {
    let path = dir.join(MANIFEST_FILE);
    if path.exists() {
        bail!("{} already exists", path.display());
    }
    let name = match name {
        Some(name) => name.to_string(),
        None => dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "world".to_string()),
    };
    fs::write(&path, RoomgraphManifest::template(&name))
        .with_context(|| format!("writing {}", path.display()))?;
    println!("Created {}", path.display());
    Ok(())
}
