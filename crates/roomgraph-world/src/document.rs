//! World document format.
//!
//! A world is stored as a JSON document:
//!
//! ```json
//! { "format": "roomgraph/1", "rooms": [ ... ], "checksum": "<sha256 hex>" }
//! ```
//!
//! `checksum` is the SHA-256 of the compact JSON encoding of `rooms`.
//! Loading recomputes it and refuses a document that does not match.

use std::path::Path;

use roomgraph_core::identity::hash_hex;
use roomgraph_core::Room;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use crate::error::{Result, WorldError};
use crate::graph::WorldGraph;

/// Format tag written into every document.
pub const FORMAT: &str = "roomgraph/1";

/// A serialized world.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorldDocument {
    pub format: String,
    pub rooms: Vec<Room>,
    pub checksum: String,
}

impl WorldDocument {
    /// Build a document from a graph, rooms in identity order.
    pub fn from_graph(graph: &WorldGraph) -> Result<Self> {
        let rooms: Vec<Room> = graph.rooms().cloned().collect();
        let checksum = checksum(&rooms)?;
        Ok(Self {
            format: FORMAT.to_string(),
            rooms,
            checksum,
        })
    }

    /// Check the format tag and checksum.
    pub fn verify(&self) -> Result<()> {
        if self.format != FORMAT {
            return Err(WorldError::UnsupportedFormat {
                found: self.format.clone(),
                expected: FORMAT.to_string(),
            });
        }
        let actual = checksum(&self.rooms)?;
        if actual != self.checksum {
            return Err(WorldError::IntegrityFailed {
                expected: self.checksum.clone(),
                actual,
            });
        }
        Ok(())
    }

    /// Rebuild the graph. Two records with one identity and differing
    /// content are an error.
    pub fn into_graph(self) -> Result<WorldGraph> {
        let mut graph = WorldGraph::new();
        for room in self.rooms {
            graph.absorb(room)?;
        }
        Ok(graph)
    }

    pub fn to_json(&self, pretty: bool) -> Result<String> {
        let text = if pretty {
            serde_json::to_string_pretty(self)?
        } else {
            serde_json::to_string(self)?
        };
        Ok(text)
    }

    /// Parse and verify a document.
    pub fn from_json(text: &str) -> Result<Self> {
        let doc: WorldDocument = serde_json::from_str(text)?;
        doc.verify()?;
        Ok(doc)
    }
}

/// SHA-256 over the compact JSON encoding of `rooms`.
pub fn checksum(rooms: &[Room]) -> Result<String> {
    let bytes = serde_json::to_vec(rooms)?;
    Ok(hash_hex(&Sha256::digest(&bytes)))
}

/// Write a graph to `path`.
pub fn save_world(graph: &WorldGraph, path: &Path, pretty: bool) -> Result<()> {
    let mut text = WorldDocument::from_graph(graph)?.to_json(pretty)?;
    text.push('\n');
    std::fs::write(path, text).map_err(|source| WorldError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Read and verify a graph from `path`.
pub fn load_world(path: &Path) -> Result<WorldGraph> {
    let text = std::fs::read_to_string(path).map_err(|source| WorldError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    WorldDocument::from_json(&text)?.into_graph()
}

#[cfg(test)]
mod tests {
    use super::*;
    use roomgraph_core::{Direction, ExitTarget, LineSpan, Provenance};

    fn sample() -> WorldGraph {
        let mut a = Room::new("Town Square", "Fountain.", Provenance::new("a.log", LineSpan::at(1)));
        let b = Room::new("Market Row", "Cobbles.", Provenance::new("a.log", LineSpan::at(5)));
        a.exits
            .offer(Direction::North.into(), ExitTarget::Resolved(b.id.clone()));
        a.exits.offer(Direction::East.into(), ExitTarget::Unknown);
        a.region = Some("town".into());
        vec![a, b].into_iter().collect()
    }

    #[test]
    fn save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("world.json");
        let graph = sample();
        save_world(&graph, &path, true).unwrap();
        let loaded = load_world(&path).unwrap();
        assert_eq!(loaded, graph);
    }

    #[test]
    fn exits_serialize_as_plain_strings() {
        let doc = WorldDocument::from_graph(&sample()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&doc.to_json(false).unwrap()).unwrap();
        let square = json["rooms"]
            .as_array()
            .unwrap()
            .iter()
            .find(|r| r["title"] == "Town Square")
            .unwrap();
        assert_eq!(square["exits"]["east"], "unknown");
        assert!(square["exits"]["north"]
            .as_str()
            .unwrap()
            .starts_with("market_row_"));
    }

    #[test]
    fn tampered_document_is_rejected() {
        let doc = WorldDocument::from_graph(&sample()).unwrap();
        let text = doc.to_json(false).unwrap().replace("Fountain.", "Fountain!");
        let err = WorldDocument::from_json(&text).unwrap_err();
        assert!(matches!(err, WorldError::IntegrityFailed { .. }));
    }

    #[test]
    fn unknown_format_is_rejected() {
        let mut doc = WorldDocument::from_graph(&sample()).unwrap();
        doc.format = "roomgraph/0".into();
        let text = doc.to_json(false).unwrap();
        let err = WorldDocument::from_json(&text).unwrap_err();
        assert!(matches!(err, WorldError::UnsupportedFormat { .. }));
    }

    #[test]
    fn missing_file() {
        let err = load_world(Path::new("/no/such/world.json")).unwrap_err();
        assert!(matches!(err, WorldError::Io { .. }));
    }
}
