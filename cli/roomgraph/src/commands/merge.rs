//! `roomgraph merge`: fold world documents into a master world.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use roomgraph_world::{load_world, merge_graphs, save_world, WorldGraph};

use super::log_diagnostics;

/// Merge `incoming` worlds into `master`, writing to `output` (the master
/// file itself when no output is given). A missing master starts empty.
pub fn run(master: &Path, incoming: &[PathBuf], output: Option<&Path>, pretty: bool) -> Result<()> {
    let base = if master.exists() {
        load_world(master).with_context(|| format!("loading {}", master.display()))?
    } else {
        WorldGraph::new()
    };

    let mut graphs = Vec::with_capacity(incoming.len());
    for path in incoming {
        let graph = load_world(path).with_context(|| format!("loading {}", path.display()))?;
        graphs.push(graph);
    }

    let (mut world, report) = merge_graphs(base, &graphs);
    world.relabel();
    let errors = log_diagnostics(&report.diagnostics());

    let output = output.unwrap_or(master);
    save_world(&world, output, pretty).with_context(|| format!("writing {}", output.display()))?;
    println!(
        "Merged {} world(s): {} added, {} updated, {} conflict(s) -> {}",
        graphs.len(),
        report.added,
        report.updated,
        report.conflicts.len(),
        output.display()
    );

    if errors > 0 {
        bail!("{errors} identity collision(s) refused during merge");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use roomgraph_core::{Direction, ExitTarget, LineSpan, Provenance, Room, RoomId};

    fn room_with_east(target: ExitTarget) -> WorldGraph {
        let mut r = Room::new("R", "Room R.", Provenance::new("t.log", LineSpan::at(1)));
        r.exits.offer(Direction::East.into(), target);
        vec![r].into_iter().collect()
    }

    #[test]
    fn merge_upgrades_master_in_place() {
        let dir = tempfile::tempdir().unwrap();
        let master = dir.path().join("master.json");
        let incoming = dir.path().join("incoming.json");
        let s = RoomId::compute("S", "Room S.");
        save_world(&room_with_east(ExitTarget::Unknown), &master, false).unwrap();
        save_world(&room_with_east(ExitTarget::Resolved(s.clone())), &incoming, false).unwrap();

        run(&master, &[incoming], None, false).unwrap();

        let world = load_world(&master).unwrap();
        let r = world.rooms().next().unwrap();
        assert_eq!(r.exits.get_str("east"), Some(&ExitTarget::Resolved(s)));
    }

    #[test]
    fn missing_master_starts_empty() {
        let dir = tempfile::tempdir().unwrap();
        let incoming = dir.path().join("incoming.json");
        save_world(&room_with_east(ExitTarget::Hidden), &incoming, false).unwrap();
        let out = dir.path().join("out.json");

        run(&dir.path().join("none.json"), &[incoming], Some(&out), true).unwrap();
        assert_eq!(load_world(&out).unwrap().room_count(), 1);
    }

    #[test]
    fn unreadable_incoming_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let master = dir.path().join("master.json");
        let err = run(&master, &[dir.path().join("nope.json")], None, false).unwrap_err();
        assert!(format!("{err:#}").contains("nope.json"));
    }
}
