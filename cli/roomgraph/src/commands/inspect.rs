//! `roomgraph inspect`: summaries of a world document.

use std::collections::BTreeMap;
use std::fmt::Write as _;
use std::path::Path;

use anyhow::{Context, Result};
use roomgraph_core::{ExitTarget, Room, UNCLASSIFIED};
use roomgraph_world::{load_world, WorldGraph};

pub fn run(world_path: &Path, room: Option<&str>) -> Result<()> {
    let world =
        load_world(world_path).with_context(|| format!("loading {}", world_path.display()))?;
    let text = match room {
        Some(key) => {
            let room = world
                .find(key)
                .with_context(|| format!("no room matching '{key}' in {}", world_path.display()))?;
            describe_room(&world, room)
        }
        None => summarize(&world),
    };
    print!("{text}");
    Ok(())
}

fn summarize(world: &WorldGraph) -> String {
    let mut unknown = 0;
    let mut hidden = 0;
    let mut resolved = 0;
    let mut regions: BTreeMap<&str, usize> = BTreeMap::new();
    for room in world.rooms() {
        for (_, target) in &room.exits {
            match target {
                ExitTarget::Unknown => unknown += 1,
                ExitTarget::Hidden => hidden += 1,
                ExitTarget::Resolved(_) => resolved += 1,
            }
        }
        *regions
            .entry(room.region.as_deref().unwrap_or(UNCLASSIFIED))
            .or_default() += 1;
    }

    let mut out = String::new();
    let _ = writeln!(out, "Rooms: {}", world.room_count());
    let _ = writeln!(
        out,
        "Exits: {} ({} resolved, {} unknown, {} hidden)",
        resolved + unknown + hidden,
        resolved,
        unknown,
        hidden
    );
    let _ = writeln!(out, "Regions:");
    for (region, count) in &regions {
        let _ = writeln!(out, "  {region:<24} {count}");
    }
    let _ = writeln!(out, "Rooms:");
    let mut rooms: Vec<&Room> = world.rooms().collect();
    rooms.sort_by(|a, b| a.label.cmp(&b.label));
    for room in rooms {
        let _ = writeln!(out, "  {:<32} {}", room.label, room.title);
    }
    out
}

fn describe_room(world: &WorldGraph, room: &Room) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} [{}]", room.title, room.label);
    let _ = writeln!(out, "  id:          {}", room.id);
    if let Some(uid) = &room.uid {
        let _ = writeln!(out, "  uid:         {uid}");
    }
    let _ = writeln!(
        out,
        "  region:      {}",
        room.region.as_deref().unwrap_or(UNCLASSIFIED)
    );
    let _ = writeln!(out, "  provenance:  {}", room.provenance);
    let _ = writeln!(out, "  description: {}", room.description);
    if !room.features.is_empty() {
        let features: Vec<&str> = room.features.iter().map(String::as_str).collect();
        let _ = writeln!(out, "  features:    {}", features.join(", "));
    }
    if !room.static_items.is_empty() {
        let items: Vec<&str> = room.static_items.iter().map(String::as_str).collect();
        let _ = writeln!(out, "  items:       {}", items.join(", "));
    }
    let _ = writeln!(out, "  exits:");
    for (name, target) in &room.exits {
        let shown = match target {
            ExitTarget::Resolved(id) => match world.get(id) {
                Some(to) => format!("{} ({})", to.title, to.label),
                None => format!("{id} (not in this world)"),
            },
            other => other.to_string(),
        };
        let _ = writeln!(out, "    {:<12} -> {shown}", name.as_str());
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use roomgraph_core::{Direction, LineSpan, Provenance};
    use roomgraph_world::save_world;

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
    fn summary_counts_exits_and_regions() {
        let text = summarize(&sample());
        assert!(text.contains("Rooms: 2"));
        assert!(text.contains("Exits: 2 (1 resolved, 1 unknown, 0 hidden)"));
        assert!(text.contains("town"));
        assert!(text.contains(UNCLASSIFIED));
    }

    #[test]
    fn room_view_names_targets() {
        let world = sample();
        let room = world.find("town_square").unwrap();
        let text = describe_room(&world, room);
        assert!(text.contains("Market Row (market_row)"));
        assert!(text.contains("unknown"));
    }

    #[test]
    fn inspect_missing_room_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("world.json");
        save_world(&sample(), &path, false).unwrap();
        run(&path, None).unwrap();
        assert!(run(&path, Some("atlantis")).is_err());
    }
}
