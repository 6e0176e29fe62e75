//! Whole-pipeline behavior: transcript text in, linked and merged rooms out.

use roomgraph_core::{ExitTarget, Room, RoomId};
use roomgraph_parse::{parse_transcript, ExitConfirmationEngine, ParserConfig, Transcript};
use roomgraph_world::{link_transcript, merge_graphs, LinkedTranscript, WorldGraph};

fn run(source: &str, text: &str) -> LinkedTranscript {
    let parsed = parse_transcript(&Transcript::from_text(source, text), &ParserConfig::default());
    link_transcript(parsed)
}

fn room<'a>(graph: &'a WorldGraph, title: &str) -> &'a Room {
    graph
        .rooms()
        .find(|r| r.title == title)
        .unwrap_or_else(|| panic!("no room titled {title}"))
}

const TOWN: &str = "[Town Square]\n\
A fountain bubbles quietly.\n\
Obvious exits: north, east.\n\
>north\n\
[Market Row]\n\
Cobblestones line the street.\n";

#[test]
fn town_square_to_market_row() {
    let out = run("town.log", TOWN);
    assert_eq!(out.graph.room_count(), 2);

    let square = room(&out.graph, "Town Square");
    let market = room(&out.graph, "Market Row");
    assert_eq!(
        square.exits.get_str("north"),
        Some(&ExitTarget::Resolved(market.id.clone()))
    );
    assert_eq!(
        market.exits.get_str("south"),
        Some(&ExitTarget::Resolved(square.id.clone()))
    );
    assert_eq!(square.exits.get_str("east"), Some(&ExitTarget::Unknown));
    assert_eq!(square.provenance.source, "town.log");
}

#[test]
fn parsing_twice_gives_the_same_rooms() {
    let first = run("town.log", TOWN);
    let second = run("town.log", TOWN);
    assert_eq!(first.graph, second.graph);
}

#[test]
fn wrapping_does_not_change_identity() {
    let wrapped = run("a.log", "[Lane]\nA quiet lane\n   runs   east.\n");
    let flat = run("b.log", "[Lane]\nA quiet lane runs east.\n");
    assert_eq!(room(&wrapped.graph, "Lane").id, room(&flat.graph, "Lane").id);
    assert_eq!(
        room(&flat.graph, "Lane").id,
        RoomId::compute("Lane", "A quiet lane runs east.")
    );
}

#[test]
fn scenery_and_actors_do_not_change_identity() {
    let busy = run(
        "a.log",
        "[Lane]\nA quiet lane runs east. You also see a cart and a dog.\nAlso here: Zoso\n",
    );
    let empty = run("b.log", "[Lane]\nA quiet lane runs east.\n");
    assert_eq!(room(&busy.graph, "Lane").id, room(&empty.graph, "Lane").id);
}

#[test]
fn abbreviated_go_confirms_only_the_matching_candidate() {
    let mut engine = ExitConfirmationEngine::new();
    engine.register(["walkway".to_string(), "gate".to_string()]);
    assert_eq!(engine.confirm("walk").map(|c| c.key().to_string()), Some("walkway".into()));

    let out = run(
        "yard.log",
        "[Yard]\nMud.\nYou also see a narrow walkway and a gate.\n>go ga\n>go walk\n[Walkway]\nPlanks.\n",
    );
    let yard = room(&out.graph, "Yard");
    let walkway = room(&out.graph, "Walkway");
    assert!(yard.static_items.contains("walkway"));
    assert!(!yard.static_items.contains("gate"));
    assert_eq!(yard.exits.get_str("ga"), Some(&ExitTarget::Hidden));
    assert_eq!(
        yard.exits.get_str("walkway"),
        Some(&ExitTarget::Resolved(walkway.id.clone()))
    );
    assert!(yard.exits.get_str("gate").is_none());
}

#[test]
fn returning_to_the_same_room_makes_no_self_exit() {
    let out = run("loop.log", "[Fog]\nGrey everywhere.\n>west\n[Fog]\nGrey everywhere.\n");
    let fog = room(&out.graph, "Fog");
    assert!(fog.exits.iter().all(|(_, target)| target.resolved() != Some(&fog.id)));
    assert_eq!(out.report.self_loops.len(), 1);
}

#[test]
fn reverse_exits_only_for_ordinals() {
    let out = run(
        "walk.log",
        "[A]\nFirst.\n>north\n[B]\nSecond.\nYou also see a gate.\n>go gate\n[C]\nThird.\n",
    );
    let a = room(&out.graph, "A");
    let b = room(&out.graph, "B");
    let c = room(&out.graph, "C");
    assert_eq!(b.exits.get_str("south"), Some(&ExitTarget::Resolved(a.id.clone())));
    assert_eq!(b.exits.get_str("gate"), Some(&ExitTarget::Resolved(c.id.clone())));
    assert!(c.exits.is_empty());
}

#[test]
fn merging_resolves_unknown_exits() {
    let declared = run("a.log", "[R]\nRoom R.\nObvious exits: east.\n");
    let walked = run("b.log", "[R]\nRoom R.\n>east\n[S]\nRoom S.\n");
    let (master, report) = merge_graphs(WorldGraph::new(), [&declared.graph, &walked.graph]);
    let r = room(&master, "R");
    let s = room(&master, "S");
    assert_eq!(r.exits.get_str("east"), Some(&ExitTarget::Resolved(s.id.clone())));
    assert!(report.conflicts.is_empty());
}

#[test]
fn merging_conflicting_targets_keeps_the_first() {
    let to_s = run("a.log", "[R]\nRoom R.\n>east\n[S]\nRoom S.\n");
    let to_t = run("b.log", "[R]\nRoom R.\n>east\n[T]\nRoom T.\n");
    let (master, report) = merge_graphs(WorldGraph::new(), [&to_s.graph, &to_t.graph]);
    let r = room(&master, "R");
    let s = room(&master, "S");
    assert_eq!(r.exits.get_str("east"), Some(&ExitTarget::Resolved(s.id.clone())));
    assert_eq!(report.conflicts.len(), 1);
    assert_eq!(master.room_count(), 3);
}

#[test]
fn merge_order_does_not_change_the_master() {
    let a = run("a.log", "[R]\nRoom R.\nObvious exits: east.\n");
    let b = run("b.log", "\n\n[R]\nRoom R.\n>east\n[S]\nRoom S.\n");
    let (ab, _) = merge_graphs(WorldGraph::new(), [&a.graph, &b.graph]);
    let (ba, _) = merge_graphs(WorldGraph::new(), [&b.graph, &a.graph]);
    assert_eq!(ab, ba);
    assert_eq!(room(&ab, "R").provenance.source, "a.log");
}

#[test]
fn merge_is_idempotent() {
    let out = run("town.log", TOWN);
    let (once, _) = merge_graphs(WorldGraph::new(), [&out.graph]);
    let (twice, report) = merge_graphs(once.clone(), [&out.graph]);
    assert_eq!(once, twice);
    assert_eq!(report.added, 0);
    assert_eq!(report.updated, 0);
}
