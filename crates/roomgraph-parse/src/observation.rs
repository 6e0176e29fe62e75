//! In-progress room observations.

use std::collections::BTreeSet;

use roomgraph_core::{
    Direction, ExitName, ExitTarget, Exits, LineSpan, ParseWarning, Provenance, Room,
};
use tracing::debug;

use crate::config::ParserConfig;
use crate::confirm::{Confirmation, ExitConfirmationEngine};
use crate::scenery;

/// Lines accumulated for one header occurrence.
#[derive(Debug, Clone)]
pub struct RoomObservation {
    title: String,
    uid: Option<String>,
    description: Vec<String>,
    exits: Exits,
    features: BTreeSet<String>,
    static_items: BTreeSet<String>,
    engine: ExitConfirmationEngine,
    saw_declared_exits: bool,
    lines: LineSpan,
}

impl RoomObservation {
    /// Start an observation at a header line.
    pub fn open(title: &str, uid: Option<&str>, line: usize) -> Self {
        Self {
            title: title.trim().to_string(),
            uid: uid.map(str::to_string),
            description: Vec::new(),
            exits: Exits::new(),
            features: BTreeSet::new(),
            static_items: BTreeSet::new(),
            engine: ExitConfirmationEngine::new(),
            saw_declared_exits: false,
            lines: LineSpan::at(line),
        }
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn lines(&self) -> LineSpan {
        self.lines
    }

    pub fn candidates(&self) -> &[String] {
        self.engine.candidates()
    }

    /// Extend the line span to cover `line`.
    pub fn touch(&mut self, line: usize) {
        self.lines.include(line);
    }

    /// Append description text and harvest feature keywords from it.
    pub fn push_description(&mut self, text: &str, config: &ParserConfig, line: usize) {
        self.touch(line);
        let text = text.trim();
        if text.is_empty() {
            return;
        }
        self.features.extend(config.features_in(text));
        self.description.push(text.to_string());
    }

    /// Register a scenery mention as unconfirmed exit candidates.
    ///
    /// The mention itself never reaches the description.
    pub fn note_scenery(&mut self, mention: &str, config: &ParserConfig, line: usize) {
        self.touch(line);
        let keys = scenery::candidates(mention, config);
        debug!(room = %self.title, candidates = ?keys, "harvested scenery candidates");
        self.engine.register(keys);
    }

    /// Record an obvious-exits line. Only full ordinal names are accepted.
    pub fn declare_exits(&mut self, list: &str, line: usize) -> Vec<ParseWarning> {
        self.touch(line);
        self.saw_declared_exits = true;
        let mut warnings = Vec::new();
        for item in scenery::split_list(list) {
            let token = item.trim_matches(|c: char| !c.is_alphanumeric()).to_lowercase();
            if token.is_empty() || token == "none" {
                continue;
            }
            match Direction::from_name(&token) {
                Some(direction) => {
                    self.exits.offer(direction.into(), ExitTarget::Unknown);
                }
                None => warnings.push(ParseWarning::UnknownDeclaredExit { line, token }),
            }
        }
        debug!(room = %self.title, exits = self.exits.len(), "declared exits");
        warnings
    }

    /// Apply a go/enter command issued while this room is still open.
    ///
    /// Returns the exit name the movement used, or `None` when the target
    /// has nothing usable in it.
    pub fn go_enter(&mut self, target: &str, line: usize) -> Option<ExitName> {
        self.touch(line);
        let confirmation = self.engine.confirm(target)?;
        let name = ExitName::new(confirmation.key()).ok()?;
        if let Confirmation::Candidate(key) = &confirmation {
            self.static_items.insert(key.clone());
        }
        self.exits.offer(name.clone(), ExitTarget::Hidden);
        Some(name)
    }

    /// Close the observation into a room record.
    pub fn finalize(self, source: &str) -> Room {
        let description = self.description.join(" ");
        let mut room = Room::new(&self.title, &description, Provenance::new(source, self.lines));
        room.uid = self.uid;
        room.exits = self.exits;
        room.features = self.features;
        room.static_items = self.static_items;
        room.saw_declared_exits = self.saw_declared_exits;
        debug!(
            room = %room.id,
            exits = room.exits.len(),
            features = room.features.len(),
            lines = %room.provenance.lines,
            "finalized room"
        );
        room
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roomgraph_core::RoomId;

    #[test]
    fn description_is_joined_and_normalized() {
        let config = ParserConfig::default();
        let mut obs = RoomObservation::open("Town Square", None, 1);
        obs.push_description("A fountain   bubbles", &config, 2);
        obs.push_description("quietly near a wall.", &config, 3);
        let room = obs.finalize("t.log");
        assert_eq!(room.description, "A fountain bubbles quietly near a wall.");
        assert_eq!(
            room.id,
            RoomId::compute("Town Square", "A fountain bubbles quietly near a wall.")
        );
        assert!(room.features.contains("wall"));
        assert_eq!(room.provenance.lines, LineSpan { start: 1, end: 3 });
    }

    #[test]
    fn declared_exits_are_unknown() {
        let mut obs = RoomObservation::open("Hall", None, 1);
        let warnings = obs.declare_exits("north, east and up.", 2);
        assert!(warnings.is_empty());
        let room = obs.finalize("t.log");
        assert!(room.saw_declared_exits);
        assert_eq!(room.exits.get_str("north"), Some(&ExitTarget::Unknown));
        assert_eq!(room.exits.get_str("up"), Some(&ExitTarget::Unknown));
        assert_eq!(room.exits.len(), 3);
    }

    #[test]
    fn declared_non_ordinals_warn() {
        let mut obs = RoomObservation::open("Hall", None, 1);
        let warnings = obs.declare_exits("none", 2);
        assert!(warnings.is_empty());
        let warnings = obs.declare_exits("north, gate, ne", 3);
        assert_eq!(
            warnings,
            vec![
                ParseWarning::UnknownDeclaredExit {
                    line: 3,
                    token: "gate".into()
                },
                ParseWarning::UnknownDeclaredExit {
                    line: 3,
                    token: "ne".into()
                },
            ]
        );
    }

    #[test]
    fn scenery_does_not_touch_identity() {
        let config = ParserConfig::default();
        let mut a = RoomObservation::open("Lane", None, 1);
        a.push_description("A quiet lane.", &config, 2);
        a.note_scenery("a cart and a barrel.", &config, 3);
        let mut b = RoomObservation::open("Lane", None, 10);
        b.push_description("A quiet lane.", &config, 11);
        assert_eq!(a.finalize("a").id, b.finalize("b").id);
    }

    #[test]
    fn go_enter_confirms_candidate() {
        let config = ParserConfig::default();
        let mut obs = RoomObservation::open("Yard", None, 1);
        obs.note_scenery("a narrow walkway and a gate", &config, 2);
        let name = obs.go_enter("walk", 3).unwrap();
        assert_eq!(name.as_str(), "walkway");
        let room = obs.finalize("t.log");
        assert!(room.static_items.contains("walkway"));
        assert_eq!(room.exits.get_str("walkway"), Some(&ExitTarget::Hidden));
        assert!(room.exits.get_str("gate").is_none());
    }

    #[test]
    fn go_enter_without_candidate_still_proves_an_exit() {
        let config = ParserConfig::default();
        let mut obs = RoomObservation::open("Yard", None, 1);
        obs.note_scenery("a gate", &config, 2);
        let name = obs.go_enter("ga", 3).unwrap();
        assert_eq!(name.as_str(), "ga");
        assert!(obs.go_enter("the", 4).is_none());
        let room = obs.finalize("t.log");
        assert!(room.static_items.is_empty());
        assert_eq!(room.exits.get_str("ga"), Some(&ExitTarget::Hidden));
    }

    #[test]
    fn uid_is_kept_but_not_identity() {
        let a = RoomObservation::open("Hall", Some("u1"), 1).finalize("a");
        let b = RoomObservation::open("Hall", None, 1).finalize("b");
        assert_eq!(a.uid.as_deref(), Some("u1"));
        assert_eq!(a.id, b.id);
    }
}
