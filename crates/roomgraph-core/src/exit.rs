//! Exit names, exit targets, and the per-room exit map.
//!
//! Exit targets are ordered by strength: `Unknown < Hidden < Resolved`.
//! [`Exits::offer`] is the only way an exit changes, and it never lets a
//! weaker value replace a stronger one or one resolved target replace
//! another.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::direction::Direction;
use crate::error::CoreError;
use crate::identity::RoomId;

/// The key of an exit: an ordinal direction or a named feature.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ExitName {
    Ordinal(Direction),
    Named(String),
}

impl ExitName {
    /// Build an exit name. Full ordinal spellings always become
    /// [`ExitName::Ordinal`]; everything else is lowercased into a name.
    pub fn new(name: &str) -> Result<Self, CoreError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(CoreError::EmptyExitName);
        }
        Ok(match Direction::from_name(trimmed) {
            Some(dir) => ExitName::Ordinal(dir),
            None => ExitName::Named(trimmed.to_lowercase()),
        })
    }

    /// The ordinal direction, if this is one.
    pub fn direction(&self) -> Option<Direction> {
        match self {
            ExitName::Ordinal(dir) => Some(*dir),
            ExitName::Named(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ExitName::Ordinal(dir) => dir.name(),
            ExitName::Named(name) => name,
        }
    }
}

impl From<Direction> for ExitName {
    fn from(dir: Direction) -> Self {
        ExitName::Ordinal(dir)
    }
}

impl fmt::Display for ExitName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<ExitName> for String {
    fn from(name: ExitName) -> Self {
        name.as_str().to_string()
    }
}

impl TryFrom<String> for ExitName {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        ExitName::new(&value)
    }
}

/// Where an exit leads.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ExitTarget {
    /// Declared by the world, destination not yet observed.
    Unknown,
    /// Proven traversable by a go/enter command, destination not yet observed.
    Hidden,
    /// Destination observed.
    Resolved(RoomId),
}

impl ExitTarget {
    /// Rank used to decide replacement: higher wins.
    pub fn strength(&self) -> u8 {
        match self {
            ExitTarget::Unknown => 0,
            ExitTarget::Hidden => 1,
            ExitTarget::Resolved(_) => 2,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self, ExitTarget::Resolved(_))
    }

    pub fn resolved(&self) -> Option<&RoomId> {
        match self {
            ExitTarget::Resolved(id) => Some(id),
            _ => None,
        }
    }
}

impl fmt::Display for ExitTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExitTarget::Unknown => f.write_str("unknown"),
            ExitTarget::Hidden => f.write_str("hidden"),
            ExitTarget::Resolved(id) => write!(f, "{id}"),
        }
    }
}

impl From<ExitTarget> for String {
    fn from(target: ExitTarget) -> Self {
        target.to_string()
    }
}

impl TryFrom<String> for ExitTarget {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "unknown" => Ok(ExitTarget::Unknown),
            "hidden" => Ok(ExitTarget::Hidden),
            other => Ok(ExitTarget::Resolved(other.parse()?)),
        }
    }
}

/// What [`Exits::offer`] did with an offered target.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Offer {
    /// The key was vacant and now holds the offered target.
    Inserted,
    /// A weaker value was replaced.
    Upgraded { previous: ExitTarget },
    /// The existing value was at least as strong; nothing changed.
    Kept,
    /// Two different resolved targets met. The existing one was kept.
    Conflict { existing: RoomId, offered: RoomId },
}

impl Offer {
    /// Whether the exit map changed.
    pub fn changed(&self) -> bool {
        matches!(self, Offer::Inserted | Offer::Upgraded { .. })
    }
}

/// A room's exit map, ordered by exit name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Exits(BTreeMap<ExitName, ExitTarget>);

impl Exits {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Offer a target for an exit, keeping whichever value is stronger.
    pub fn offer(&mut self, name: ExitName, target: ExitTarget) -> Offer {
        let Some(existing) = self.0.get_mut(&name) else {
            self.0.insert(name, target);
            return Offer::Inserted;
        };
        if let (ExitTarget::Resolved(have), ExitTarget::Resolved(new)) = (&*existing, &target) {
            if have != new {
                return Offer::Conflict {
                    existing: have.clone(),
                    offered: new.clone(),
                };
            }
        }
        if target.strength() > existing.strength() {
            let previous = std::mem::replace(existing, target);
            return Offer::Upgraded { previous };
        }
        Offer::Kept
    }

    pub fn get(&self, name: &ExitName) -> Option<&ExitTarget> {
        self.0.get(name)
    }

    /// Look up an exit by its string form.
    pub fn get_str(&self, name: &str) -> Option<&ExitTarget> {
        ExitName::new(name).ok().and_then(|n| self.0.get(&n))
    }

    pub fn contains(&self, name: &ExitName) -> bool {
        self.0.contains_key(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ExitName, &ExitTarget)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of exits whose destination is known.
    pub fn resolved_count(&self) -> usize {
        self.0.values().filter(|t| t.is_resolved()).count()
    }
}

impl<'a> IntoIterator for &'a Exits {
    type Item = (&'a ExitName, &'a ExitTarget);
    type IntoIter = std::collections::btree_map::Iter<'a, ExitName, ExitTarget>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn room(name: &str) -> RoomId {
        RoomId::compute(name, "")
    }

    #[test]
    fn ordinal_spelling_becomes_ordinal() {
        assert_eq!(
            ExitName::new("North").unwrap(),
            ExitName::Ordinal(Direction::North)
        );
        assert_eq!(
            ExitName::new("Gate").unwrap(),
            ExitName::Named("gate".into())
        );
        assert!(ExitName::new("  ").is_err());
    }

    #[test]
    fn sentinels_upgrade_to_resolved() {
        let mut exits = Exits::new();
        assert_eq!(exits.offer(Direction::East.into(), ExitTarget::Unknown), Offer::Inserted);
        let offer = exits.offer(Direction::East.into(), ExitTarget::Resolved(room("S")));
        assert_eq!(
            offer,
            Offer::Upgraded {
                previous: ExitTarget::Unknown
            }
        );
        assert_eq!(exits.get_str("east"), Some(&ExitTarget::Resolved(room("S"))));
    }

    #[test]
    fn unknown_upgrades_to_hidden_but_not_back() {
        let mut exits = Exits::new();
        let gate = ExitName::new("gate").unwrap();
        exits.offer(gate.clone(), ExitTarget::Unknown);
        assert!(exits.offer(gate.clone(), ExitTarget::Hidden).changed());
        assert_eq!(exits.offer(gate.clone(), ExitTarget::Unknown), Offer::Kept);
        assert_eq!(exits.get(&gate), Some(&ExitTarget::Hidden));
        assert_eq!(exits.len(), 1);
    }

    #[test]
    fn resolved_is_never_weakened() {
        let mut exits = Exits::new();
        exits.offer(Direction::Up.into(), ExitTarget::Resolved(room("Loft")));
        assert_eq!(exits.offer(Direction::Up.into(), ExitTarget::Hidden), Offer::Kept);
        assert_eq!(exits.offer(Direction::Up.into(), ExitTarget::Unknown), Offer::Kept);
        assert_eq!(
            exits.offer(Direction::Up.into(), ExitTarget::Resolved(room("Loft"))),
            Offer::Kept
        );
    }

    #[test]
    fn different_resolved_targets_conflict() {
        let mut exits = Exits::new();
        exits.offer(Direction::East.into(), ExitTarget::Resolved(room("A")));
        let offer = exits.offer(Direction::East.into(), ExitTarget::Resolved(room("B")));
        assert!(matches!(offer, Offer::Conflict { .. }));
        assert_eq!(exits.get_str("east"), Some(&ExitTarget::Resolved(room("A"))));
    }

    #[test]
    fn serializes_as_plain_strings() {
        let mut exits = Exits::new();
        exits.offer(Direction::North.into(), ExitTarget::Unknown);
        exits.offer(ExitName::new("gate").unwrap(), ExitTarget::Hidden);
        let json = serde_json::to_string(&exits).unwrap();
        assert_eq!(json, r#"{"north":"unknown","gate":"hidden"}"#);
        let back: Exits = serde_json::from_str(&json).unwrap();
        assert_eq!(back, exits);
    }
}
