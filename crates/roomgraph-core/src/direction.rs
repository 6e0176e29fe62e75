//! The eleven ordinal movement directions.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// An ordinal direction a player can move in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    North,
    South,
    East,
    West,
    Northeast,
    Northwest,
    Southeast,
    Southwest,
    Up,
    Down,
    Out,
}

impl Direction {
    /// All directions in declaration order.
    pub const ALL: [Direction; 11] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::Northeast,
        Direction::Northwest,
        Direction::Southeast,
        Direction::Southwest,
        Direction::Up,
        Direction::Down,
        Direction::Out,
    ];

    /// Full lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            Direction::North => "north",
            Direction::South => "south",
            Direction::East => "east",
            Direction::West => "west",
            Direction::Northeast => "northeast",
            Direction::Northwest => "northwest",
            Direction::Southeast => "southeast",
            Direction::Southwest => "southwest",
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Out => "out",
        }
    }

    /// Match a full direction name only (no abbreviations).
    pub fn from_name(name: &str) -> Option<Direction> {
        let name = name.trim();
        Direction::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(name))
    }

    /// Match a full name or one of the standard abbreviations.
    pub fn parse_token(token: &str) -> Option<Direction> {
        let token = token.trim().to_ascii_lowercase();
        let abbreviated = match token.as_str() {
            "n" => Some(Direction::North),
            "s" => Some(Direction::South),
            "e" => Some(Direction::East),
            "w" => Some(Direction::West),
            "ne" => Some(Direction::Northeast),
            "nw" => Some(Direction::Northwest),
            "se" => Some(Direction::Southeast),
            "sw" => Some(Direction::Southwest),
            "u" => Some(Direction::Up),
            "d" => Some(Direction::Down),
            _ => None,
        };
        abbreviated.or_else(|| Direction::from_name(&token))
    }

    /// The direction that leads back, if the geometry defines one.
    ///
    /// `Out` has no fixed counterpart: leaving a building does not say which
    /// way the building lies from the street.
    pub fn reverse(&self) -> Option<Direction> {
        use Direction::*;
        match self {
            North => Some(South),
            South => Some(North),
            East => Some(West),
            West => Some(East),
            Northeast => Some(Southwest),
            Southwest => Some(Northeast),
            Northwest => Some(Southeast),
            Southeast => Some(Northwest),
            Up => Some(Down),
            Down => Some(Up),
            Out => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Direction {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::parse_token(s).ok_or_else(|| CoreError::InvalidDirection(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abbreviations_expand() {
        assert_eq!(Direction::parse_token("ne"), Some(Direction::Northeast));
        assert_eq!(Direction::parse_token("U"), Some(Direction::Up));
        assert_eq!(Direction::parse_token("south"), Some(Direction::South));
        assert_eq!(Direction::parse_token("look"), None);
    }

    #[test]
    fn from_name_rejects_abbreviations() {
        assert_eq!(Direction::from_name("n"), None);
        assert_eq!(Direction::from_name("North"), Some(Direction::North));
    }

    #[test]
    fn reverse_is_an_involution() {
        for dir in Direction::ALL {
            if let Some(rev) = dir.reverse() {
                assert_eq!(rev.reverse(), Some(dir), "{dir} does not round-trip");
            }
        }
    }

    #[test]
    fn out_has_no_reverse() {
        assert_eq!(Direction::Out.reverse(), None);
    }

    #[test]
    fn from_str_reports_bad_token() {
        let err = "sideways".parse::<Direction>().unwrap_err();
        assert!(err.to_string().contains("sideways"));
    }
}
