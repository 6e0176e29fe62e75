//! Region classification of finished rooms.
//!
//! Regions are a lookup concern outside the parser: a [`RegionLookup`]
//! receives the raw location text of a room and answers with a region tag,
//! falling back to [`UNCLASSIFIED`].

use serde::{Deserialize, Serialize};

/// Tag used when no rule matches.
pub const UNCLASSIFIED: &str = "unclassified";

/// Anything that can turn free-text location names into region tags.
pub trait RegionLookup: Send + Sync {
    /// Best-effort region for a location. Never fails.
    fn classify(&self, location: &str) -> String;
}

/// Location text for a room title: everything before the first comma.
///
/// `"Wehnimer's, North Ring Rd."` yields `"Wehnimer's"`.
pub fn location_of(title: &str) -> &str {
    title.split(',').next().unwrap_or(title).trim()
}

/// A substring rule: every keyword must appear in the location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordRule {
    pub keywords: Vec<String>,
    pub region: String,
}

impl KeywordRule {
    fn matches(&self, lowered: &str) -> bool {
        !self.keywords.is_empty()
            && self
                .keywords
                .iter()
                .all(|k| lowered.contains(&k.to_lowercase()))
    }
}

/// Table-driven lookup: exact names first, then keyword rules in order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionTable {
    #[serde(default)]
    pub exact: Vec<(String, String)>,
    #[serde(default)]
    pub rules: Vec<KeywordRule>,
    #[serde(default)]
    pub fallback: Option<String>,
}

impl RegionTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an exact location name.
    pub fn with_exact(mut self, location: &str, region: &str) -> Self {
        self.exact.push((location.to_string(), region.to_string()));
        self
    }

    /// Add a keyword rule. Rules are tried in insertion order.
    pub fn with_rule(mut self, keywords: &[&str], region: &str) -> Self {
        self.rules.push(KeywordRule {
            keywords: keywords.iter().map(|k| k.to_string()).collect(),
            region: region.to_string(),
        });
        self
    }

    pub fn is_empty(&self) -> bool {
        self.exact.is_empty() && self.rules.is_empty()
    }
}

impl RegionLookup for RegionTable {
    fn classify(&self, location: &str) -> String {
        let location = location.trim();
        if let Some((_, region)) = self
            .exact
            .iter()
            .find(|(name, _)| name.eq_ignore_ascii_case(location))
        {
            return region.clone();
        }
        let lowered = location.to_lowercase();
        self.rules
            .iter()
            .find(|rule| rule.matches(&lowered))
            .map(|rule| rule.region.clone())
            .or_else(|| self.fallback.clone())
            .unwrap_or_else(|| UNCLASSIFIED.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RegionTable {
        RegionTable::new()
            .with_exact("River's Rest", "rr-riversrest")
            .with_rule(&["wehnimer", "graveyard"], "wl-graveyard")
            .with_rule(&["wehnimer"], "wl-town")
    }

    #[test]
    fn exact_match_ignores_case() {
        assert_eq!(table().classify("river's rest"), "rr-riversrest");
    }

    #[test]
    fn rules_apply_in_order() {
        let t = table();
        assert_eq!(t.classify("Wehnimer's Graveyard"), "wl-graveyard");
        assert_eq!(t.classify("Wehnimer's"), "wl-town");
    }

    #[test]
    fn falls_back_to_unclassified() {
        assert_eq!(table().classify("Mist Harbor"), UNCLASSIFIED);
        let t = table();
        let with_fallback = RegionTable {
            fallback: Some("global".into()),
            ..t
        };
        assert_eq!(with_fallback.classify("Mist Harbor"), "global");
    }

    #[test]
    fn location_is_title_prefix() {
        assert_eq!(location_of("Wehnimer's, North Ring Rd."), "Wehnimer's");
        assert_eq!(location_of("Town Square"), "Town Square");
    }
}
