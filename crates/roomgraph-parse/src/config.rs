//! Parser vocabulary and deny-lists.
//!
//! Defaults cover the engine output seen in captured sessions; projects
//! extend them from `roomgraph.toml`.

use std::collections::BTreeSet;

/// Prefixes of transient engine output that never describe a room.
pub const DEFAULT_NOISE_PREFIXES: &[&str] = &[
    "You hear the Help thoughts of",
    "Roundtime:",
    "Cast Roundtime",
    "Please rephrase that command.",
    "You are now in a",
    "You can't go there.",
    "Where are you trying to go?",
    "You are wearing",
    "You have",
];

/// Nouns that plausibly name something a player can go into or through.
pub const DEFAULT_EXIT_NOUNS: &[&str] = &[
    "inn", "gate", "arch", "tower", "walkway", "path", "trail", "clearing", "door", "tunnel",
    "ladder", "stair", "staircase", "alcove", "bridge", "portal", "passage", "pass", "hole", "gap",
    "archway", "road", "street", "hall", "hallway", "ledge",
];

/// Structural keywords harvested from descriptions as feature tags.
pub const DEFAULT_FEATURE_KEYWORDS: &[&str] = &[
    "sign", "tower", "path", "arch", "trail", "clearing", "walkway", "gate", "ledge", "pond",
    "pillar", "door", "window", "wall", "bridge",
];

/// Configuration shared by every stage of the line parser.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParserConfig {
    noise_prefixes: Vec<String>,
    exit_nouns: BTreeSet<String>,
    feature_keywords: BTreeSet<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            noise_prefixes: DEFAULT_NOISE_PREFIXES.iter().map(|s| s.to_string()).collect(),
            exit_nouns: DEFAULT_EXIT_NOUNS.iter().map(|s| s.to_string()).collect(),
            feature_keywords: DEFAULT_FEATURE_KEYWORDS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ParserConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add noise prefixes on top of the defaults.
    pub fn with_noise_prefixes<I, S>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for prefix in prefixes {
            let prefix = prefix.into();
            if !prefix.is_empty() && !self.noise_prefixes.contains(&prefix) {
                self.noise_prefixes.push(prefix);
            }
        }
        self
    }

    /// Add exit-capable nouns on top of the defaults.
    pub fn with_exit_nouns<I, S>(mut self, nouns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exit_nouns
            .extend(nouns.into_iter().map(|n| n.into().to_lowercase()));
        self
    }

    /// Add feature keywords on top of the defaults.
    pub fn with_feature_keywords<I, S>(mut self, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.feature_keywords
            .extend(keywords.into_iter().map(|k| k.into().to_lowercase()));
        self
    }

    /// Whether a line is transient engine output.
    pub fn is_noise(&self, line: &str) -> bool {
        let line = line.trim_start();
        self.noise_prefixes.iter().any(|p| line.starts_with(p.as_str()))
    }

    pub fn noise_prefixes(&self) -> &[String] {
        &self.noise_prefixes
    }

    pub fn is_exit_noun(&self, word: &str) -> bool {
        self.exit_nouns.contains(word)
    }

    pub fn exit_nouns(&self) -> impl Iterator<Item = &str> {
        self.exit_nouns.iter().map(String::as_str)
    }

    /// Feature keywords appearing as whole words in `text`, lowercased.
    pub fn features_in(&self, text: &str) -> Vec<String> {
        let mut found = Vec::new();
        for word in words(text) {
            if self.feature_keywords.contains(&word) && !found.contains(&word) {
                found.push(word);
            }
        }
        found
    }
}

/// Lowercased alphanumeric words of `text`.
pub(crate) fn words(text: &str) -> impl Iterator<Item = String> + '_ {
    text.split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .map(str::to_lowercase)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn noise_matches_prefix_only() {
        let config = ParserConfig::default();
        assert!(config.is_noise("Roundtime: 3 sec."));
        assert!(config.is_noise("  You can't go there."));
        assert!(!config.is_noise("A sign reads: Roundtime: never."));
    }

    #[test]
    fn extra_noise_prefixes() {
        let config = ParserConfig::default().with_noise_prefixes(["[LNet]"]);
        assert!(config.is_noise("[LNet] someone says hi"));
        let n = config.noise_prefixes().len();
        let again = config.with_noise_prefixes(["[LNet]"]);
        assert_eq!(again.noise_prefixes().len(), n);
    }

    #[test]
    fn features_are_whole_words() {
        let config = ParserConfig::default();
        let found = config.features_in("A Gate stands beside the gatehouse wall. The gate creaks.");
        assert_eq!(found, vec!["gate".to_string(), "wall".to_string()]);
    }

    #[test]
    fn custom_vocabulary() {
        let config = ParserConfig::default()
            .with_exit_nouns(["Hatch"])
            .with_feature_keywords(["Fountain"]);
        assert!(config.is_exit_noun("hatch"));
        assert_eq!(config.features_in("A fountain."), vec!["fountain".to_string()]);
    }
}
