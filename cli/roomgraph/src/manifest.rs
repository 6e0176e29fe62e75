//! `roomgraph.toml` project configuration.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use roomgraph_core::region::KeywordRule;
use roomgraph_core::RegionTable;
use roomgraph_parse::ParserConfig;
use serde::{Deserialize, Serialize};

/// File name searched for by [`RoomgraphManifest::find_and_load`].
pub const MANIFEST_FILE: &str = "roomgraph.toml";

/// The top-level manifest for a mapping project.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RoomgraphManifest {
    #[serde(default)]
    pub project: ProjectConfig,
    #[serde(default)]
    pub parser: ParserSection,
    #[serde(default)]
    pub regions: RegionsSection,
    #[serde(default)]
    pub output: OutputSection,
}

/// Project metadata section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub name: Option<String>,
    /// Region applied to every parsed room, as if passed with `--region`.
    #[serde(default)]
    pub region: Option<String>,
}

/// Vocabulary added on top of the built-in defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParserSection {
    #[serde(default)]
    pub noise_prefixes: Vec<String>,
    #[serde(default)]
    pub exit_nouns: Vec<String>,
    #[serde(default)]
    pub feature_keywords: Vec<String>,
}

/// Location-to-region table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegionsSection {
    /// Exact location names.
    #[serde(default)]
    pub exact: BTreeMap<String, String>,
    /// Keyword rules, tried in order.
    #[serde(default)]
    pub rules: Vec<KeywordRule>,
    #[serde(default)]
    pub fallback: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputSection {
    /// Default world file for `parse`.
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub pretty: bool,
}

impl RoomgraphManifest {
    /// Search upward from `start_dir` for a `roomgraph.toml` file, parse it,
    /// and return it with the directory it was found in.
    pub fn find_and_load(start_dir: &Path) -> Result<Option<(Self, PathBuf)>> {
        let mut dir = start_dir.to_path_buf();
        loop {
            let candidate = dir.join(MANIFEST_FILE);
            if candidate.is_file() {
                let content = std::fs::read_to_string(&candidate)
                    .with_context(|| format!("reading {}", candidate.display()))?;
                let manifest: RoomgraphManifest = toml::from_str(&content)
                    .with_context(|| format!("parsing {}", candidate.display()))?;
                return Ok(Some((manifest, dir)));
            }
            if !dir.pop() {
                break;
            }
        }
        Ok(None)
    }

    #[cfg(test)]
    pub fn from_str(s: &str) -> Result<Self> {
        toml::from_str(s).context("parsing roomgraph.toml")
    }

    pub fn parser_config(&self) -> ParserConfig {
        ParserConfig::default()
            .with_noise_prefixes(self.parser.noise_prefixes.iter().cloned())
            .with_exit_nouns(self.parser.exit_nouns.iter().cloned())
            .with_feature_keywords(self.parser.feature_keywords.iter().cloned())
    }

    pub fn region_table(&self) -> RegionTable {
        RegionTable {
            exact: self
                .regions
                .exact
                .iter()
                .map(|(name, region)| (name.clone(), region.clone()))
                .collect(),
            rules: self.regions.rules.clone(),
            fallback: self.regions.fallback.clone(),
        }
    }

    /// Template written by `roomgraph init`.
    pub fn template(name: &str) -> String {
        format!(
            r#"[project]
name = "{name}"
# region = "wehnimers_landing"

[parser]
noise_prefixes = []
exit_nouns = []
feature_keywords = []

[regions]
fallback = "unclassified"

[regions.exact]
# "Wehnimer's" = "wehnimers_landing"

# [[regions.rules]]
# keywords = ["illistim"]
# region = "ta_illistim"

[output]
path = "world.json"
pretty = true
"#
        )
    }
}
