// Read-only reference data: known words, proper nouns and the irregular verb table
// A missing or unreadable file degrades to an empty set with a warning

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, warn};

/// Locations of the reference files
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferencePaths {
    pub known_words: PathBuf,
    pub proper_nouns: PathBuf,
    pub mappings: PathBuf,
}

impl Default for ReferencePaths {
    fn default() -> Self {
        Self {
            known_words: PathBuf::from("known-words"),
            proper_nouns: PathBuf::from("proper-nouns"),
            mappings: PathBuf::from("mappings.yml"),
        }
    }
}

/// Word lists and verb mappings consulted by the classifier
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReferenceData {
    /// Lowercase words the reader already knows
    pub known_words: HashSet<String>,
    /// Names matched in their original case
    pub proper_nouns: HashSet<String>,
    /// Irregular or ambiguous lemma → canonical lemma
    pub mappings: HashMap<String, String>,
}

impl ReferenceData {
    pub fn new(
        known_words: HashSet<String>,
        proper_nouns: HashSet<String>,
        mappings: HashMap<String, String>,
    ) -> Self {
        Self {
            known_words,
            proper_nouns,
            mappings,
        }
    }

    /// Load all reference files; never fails, missing data is logged
    pub async fn load(paths: &ReferencePaths) -> Self {
        let data = Self {
            known_words: load_word_list(&paths.known_words).await,
            proper_nouns: load_word_list(&paths.proper_nouns).await,
            mappings: load_mappings(&paths.mappings).await,
        };
        info!(
            "loaded: known={}, proper={}, mappings={}",
            data.known_words.len(),
            data.proper_nouns.len(),
            data.mappings.len()
        );
        data
    }

    pub fn is_known(&self, lower: &str) -> bool {
        self.known_words.contains(lower)
    }

    pub fn is_proper_noun(&self, text: &str) -> bool {
        self.proper_nouns.contains(text)
    }

    pub fn mapping(&self, lemma: &str) -> Option<&str> {
        self.mappings.get(lemma).map(String::as_str)
    }
}

/// One word per line; surrounding whitespace and blank lines are dropped
pub fn parse_word_list(content: &str) -> HashSet<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// YAML mapping of lemma to replacement; an empty document is an empty table
pub fn parse_mappings(content: &str) -> Result<HashMap<String, String>> {
    let mappings: Option<HashMap<String, String>> = serde_yaml::from_str(content)?;
    Ok(mappings.unwrap_or_default())
}

/// Read a word list, or an empty set if it cannot be read
pub async fn load_word_list(path: &Path) -> HashSet<String> {
    match fs::read_to_string(path).await {
        Ok(content) => parse_word_list(&content),
        Err(e) => {
            warn!("Word list {} unavailable, using empty set: {}", path.display(), e);
            HashSet::new()
        }
    }
}

/// Read the verb mapping file, or an empty table if it is missing or corrupt
pub async fn load_mappings(path: &Path) -> HashMap<String, String> {
    let content = match fs::read_to_string(path).await {
        Ok(content) => content,
        Err(e) => {
            warn!("Mapping file {} unavailable, using empty table: {}", path.display(), e);
            return HashMap::new();
        }
    };
    match parse_mappings(&content) {
        Ok(mappings) => mappings,
        Err(e) => {
            warn!("Mapping file {} is not a lemma mapping, using empty table: {}", path.display(), e);
            HashMap::new()
        }
    }
}
