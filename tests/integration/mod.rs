// Shared helpers for integration tests

use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

use vocab_harvest::ReferencePaths;

use super::fixtures::{KNOWN_WORDS, MAPPINGS, PROPER_NOUNS};

/// Temporary directory populated with input and reference files
pub struct TestFixture {
    pub temp_dir: TempDir,
    pub root_path: PathBuf,
}

impl TestFixture {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let root_path = temp_dir.path().to_path_buf();
        Self { temp_dir, root_path }
    }

    /// Write `content` at `relative_path`, creating parent directories
    pub fn create_file<P: AsRef<Path>>(&self, relative_path: P, content: &str) -> PathBuf {
        let file_path = self.root_path.join(relative_path);
        if let Some(parent) = file_path.parent() {
            fs::create_dir_all(parent).expect("Failed to create parent directories");
        }
        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    /// Write the fixture word lists and mapping file
    pub fn create_reference_files(&self) -> ReferencePaths {
        ReferencePaths {
            known_words: self.create_file("known-words", KNOWN_WORDS),
            proper_nouns: self.create_file("proper-nouns", PROPER_NOUNS),
            mappings: self.create_file("mappings.yml", MAPPINGS),
        }
    }
}

/// Keys of ranked entries, dropping counts
pub fn keys(items: &[(String, u64)]) -> Vec<&str> {
    items.iter().map(|(key, _)| key.as_str()).collect()
}
