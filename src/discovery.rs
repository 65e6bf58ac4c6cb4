use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use walkdir::WalkDir;

use crate::incremental::is_aux_file;

/// Expand input paths into the files to process
///
/// Files are taken as given. Directories are walked recursively for files with
/// `extension`, leaving out sentence caches. The result is sorted and free of
/// duplicates so runs are reproducible.
pub fn discover_inputs<P: AsRef<Path>>(paths: &[P], extension: &str) -> Result<Vec<PathBuf>> {
    let mut found = BTreeSet::new();

    for path in paths {
        let path = path.as_ref();
        if path.is_file() {
            found.insert(path.to_path_buf());
            continue;
        }
        if !path.is_dir() {
            anyhow::bail!("Input path does not exist: {}", path.display());
        }

        for entry in WalkDir::new(path).follow_links(false) {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry under {}: {}", path.display(), e);
                    continue;
                }
            };
            let candidate = entry.path();
            let matches_extension = candidate
                .extension()
                .and_then(|ext| ext.to_str())
                .is_some_and(|ext| ext == extension);
            if entry.file_type().is_file() && matches_extension && !is_aux_file(candidate) {
                debug!("Found input: {}", candidate.display());
                found.insert(candidate.to_path_buf());
            }
        }
    }

    let inputs: Vec<PathBuf> = found.into_iter().collect();
    if inputs.is_empty() {
        return Err(anyhow::anyhow!("No .{extension} inputs found")).context("Input discovery");
    }
    Ok(inputs)
}
