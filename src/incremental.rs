// WHY: cleaned sentences are cached next to the page text so the extraction
// stage is skipped on reruns unless the caller asks to overwrite

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Suffix of the sentence cache written next to a page-text file
pub const AUX_FILE_SUFFIX: &str = "_sentences.txt";

/// Sentence cache path for a page-text file: `<stem>_sentences.txt`
pub fn generate_aux_file_path(source_path: &Path) -> PathBuf {
    let mut aux_path = source_path.to_path_buf();
    let file_stem = aux_path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unknown");
    aux_path.set_file_name(format!("{file_stem}{AUX_FILE_SUFFIX}"));
    aux_path
}

/// Whether `path` is itself a sentence cache
pub fn is_aux_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.ends_with(AUX_FILE_SUFFIX))
}

pub fn aux_file_exists<P: AsRef<Path>>(source_path: P) -> bool {
    generate_aux_file_path(source_path.as_ref()).exists()
}

/// Cached sentences for a page-text file, one per line
pub fn read_aux_file<P: AsRef<Path>>(source_path: P) -> Result<Vec<String>, io::Error> {
    let aux_path = generate_aux_file_path(source_path.as_ref());
    let content = fs::read_to_string(aux_path)?;
    Ok(content
        .lines()
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect())
}

/// Write the sentence cache with a trailing newline
pub fn create_complete_aux_file<P: AsRef<Path>, S: AsRef<str>>(
    source_path: P,
    sentences: &[S],
) -> Result<PathBuf, io::Error> {
    let aux_path = generate_aux_file_path(source_path.as_ref());
    let mut content = String::new();
    for sentence in sentences {
        content.push_str(sentence.as_ref());
        content.push('\n');
    }
    fs::write(&aux_path, content)?;
    Ok(aux_path)
}

/// Output path of the vocabulary report for an annotation file
pub fn generate_report_path(source_path: &Path, extension: &str) -> PathBuf {
    source_path.with_extension(extension)
}
