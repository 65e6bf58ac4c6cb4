// Sentence cleaning: running boundaries and layout artifacts left by page extraction

use regex::Regex;
use std::sync::LazyLock;

use crate::boundary::BoundaryPatterns;

static HYPHEN_LINE_BREAK: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"-+(\s)").unwrap());
static MERGED_CAPITAL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\w)([A-Z])").unwrap());
static STRAY_PUNCTUATION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^\w\s-]").unwrap());
static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Clean one sentence of running headers/footers and extraction artifacts
///
/// Steps, in order: strip header matches, strip footer matches, drop a hyphen
/// that sits before whitespace, split a word character glued to a following
/// capital, remove anything that is not a word character, whitespace or
/// hyphen, collapse whitespace, trim.
///
/// The whole sequence, stripping included, is repeated until the text no
/// longer changes, so cleaning already-clean text is a no-op. A boundary that
/// only appears once punctuation is gone is therefore stripped as well.
pub fn clean_sentence(sentence: &str, patterns: &BoundaryPatterns) -> String {
    let mut current = clean_once(sentence, patterns);
    for _ in 0..max_cleaning_rounds(sentence) {
        let next = clean_once(&current, patterns);
        if next == current {
            break;
        }
        current = next;
    }
    current
}

/// Upper bound on extra rounds: every stripping round removes visible
/// characters and the remaining steps settle within a few rounds
fn max_cleaning_rounds(sentence: &str) -> usize {
    3 * sentence.chars().count() + 3
}

fn clean_once(sentence: &str, patterns: &BoundaryPatterns) -> String {
    let text = patterns.strip_header(sentence);
    let text = patterns.strip_footer(&text);
    let text = HYPHEN_LINE_BREAK.replace_all(&text, "$1");
    let text = MERGED_CAPITAL.replace_all(&text, "$1 $2");
    let text = STRAY_PUNCTUATION.replace_all(&text, "");
    let text = WHITESPACE_RUN.replace_all(&text, " ");
    text.trim().to_string()
}

/// Turn hyphen-marked dialogue into quote-marked dialogue
///
/// A leading " -" opens a spoken line; every other bare hyphen becomes the
/// same quote marker.
pub fn preprocess_dialogue(text: &str) -> String {
    text.replace(" -", " \"").replace('-', "\"")
}

/// Full sentence normalization: cleaning followed by the dialogue pass
pub fn normalize_sentence(sentence: &str, patterns: &BoundaryPatterns) -> String {
    preprocess_dialogue(&clean_sentence(sentence, patterns))
}
