// Rule-based sentence splitting for page text
// Candidate boundaries come from one compiled pattern; title abbreviations veto a split

use anyhow::Result;
use regex_automata::meta::Regex;
use tracing::debug;

pub mod abbreviations;

pub use abbreviations::AbbreviationChecker;

/// Terminal punctuation, optional closers, whitespace, optional openers, capital
const BOUNDARY_PATTERN: &str = r#"[.!?…]+["'»”’)\]]*\s+[¿¡«"'“(\[\-—]*\p{Lu}"#;

/// A sentence as found in the source text, before cleaning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedSentence {
    pub index: usize,
    pub raw: String,
}

/// Splits running text into sentences
pub struct SentenceSegmenter {
    boundary: Regex,
    abbreviations: AbbreviationChecker,
}

impl SentenceSegmenter {
    pub fn new() -> Result<Self> {
        Ok(Self {
            boundary: Regex::new(BOUNDARY_PATTERN)?,
            abbreviations: AbbreviationChecker::new(),
        })
    }

    /// Split `text` into trimmed, non-empty sentences in source order
    ///
    /// Trailing text without terminal punctuation forms the last sentence.
    pub fn segment(&self, text: &str) -> Vec<DetectedSentence> {
        let mut sentences = Vec::new();
        let mut start = 0;

        for found in self.boundary.find_iter(text) {
            let candidate = &text[found.start()..found.end()];
            // End of sentence is the first whitespace inside the match
            let Some(gap) = candidate.find(char::is_whitespace) else {
                continue;
            };
            let end = found.start() + gap;
            if end <= start {
                continue;
            }

            let preceding = &text[start..end];
            if self.abbreviations.ends_with_title_abbreviation(preceding) {
                continue;
            }

            push_sentence(&mut sentences, preceding);
            start = end;
        }

        push_sentence(&mut sentences, &text[start..]);
        debug!("Segmented {} sentences from {} bytes", sentences.len(), text.len());
        sentences
    }
}

fn push_sentence(sentences: &mut Vec<DetectedSentence>, raw: &str) {
    let trimmed = raw.trim();
    if !trimmed.is_empty() {
        sentences.push(DetectedSentence {
            index: sentences.len(),
            raw: trimmed.to_string(),
        });
    }
}
