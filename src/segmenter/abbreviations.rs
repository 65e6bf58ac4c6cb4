// Spanish abbreviations that end in a period without ending the sentence

use std::collections::HashSet;

/// Courtesy and professional titles; they precede a name, so a capital follows
pub const TITLE_ABBREVIATIONS: &[&str] = &[
    "Sr.", "Sra.", "Srta.", "Sres.", "Dr.", "Dra.", "Ud.", "Uds.", "Lic.", "Prof.", "D.", "Dña.",
];

/// Lookup for abbreviations that must not split a sentence
pub struct AbbreviationChecker {
    title_abbreviations: HashSet<&'static str>,
}

impl AbbreviationChecker {
    pub fn new() -> Self {
        Self {
            title_abbreviations: TITLE_ABBREVIATIONS.iter().copied().collect(),
        }
    }

    pub fn is_title_abbreviation(&self, word: &str) -> bool {
        self.title_abbreviations.contains(word)
    }

    /// Check whether the last word of `text` is a title abbreviation
    /// Opening quotes and dialogue dashes glued to the word are ignored.
    pub fn ends_with_title_abbreviation(&self, text: &str) -> bool {
        match text.split_whitespace().last() {
            Some(last_word) => {
                let clean_word = last_word.trim_start_matches(|c: char| {
                    matches!(c, '"' | '\'' | '\u{201C}' | '\u{00AB}' | '(' | '-' | '\u{2014}' | '¿' | '¡')
                });
                self.is_title_abbreviation(clean_word)
            }
            None => false,
        }
    }
}

impl Default for AbbreviationChecker {
    fn default() -> Self {
        Self::new()
    }
}
