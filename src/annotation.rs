// Token annotations supplied by an external tagger, and the CoNLL-U adapter that reads them
// The classifier only reads these; missing tagger data is reported, never guessed

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Universal Dependencies part-of-speech tag
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PartOfSpeech {
    Adj,
    Adp,
    Adv,
    Aux,
    Cconj,
    Det,
    Intj,
    Noun,
    Num,
    Part,
    Pron,
    Propn,
    Punct,
    Sconj,
    Sym,
    Verb,
    X,
    #[serde(untagged)]
    Other(String),
}

impl PartOfSpeech {
    pub fn is_verb(&self) -> bool {
        matches!(self, PartOfSpeech::Verb)
    }

    pub fn as_str(&self) -> &str {
        match self {
            PartOfSpeech::Adj => "ADJ",
            PartOfSpeech::Adp => "ADP",
            PartOfSpeech::Adv => "ADV",
            PartOfSpeech::Aux => "AUX",
            PartOfSpeech::Cconj => "CCONJ",
            PartOfSpeech::Det => "DET",
            PartOfSpeech::Intj => "INTJ",
            PartOfSpeech::Noun => "NOUN",
            PartOfSpeech::Num => "NUM",
            PartOfSpeech::Part => "PART",
            PartOfSpeech::Pron => "PRON",
            PartOfSpeech::Propn => "PROPN",
            PartOfSpeech::Punct => "PUNCT",
            PartOfSpeech::Sconj => "SCONJ",
            PartOfSpeech::Sym => "SYM",
            PartOfSpeech::Verb => "VERB",
            PartOfSpeech::X => "X",
            PartOfSpeech::Other(tag) => tag,
        }
    }
}

impl From<&str> for PartOfSpeech {
    fn from(tag: &str) -> Self {
        match tag {
            "ADJ" => PartOfSpeech::Adj,
            "ADP" => PartOfSpeech::Adp,
            "ADV" => PartOfSpeech::Adv,
            "AUX" => PartOfSpeech::Aux,
            "CCONJ" => PartOfSpeech::Cconj,
            "DET" => PartOfSpeech::Det,
            "INTJ" => PartOfSpeech::Intj,
            "NOUN" => PartOfSpeech::Noun,
            "NUM" => PartOfSpeech::Num,
            "PART" => PartOfSpeech::Part,
            "PRON" => PartOfSpeech::Pron,
            "PROPN" => PartOfSpeech::Propn,
            "PUNCT" => PartOfSpeech::Punct,
            "SCONJ" => PartOfSpeech::Sconj,
            "SYM" => PartOfSpeech::Sym,
            "VERB" => PartOfSpeech::Verb,
            "X" => PartOfSpeech::X,
            other => PartOfSpeech::Other(other.to_string()),
        }
    }
}

impl FromStr for PartOfSpeech {
    type Err = std::convert::Infallible;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(tag))
    }
}

impl fmt::Display for PartOfSpeech {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One tagged token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAnnotation {
    pub text: String,
    pub lower: String,
    pub is_alpha: bool,
    pub pos: PartOfSpeech,
    pub lemma: String,
    /// Lowercase form of the following token in the same sentence
    pub next_lower: Option<String>,
}

impl TokenAnnotation {
    /// Annotation with the derived fields (`lower`, `is_alpha`) filled in
    pub fn new(text: &str, pos: PartOfSpeech, lemma: &str) -> Self {
        Self {
            text: text.to_string(),
            lower: text.to_lowercase(),
            is_alpha: is_alphabetic(text),
            pos,
            lemma: lemma.to_string(),
            next_lower: None,
        }
    }
}

/// Non-empty and made only of letters
pub fn is_alphabetic(text: &str) -> bool {
    !text.is_empty() && text.chars().all(char::is_alphabetic)
}

/// Tokens of one sentence, in order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnnotatedSentence {
    /// Sentence text as reported by the tagger, when available
    pub text: Option<String>,
    pub tokens: Vec<TokenAnnotation>,
}

impl AnnotatedSentence {
    /// Sentence from tokens, linking each token to the one after it
    pub fn from_tokens(text: Option<String>, mut tokens: Vec<TokenAnnotation>) -> Self {
        for i in 0..tokens.len() {
            tokens[i].next_lower = tokens.get(i + 1).map(|next| next.lower.clone());
        }
        Self { text, tokens }
    }
}

/// Failure to obtain usable annotations for one sentence
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnnotationError {
    #[error("line {line}: expected 10 tab-separated columns, found {found}")]
    ColumnCount { line: usize, found: usize },

    #[error("line {line}: invalid token id '{id}'")]
    InvalidId { line: usize, id: String },

    #[error("line {line}: token '{token}' has no {field}")]
    MissingField { line: usize, token: String, field: &'static str },

    #[error("sentence ending at line {line} has no tokens")]
    EmptySentence { line: usize },
}

/// Source of per-sentence token annotations
///
/// Results are per sentence so a failure in one sentence leaves the rest of
/// the document usable; the caller decides whether to skip or abort.
pub trait Annotator {
    fn annotate(&self, input: &str) -> Vec<Result<AnnotatedSentence, AnnotationError>>;
}

/// Reads CoNLL-U, the tab-separated format written by UD taggers
///
/// Multi-word token ranges (`3-4`) and empty nodes (`5.1`) are skipped so the
/// tokens are the syntactic words that carry lemma and UPOS.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConlluReader;

const CONLLU_COLUMNS: usize = 10;

impl ConlluReader {
    pub fn new() -> Self {
        Self
    }

    fn parse_block(&self, lines: &[(usize, &str)]) -> Result<AnnotatedSentence, AnnotationError> {
        let mut text = None;
        let mut tokens = Vec::new();

        for &(line_number, line) in lines {
            if let Some(comment) = line.strip_prefix('#') {
                if let Some(sentence_text) = comment.trim_start().strip_prefix("text =") {
                    text = Some(sentence_text.trim().to_string());
                }
                continue;
            }

            let columns: Vec<&str> = line.split('\t').collect();
            if columns.len() != CONLLU_COLUMNS {
                return Err(AnnotationError::ColumnCount { line: line_number, found: columns.len() });
            }

            let id = columns[0];
            if id.contains('-') || id.contains('.') {
                continue;
            }
            if id.parse::<usize>().is_err() {
                return Err(AnnotationError::InvalidId { line: line_number, id: id.to_string() });
            }

            let form = columns[1];
            let lemma = columns[2];
            let upos = columns[3];
            if upos == "_" {
                return Err(AnnotationError::MissingField {
                    line: line_number,
                    token: form.to_string(),
                    field: "part-of-speech tag",
                });
            }
            if lemma == "_" && form != "_" {
                return Err(AnnotationError::MissingField {
                    line: line_number,
                    token: form.to_string(),
                    field: "lemma",
                });
            }

            tokens.push(TokenAnnotation::new(form, PartOfSpeech::from(upos), lemma));
        }

        if tokens.is_empty() {
            let line = lines.last().map(|&(number, _)| number).unwrap_or(0);
            return Err(AnnotationError::EmptySentence { line });
        }
        Ok(AnnotatedSentence::from_tokens(text, tokens))
    }
}

impl Annotator for ConlluReader {
    fn annotate(&self, input: &str) -> Vec<Result<AnnotatedSentence, AnnotationError>> {
        let mut results = Vec::new();
        let mut block: Vec<(usize, &str)> = Vec::new();

        for (index, raw_line) in input.lines().enumerate() {
            let line = raw_line.trim_end_matches('\r');
            if line.trim().is_empty() {
                if !block.is_empty() {
                    results.push(self.parse_block(&block));
                    block.clear();
                }
            } else {
                block.push((index + 1, line));
            }
        }
        if !block.is_empty() {
            results.push(self.parse_block(&block));
        }
        results
    }
}
