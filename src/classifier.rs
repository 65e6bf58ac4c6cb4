// Lexical classification of tagged tokens into word, verb and error buckets
//
// The verb branch is a heuristic over Spanish infinitive morphology: lemmas are
// accepted by their ending, rescued through the irregular mapping table, or
// reported as errors for manual curation. Endings are configuration so another
// language can swap them in.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::debug;

use crate::annotation::{AnnotatedSentence, TokenAnnotation};
use crate::frequency::ClassificationCounts;
use crate::reference::ReferenceData;

/// Morphology used to recognize verb lemmas
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierConfig {
    pub infinitive_endings: Vec<String>,
    pub reflexive_infinitive_endings: Vec<String>,
    pub gerund_endings: Vec<String>,
    /// Clitic that, following a verb, marks it reflexive
    pub reflexive_clitic: String,
    /// Appended to an infinitive to form its reflexive infinitive
    pub reflexive_suffix: String,
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        let owned = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
        Self {
            infinitive_endings: owned(&["ar", "er", "ir", "ír"]),
            reflexive_infinitive_endings: owned(&["arse", "erse", "irse", "írse"]),
            gerund_endings: owned(&["ando", "iendo"]),
            reflexive_clitic: "se".to_string(),
            reflexive_suffix: "se".to_string(),
        }
    }
}

impl ClassifierConfig {
    fn ends_with_any(word: &str, endings: &[String]) -> bool {
        endings.iter().any(|ending| word.ends_with(ending.as_str()))
    }

    pub fn is_infinitive(&self, lemma: &str) -> bool {
        Self::ends_with_any(lemma, &self.infinitive_endings)
    }

    /// Infinitive, reflexive infinitive or gerund ending
    pub fn has_verb_ending(&self, lemma: &str) -> bool {
        self.is_infinitive(lemma)
            || Self::ends_with_any(lemma, &self.reflexive_infinitive_endings)
            || Self::ends_with_any(lemma, &self.gerund_endings)
    }

    /// Append the reflexive suffix to an infinitive; other lemmas are returned as-is
    ///
    /// An already reflexive lemma is not special-cased: "irse" does not end in
    /// an infinitive ending and passes through, but so does anything else that
    /// happens not to end in one.
    pub fn add_reflexive_suffix(&self, lemma: &str) -> String {
        if self.is_infinitive(lemma) {
            format!("{lemma}{}", self.reflexive_suffix)
        } else {
            lemma.to_string()
        }
    }
}

/// Where a token ended up
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenClass {
    /// Non-alphabetic, known word or proper noun
    Skipped,
    Word(String),
    Verb(VerbResolution),
}

/// Outcome of the verb branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerbResolution {
    /// Lemma already has an expected ending
    Recognized(String),
    /// Lemma found in the mapping table; holds the replacement
    Mapped { lemma: String, replacement: String },
    /// Neither ending nor mapping matched; holds the lemma for curation
    Unresolved(String),
}

/// Classifies annotated sentences against reference data
///
/// Holds no mutable state: every call returns fresh counts, so sentences can
/// be classified on any thread and merged afterwards.
#[derive(Debug, Clone)]
pub struct Classifier {
    reference: Arc<ReferenceData>,
    config: ClassifierConfig,
}

impl Classifier {
    pub fn new(reference: Arc<ReferenceData>, config: ClassifierConfig) -> Self {
        Self { reference, config }
    }

    pub fn with_default_config(reference: Arc<ReferenceData>) -> Self {
        Self::new(reference, ClassifierConfig::default())
    }

    pub fn config(&self) -> &ClassifierConfig {
        &self.config
    }

    pub fn reference(&self) -> &ReferenceData {
        &self.reference
    }

    /// Counts for one sentence
    pub fn classify(&self, sentence: &AnnotatedSentence) -> ClassificationCounts {
        let mut counts = ClassificationCounts::new();
        self.classify_into(sentence, &mut counts);
        counts
    }

    /// Add one sentence's classifications to caller-owned counts
    pub fn classify_into(&self, sentence: &AnnotatedSentence, counts: &mut ClassificationCounts) {
        for token in &sentence.tokens {
            match self.classify_token(token) {
                TokenClass::Skipped => {}
                TokenClass::Word(word) => counts.words.add(&word),
                TokenClass::Verb(VerbResolution::Recognized(lemma)) => counts.verbs.add(&lemma),
                TokenClass::Verb(VerbResolution::Mapped { replacement, .. }) => counts.verbs.add(&replacement),
                TokenClass::Verb(VerbResolution::Unresolved(lemma)) => {
                    debug!(token = %token.text, lemma = %lemma, "Unresolved verb lemma");
                    counts.errors.add(&lemma);
                }
            }
        }
    }

    pub fn classify_token(&self, token: &TokenAnnotation) -> TokenClass {
        if !token.is_alpha {
            return TokenClass::Skipped;
        }
        if self.reference.is_known(&token.lower) || self.reference.is_proper_noun(&token.text) {
            return TokenClass::Skipped;
        }
        if token.pos.is_verb() {
            return TokenClass::Verb(self.resolve_verb(&token.lemma, token.next_lower.as_deref()));
        }
        TokenClass::Word(token.lower.clone())
    }

    /// Resolve a verb lemma given the lowercase form of the token after it
    ///
    /// A following reflexive clitic, or a space inside the lemma (a split
    /// reflexive such as "alegrar se"), triggers reconstruction from the part
    /// before the first space.
    pub fn resolve_verb(&self, lemma: &str, next_lower: Option<&str>) -> VerbResolution {
        let lemma = lemma.to_lowercase();
        let followed_by_clitic = next_lower == Some(self.config.reflexive_clitic.as_str());
        let verb = if followed_by_clitic || lemma.contains(' ') {
            let stem = lemma.split(' ').next().unwrap_or_default();
            self.config.add_reflexive_suffix(stem)
        } else {
            lemma
        };

        if self.config.has_verb_ending(&verb) {
            return VerbResolution::Recognized(verb);
        }
        match self.reference.mapping(&verb) {
            Some(replacement) => VerbResolution::Mapped {
                replacement: replacement.to_string(),
                lemma: verb,
            },
            None => VerbResolution::Unresolved(verb),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::PartOfSpeech;
    use std::collections::{HashMap, HashSet};

    fn classifier(known: &[&str], proper: &[&str], mappings: &[(&str, &str)]) -> Classifier {
        let reference = ReferenceData::new(
            known.iter().map(|s| s.to_string()).collect::<HashSet<_>>(),
            proper.iter().map(|s| s.to_string()).collect::<HashSet<_>>(),
            mappings
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
        );
        Classifier::with_default_config(Arc::new(reference))
    }

    fn sentence(tokens: &[(&str, PartOfSpeech, &str)]) -> AnnotatedSentence {
        AnnotatedSentence::from_tokens(
            None,
            tokens
                .iter()
                .map(|(text, pos, lemma)| TokenAnnotation::new(text, pos.clone(), lemma))
                .collect(),
        )
    }

    #[test]
    fn test_gerund_surface_with_infinitive_lemma() {
        let classifier = classifier(&["el", "perro"], &[], &[("iendo", "ir")]);
        let counts = classifier.classify(&sentence(&[
            ("El", PartOfSpeech::Det, "el"),
            ("perro", PartOfSpeech::Noun, "perro"),
            ("corriendo", PartOfSpeech::Verb, "correr"),
        ]));
        assert!(counts.words.is_empty());
        assert_eq!(counts.verbs.get("correr"), 1);
        assert_eq!(counts.verbs.distinct(), 1);
        assert!(counts.errors.is_empty());
    }

    #[test]
    fn test_unknown_words_are_lowercased() {
        let classifier = classifier(&[], &[], &[]);
        let counts = classifier.classify(&sentence(&[
            ("Casa", PartOfSpeech::Noun, "casa"),
            ("casa", PartOfSpeech::Noun, "casa"),
        ]));
        assert_eq!(counts.words.get("casa"), 2);
    }

    #[test]
    fn test_known_and_proper_nouns_skipped() {
        let classifier = classifier(&["madrid"], &["Toledo"], &[]);
        let counts = classifier.classify(&sentence(&[
            ("Madrid", PartOfSpeech::Propn, "Madrid"),
            ("Toledo", PartOfSpeech::Propn, "Toledo"),
            ("toledo", PartOfSpeech::Noun, "toledo"),
        ]));
        assert_eq!(counts.words.ranked(), vec![("toledo".to_string(), 1)]);
    }

    #[test]
    fn test_non_alphabetic_tokens_ignored() {
        let classifier = classifier(&[], &[], &[]);
        let counts = classifier.classify(&sentence(&[
            ("3", PartOfSpeech::Num, "3"),
            (",", PartOfSpeech::Punct, ","),
            ("fue-", PartOfSpeech::Verb, "ir"),
        ]));
        assert!(counts.is_empty());
    }

    #[test]
    fn test_split_reflexive_lemma_reconstructed() {
        let classifier = classifier(&[], &[], &[]);
        let counts = classifier.classify(&sentence(&[
            ("alegra", PartOfSpeech::Verb, "alegrar se"),
            ("se", PartOfSpeech::Pron, "él"),
        ]));
        assert_eq!(counts.verbs.get("alegrarse"), 1);
        assert!(counts.errors.is_empty());
    }

    #[test]
    fn test_following_clitic_makes_reflexive() {
        let classifier = classifier(&["se"], &[], &[]);
        let counts = classifier.classify(&sentence(&[
            ("Fue", PartOfSpeech::Verb, "Ir"),
            ("se", PartOfSpeech::Pron, "él"),
        ]));
        assert_eq!(counts.verbs.ranked(), vec![("irse".to_string(), 1)]);
    }

    #[test]
    fn test_space_in_lemma_without_clitic() {
        let classifier = classifier(&[], &[], &[]);
        assert_eq!(
            classifier.resolve_verb("dar lo", Some("a")),
            VerbResolution::Recognized("darse".to_string())
        );
    }

    #[test]
    fn test_unresolved_lemma_counted_as_error() {
        let classifier = classifier(&[], &[], &[]);
        let mut counts = ClassificationCounts::new();
        let traduc = sentence(&[("traduce", PartOfSpeech::Verb, "traduc")]);
        classifier.classify_into(&traduc, &mut counts);
        assert_eq!(counts.errors.get("traduc"), 1);
        classifier.classify_into(&traduc, &mut counts);
        assert_eq!(counts.errors.get("traduc"), 2);
        assert!(counts.verbs.is_empty());
    }

    #[test]
    fn test_mapping_rescues_irregular_lemma() {
        let classifier = classifier(&[], &[], &[("fue", "ir")]);
        assert_eq!(
            classifier.resolve_verb("Fue", None),
            VerbResolution::Mapped { lemma: "fue".to_string(), replacement: "ir".to_string() }
        );
        let counts = classifier.classify(&sentence(&[("fue", PartOfSpeech::Verb, "fue")]));
        assert_eq!(counts.verbs.get("ir"), 1);
    }

    #[test]
    fn test_reflexive_and_gerund_lemmas_recognized() {
        let classifier = classifier(&[], &[], &[]);
        for lemma in ["sentarse", "reírse", "cantando", "comiendo", "vivir"] {
            assert_eq!(
                classifier.resolve_verb(lemma, None),
                VerbResolution::Recognized(lemma.to_string()),
                "lemma {lemma}"
            );
        }
    }

    #[test]
    fn test_reflexive_suffix_quirks_preserved() {
        let classifier = classifier(&[], &[], &[]);
        // Suffix goes on any infinitive followed by the clitic, whatever the verb
        assert_eq!(classifier.resolve_verb("ser", Some("se")), VerbResolution::Recognized("serse".to_string()));
        // Already reflexive lemmas are not re-suffixed only because "se" is not an infinitive ending
        assert_eq!(
            classifier.resolve_verb("sentarse", Some("se")),
            VerbResolution::Recognized("sentarse".to_string())
        );
        // Text after the first space is dropped even when it is not the clitic
        assert_eq!(classifier.resolve_verb("echar de menos", None), VerbResolution::Recognized("echarse".to_string()));
    }

    #[test]
    fn test_endings_are_injectable() {
        let config = ClassifierConfig {
            infinitive_endings: vec!["en".to_string()],
            reflexive_infinitive_endings: Vec::new(),
            gerund_endings: vec!["end".to_string()],
            reflexive_clitic: "sich".to_string(),
            reflexive_suffix: String::new(),
        };
        let classifier = Classifier::new(Arc::new(ReferenceData::default()), config);
        assert_eq!(classifier.resolve_verb("laufen", None), VerbResolution::Recognized("laufen".to_string()));
        assert_eq!(classifier.resolve_verb("hablar", None), VerbResolution::Unresolved("hablar".to_string()));
    }

    #[test]
    fn test_classification_is_deterministic() {
        let classifier = classifier(&["la"], &[], &[("hubo", "haber")]);
        let input = sentence(&[
            ("La", PartOfSpeech::Det, "el"),
            ("hubo", PartOfSpeech::Verb, "hubo"),
            ("fiesta", PartOfSpeech::Noun, "fiesta"),
        ]);
        assert_eq!(classifier.classify(&input), classifier.classify(&input));
    }
}
