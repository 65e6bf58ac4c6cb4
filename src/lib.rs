pub mod annotation;
pub mod boundary;
pub mod classifier;
pub mod config;
pub mod discovery;
pub mod document;
pub mod frequency;
pub mod incremental;
pub mod normalization;
pub mod parallel_processing;
pub mod pipeline;
pub mod reference;
pub mod segmenter;

// Re-export main types for convenient access
pub use annotation::{AnnotatedSentence, AnnotationError, Annotator, ConlluReader, PartOfSpeech, TokenAnnotation};
pub use boundary::{detect_boundaries, longest_common_substring, BoundaryConfig, BoundaryPatterns, DocumentSample};
pub use classifier::{Classifier, ClassifierConfig, TokenClass, VerbResolution};
pub use config::AppConfig;
pub use document::Document;
pub use frequency::{ClassificationCounts, FrequencyTable, RankedTable, VocabularyReport};
pub use normalization::{clean_sentence, normalize_sentence, preprocess_dialogue};
pub use pipeline::{classify_annotations, extract_sentences, DocumentOutcome, FailurePolicy, SentenceExtraction};
pub use reference::{ReferenceData, ReferencePaths};
pub use segmenter::SentenceSegmenter;
