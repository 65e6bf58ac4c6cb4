// Per-document orchestration of the pure stages
// Boundary detection always completes before any sentence of the same document is cleaned

use anyhow::Result;
use tracing::{debug, info, warn};

use crate::annotation::{AnnotatedSentence, AnnotationError};
use crate::boundary::{detect_boundaries, BoundaryConfig, BoundaryPatterns};
use crate::classifier::Classifier;
use crate::document::Document;
use crate::frequency::ClassificationCounts;
use crate::normalization::normalize_sentence;
use crate::segmenter::SentenceSegmenter;

/// Cleaned sentences of one document and the patterns used to clean them
#[derive(Debug, Clone)]
pub struct SentenceExtraction {
    pub patterns: BoundaryPatterns,
    pub sentences: Vec<String>,
    /// Sentences found before cleaning, including those cleaned away entirely
    pub detected: usize,
}

/// Detect boundaries from the page sample, then segment and normalize the full text
///
/// Sentences that normalize to nothing are dropped.
pub fn extract_sentences(
    document: &Document,
    config: &BoundaryConfig,
    segmenter: &SentenceSegmenter,
) -> Result<SentenceExtraction> {
    let patterns = detect_boundaries(&document.sample(config.sample_pages), config)?;
    let detected = segmenter.segment(&document.full_text());

    let sentences: Vec<String> = detected
        .iter()
        .filter_map(|sentence| {
            let normalized = normalize_sentence(&sentence.raw, &patterns);
            debug!(index = sentence.index, sentence = %normalized, "Normalized sentence");
            (!normalized.is_empty()).then_some(normalized)
        })
        .collect();

    info!(
        "Extracted {} sentences ({} detected) from {} pages",
        sentences.len(),
        detected.len(),
        document.page_count()
    );

    Ok(SentenceExtraction {
        patterns,
        sentences,
        detected: detected.len(),
    })
}

/// What to do with a sentence whose annotations are unusable
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Log and leave the sentence out
    #[default]
    Skip,
    /// Abort the document on the first failure
    FailFast,
}

/// Keep usable sentences; apply `policy` to the rest
///
/// Returns the usable sentences and how many were skipped.
pub fn partition_annotations(
    results: Vec<Result<AnnotatedSentence, AnnotationError>>,
    policy: FailurePolicy,
) -> Result<(Vec<AnnotatedSentence>, usize)> {
    let mut sentences = Vec::with_capacity(results.len());
    let mut skipped = 0;

    for (index, result) in results.into_iter().enumerate() {
        match result {
            Ok(sentence) => sentences.push(sentence),
            Err(e) => match policy {
                FailurePolicy::FailFast => {
                    return Err(anyhow::Error::new(e).context(format!("Annotation of sentence {index} failed")));
                }
                FailurePolicy::Skip => {
                    warn!("Skipping sentence {}: {}", index, e);
                    skipped += 1;
                }
            },
        }
    }
    Ok((sentences, skipped))
}

/// Classification totals for one document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentOutcome {
    pub counts: ClassificationCounts,
    pub classified: usize,
    pub skipped: usize,
}

/// Classify every usable sentence in order and fold the counts
pub fn classify_annotations(
    results: Vec<Result<AnnotatedSentence, AnnotationError>>,
    classifier: &Classifier,
    policy: FailurePolicy,
) -> Result<DocumentOutcome> {
    let (sentences, skipped) = partition_annotations(results, policy)?;
    let mut counts = ClassificationCounts::new();
    for sentence in &sentences {
        classifier.classify_into(sentence, &mut counts);
    }
    Ok(DocumentOutcome {
        counts,
        classified: sentences.len(),
        skipped,
    })
}
