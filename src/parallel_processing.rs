// Parallel classification and per-file run statistics
// Workers return their own partial counts; the caller merges them in order, no shared state

use anyhow::{Context, Result};
use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncWriteExt, BufWriter};
use tracing::debug;

use crate::annotation::AnnotatedSentence;
use crate::classifier::Classifier;
use crate::frequency::{ClassificationCounts, VocabularyReport};

/// Default worker count: one per available CPU
pub fn default_workers() -> usize {
    num_cpus::get().max(1)
}

/// Classify sentences on blocking workers and merge the partial counts
///
/// The result equals classifying the sentences one after another.
pub async fn classify_parallel(
    classifier: Arc<Classifier>,
    sentences: Vec<AnnotatedSentence>,
    workers: usize,
) -> Result<ClassificationCounts> {
    if sentences.is_empty() {
        return Ok(ClassificationCounts::new());
    }

    let workers = workers.clamp(1, sentences.len());
    let chunk_size = sentences.len().div_ceil(workers);
    let sentences = Arc::new(sentences);
    debug!("Classifying {} sentences on {} workers", sentences.len(), workers);

    let tasks = (0..sentences.len()).step_by(chunk_size).map(|start| {
        let classifier = Arc::clone(&classifier);
        let sentences = Arc::clone(&sentences);
        tokio::task::spawn_blocking(move || {
            let end = (start + chunk_size).min(sentences.len());
            let mut partial = ClassificationCounts::new();
            for sentence in &sentences[start..end] {
                classifier.classify_into(sentence, &mut partial);
            }
            partial
        })
    });

    let partials = try_join_all(tasks).await.context("Classification worker failed")?;
    Ok(ClassificationCounts::merged(&partials))
}

/// Per-file processing statistics
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct FileStats {
    /// Input file path
    pub path: String,
    /// Sentences classified
    pub sentences_classified: u64,
    /// Sentences left out because their annotations were unusable
    pub sentences_skipped: u64,
    /// Distinct keys per table
    pub distinct_words: u64,
    pub distinct_verbs: u64,
    pub distinct_errors: u64,
    /// Processing time in milliseconds
    pub processing_time_ms: u64,
    /// Processing status (success, failed)
    pub status: String,
    /// Error message if processing failed
    pub error: Option<String>,
}

impl FileStats {
    pub fn success(path: &Path, classified: usize, skipped: usize, counts: &ClassificationCounts, elapsed_ms: u64) -> Self {
        Self {
            path: path.display().to_string(),
            sentences_classified: classified as u64,
            sentences_skipped: skipped as u64,
            distinct_words: counts.words.distinct() as u64,
            distinct_verbs: counts.verbs.distinct() as u64,
            distinct_errors: counts.errors.distinct() as u64,
            processing_time_ms: elapsed_ms,
            status: "success".to_string(),
            error: None,
        }
    }

    pub fn failed(path: &Path, error: &anyhow::Error, elapsed_ms: u64) -> Self {
        Self {
            path: path.display().to_string(),
            processing_time_ms: elapsed_ms,
            status: "failed".to_string(),
            error: Some(format!("{error:#}")),
            ..Self::default()
        }
    }
}

/// Statistics for a whole run
#[derive(Serialize, Deserialize, Debug, Clone, Default)]
pub struct RunStats {
    pub files_processed: u64,
    pub files_failed: u64,
    pub total_processing_time_ms: u64,
    pub files: Vec<FileStats>,
}

impl RunStats {
    pub fn record(&mut self, stats: FileStats) {
        if stats.error.is_some() {
            self.files_failed += 1;
        } else {
            self.files_processed += 1;
        }
        self.total_processing_time_ms += stats.processing_time_ms;
        self.files.push(stats);
    }

    pub async fn write(&self, path: &Path) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        tokio::fs::write(path, content)
            .await
            .with_context(|| format!("Failed to write stats {}", path.display()))
    }
}

/// Serialization of the vocabulary report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum ReportFormat {
    #[default]
    Yaml,
    Json,
}

impl ReportFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ReportFormat::Yaml => "yml",
            ReportFormat::Json => "json",
        }
    }
}

/// Write a vocabulary report in the requested format
pub async fn write_report(path: &Path, report: &VocabularyReport, format: ReportFormat) -> Result<()> {
    let rendered = match format {
        ReportFormat::Yaml => report.to_yaml()?,
        ReportFormat::Json => report.to_json()?,
    };
    let file = tokio::fs::File::create(path)
        .await
        .with_context(|| format!("Failed to create report {}", path.display()))?;
    let mut writer = BufWriter::new(file);
    writer.write_all(rendered.as_bytes()).await?;
    writer.flush().await?;
    Ok(())
}
