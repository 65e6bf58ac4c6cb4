use anyhow::{Context, Result};
use std::path::Path;
use tokio::fs;
use tracing::{debug, info};

use crate::boundary::DocumentSample;

/// Separator between pages in extracted text (`pdftotext` output convention)
pub const PAGE_SEPARATOR: char = '\u{000C}';

/// Page texts of one paginated document, in page order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pages: Vec<String>,
}

impl Document {
    pub fn new(pages: Vec<String>) -> Self {
        Self { pages }
    }

    /// Split extracted text into pages on form feeds
    /// Text without any form feed is a single page.
    pub fn from_text(text: &str) -> Self {
        let mut pages: Vec<String> = text.split(PAGE_SEPARATOR).map(str::to_string).collect();
        // pdftotext ends the last page with a form feed too
        if pages.len() > 1 && pages.last().is_some_and(|page| page.trim().is_empty()) {
            pages.pop();
        }
        Self { pages }
    }

    /// Read a page-text file
    pub async fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let start_time = std::time::Instant::now();
        debug!("Starting async read of page text: {}", path.display());

        let text = fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read page text {}", path.display()))?;
        let document = Self::from_text(&text);

        info!(
            "Loaded {}: {} pages, {} bytes in {}ms",
            path.display(),
            document.page_count(),
            text.len(),
            start_time.elapsed().as_millis()
        );
        Ok(document)
    }

    pub fn pages(&self) -> &[String] {
        &self.pages
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    /// First/last lines of up to `limit` leading pages that carry text
    pub fn sample(&self, limit: usize) -> DocumentSample {
        DocumentSample::from_pages(&self.pages, limit)
    }

    /// All page text, each non-empty page followed by a newline
    pub fn full_text(&self) -> String {
        let mut text = String::new();
        for page in self.pages.iter().filter(|page| !page.trim().is_empty()) {
            text.push_str(page.trim_end_matches(['\n', '\r']));
            text.push('\n');
        }
        text
    }
}
