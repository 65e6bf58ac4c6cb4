// Running header/footer detection over a sample of pages
// Patterns are derived once per document and reused for every sentence in it

use anyhow::{Context, Result};
use regex_automata::meta::Regex;
use serde::{Deserialize, Serialize};
use tracing::info;

pub mod lcs;

pub use lcs::{common_substring, longest_common_substring};

/// Number of leading pages sampled when no configuration overrides it
pub const DEFAULT_SAMPLE_PAGES: usize = 20;

/// Connector of the "N de M" page stamp that follows a running footer
pub const DEFAULT_PAGE_CONNECTOR: &str = "de";

/// Configuration for boundary detection
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoundaryConfig {
    /// How many leading pages with text feed the sample
    pub sample_pages: usize,
    /// Literal word between the page number and the page total in footers.
    /// Taken from configuration, never inferred from the document.
    pub page_connector: String,
}

impl Default for BoundaryConfig {
    fn default() -> Self {
        Self {
            sample_pages: DEFAULT_SAMPLE_PAGES,
            page_connector: DEFAULT_PAGE_CONNECTOR.to_string(),
        }
    }
}

/// First and last line of each sampled page, in page order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocumentSample {
    pairs: Vec<(String, String)>,
}

impl DocumentSample {
    pub fn new(pairs: Vec<(String, String)>) -> Self {
        Self { pairs }
    }

    /// Build a sample from page texts
    ///
    /// Only the first `limit` pages are looked at; those that carry text
    /// contribute their first and last non-blank line.
    pub fn from_pages<S: AsRef<str>>(pages: &[S], limit: usize) -> Self {
        let pairs = pages
            .iter()
            .take(limit)
            .filter_map(|page| {
                let mut lines = page.as_ref().lines().filter(|line| !line.trim().is_empty());
                let first = lines.next()?;
                let last = lines.last().unwrap_or(first);
                Some((first.to_string(), last.to_string()))
            })
            .collect();
        Self { pairs }
    }

    pub fn pairs(&self) -> &[(String, String)] {
        &self.pairs
    }

    pub fn first_lines(&self) -> Vec<&str> {
        self.pairs.iter().map(|(first, _)| first.as_str()).collect()
    }

    pub fn last_lines(&self) -> Vec<&str> {
        self.pairs.iter().map(|(_, last)| last.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.pairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }
}

/// A detected running text fragment and the compiled pattern that removes it
#[derive(Debug, Clone)]
pub struct BoundaryPattern {
    literal: String,
    source: String,
    regex: Regex,
}

impl BoundaryPattern {
    /// Pattern matching `literal` verbatim anywhere in a sentence
    pub fn header(literal: &str) -> Result<Self> {
        Self::compile(literal, regex::escape(literal))
    }

    /// Pattern matching `literal` followed by an "N <connector> M" page stamp
    pub fn footer(literal: &str, connector: &str) -> Result<Self> {
        let source = format!(
            r"{}\s*\d+\s*{}\s*\d+",
            regex::escape(literal),
            regex::escape(connector)
        );
        Self::compile(literal, source)
    }

    fn compile(literal: &str, source: String) -> Result<Self> {
        let regex = Regex::new(&source)
            .with_context(|| format!("Failed to compile boundary pattern: {source}"))?;
        Ok(Self {
            literal: literal.to_string(),
            source,
            regex,
        })
    }

    /// Detected text as it appeared on the pages
    pub fn literal(&self) -> &str {
        &self.literal
    }

    /// Regular expression source, for operator inspection
    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// Remove every non-overlapping match from `text`
    pub fn strip(&self, text: &str) -> String {
        let mut result = String::with_capacity(text.len());
        let mut last = 0;
        for found in self.regex.find_iter(text) {
            result.push_str(&text[last..found.start()]);
            last = found.end();
        }
        result.push_str(&text[last..]);
        result
    }
}

/// Header and footer patterns of one document; either may be absent
#[derive(Debug, Clone, Default)]
pub struct BoundaryPatterns {
    pub header: Option<BoundaryPattern>,
    pub footer: Option<BoundaryPattern>,
}

impl BoundaryPatterns {
    /// Patterns that strip nothing
    pub fn none() -> Self {
        Self::default()
    }

    pub fn header_pattern(&self) -> Option<&str> {
        self.header.as_ref().map(BoundaryPattern::as_str)
    }

    pub fn footer_pattern(&self) -> Option<&str> {
        self.footer.as_ref().map(BoundaryPattern::as_str)
    }

    pub fn strip_header(&self, text: &str) -> String {
        match &self.header {
            Some(pattern) => pattern.strip(text),
            None => text.to_string(),
        }
    }

    pub fn strip_footer(&self, text: &str) -> String {
        match &self.footer {
            Some(pattern) => pattern.strip(text),
            None => text.to_string(),
        }
    }
}

/// Derive header and footer patterns from a page sample
///
/// header = LCS of first lines, footer = LCS of last lines. An empty sample or
/// an empty common substring leaves the pattern absent; that is reported, not
/// treated as an error.
///
/// A common substring made only of whitespace is non-empty but is treated as
/// absent too: as a header it would strip every space from the text.
pub fn detect_boundaries(sample: &DocumentSample, config: &BoundaryConfig) -> Result<BoundaryPatterns> {
    let header = longest_common_substring(&sample.first_lines()).filter(|text| !text.trim().is_empty());
    let footer = longest_common_substring(&sample.last_lines()).filter(|text| !text.trim().is_empty());

    info!(
        sampled_pages = sample.len(),
        header = header.as_deref().unwrap_or(""),
        footer = footer.as_deref().unwrap_or(""),
        "Detected running boundaries"
    );

    let header = header.as_deref().map(BoundaryPattern::header).transpose()?;
    let footer = footer
        .as_deref()
        .map(|text| BoundaryPattern::footer(text, &config.page_connector))
        .transpose()?;

    if header.is_none() {
        info!("No running header detected; headers will not be stripped");
    }
    if footer.is_none() {
        info!("No running footer detected; footers will not be stripped");
    }

    Ok(BoundaryPatterns { header, footer })
}
