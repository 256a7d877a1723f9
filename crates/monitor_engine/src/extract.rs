use std::collections::HashSet;

use monitor_core::ListingId;
use regex::Regex;
use scraper::{Html, Selector};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractorError {
    #[error("invalid pattern: {0}")]
    InvalidPattern(#[from] regex::Error),
    #[error("pattern has no capture group: {0}")]
    MissingCaptureGroup(String),
}

/// What one parse of the listing page yields. The count is the page's own
/// displayed total and may legitimately differ from `ids.len()`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    pub ids: HashSet<ListingId>,
    pub count: Option<u64>,
}

/// Pure and deterministic for identical input; unexpected markup yields an
/// empty set or an absent count, never an error.
pub trait Extractor: Send + Sync {
    fn extract(&self, html: &str) -> Extraction;
}

/// Pattern-driven extractor:
/// - applies the id pattern to every `<a href>` attribute (capture group 1
///   is the identifier)
/// - rescans the full document with the same pattern, so a markup change
///   that moves ids out of anchors does not lose them
/// - applies the count pattern to the page's visible text.
#[derive(Debug)]
pub struct PatternExtractor {
    id_pattern: Regex,
    count_pattern: Regex,
}

impl PatternExtractor {
    pub fn new(id_pattern: &str, count_pattern: &str) -> Result<Self, ExtractorError> {
        let id_pattern = capture_pattern(id_pattern)?;
        let count_pattern = capture_pattern(count_pattern)?;
        Ok(Self {
            id_pattern,
            count_pattern,
        })
    }
}

fn capture_pattern(pattern: &str) -> Result<Regex, ExtractorError> {
    let compiled = Regex::new(pattern)?;
    if compiled.captures_len() < 2 {
        return Err(ExtractorError::MissingCaptureGroup(pattern.to_string()));
    }
    Ok(compiled)
}

impl Extractor for PatternExtractor {
    fn extract(&self, html: &str) -> Extraction {
        let doc = Html::parse_document(html);
        let mut ids = HashSet::new();

        if let Ok(anchor_sel) = Selector::parse("a[href]") {
            for anchor in doc.select(&anchor_sel) {
                if let Some(href) = anchor.value().attr("href") {
                    if let Some(id) = first_capture(&self.id_pattern, href) {
                        ids.insert(id);
                    }
                }
            }
        }

        // Fallback scan over the raw document.
        for captures in self.id_pattern.captures_iter(html) {
            if let Some(id) = captures.get(1) {
                ids.insert(id.as_str().to_string());
            }
        }

        let text = doc.root_element().text().collect::<Vec<_>>().join(" ");
        let count = first_capture(&self.count_pattern, &text)
            .and_then(|raw| raw.parse::<u64>().ok());

        Extraction { ids, count }
    }
}

fn first_capture(pattern: &Regex, haystack: &str) -> Option<String> {
    pattern
        .captures(haystack)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_string())
}
