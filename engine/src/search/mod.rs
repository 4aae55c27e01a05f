//! Web Search Abstraction Layer
//!
//! `SearchProvider` implementations execute one query and return ranked
//! results. Providers absorb their own failures: a batch that cannot be
//! fetched or parsed comes back as an empty list, never as an error —
//! losing one iteration's search must not abort a whole research run.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub mod duckduckgo;

/// One web search result.
///
/// Identity is the `url`: two results with the same URL inside one batch
/// are duplicates, and only the first occurrence in provider order is kept.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct SearchResult {
    /// Page title
    pub title: String,

    /// Page URL
    pub url: String,

    /// Snippet or full-page text
    pub content: String,
}

impl SearchResult {
    /// Create a new search result
    pub fn new(
        title: impl Into<String>,
        url: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            url: url.into(),
            content: content.into(),
        }
    }
}

/// Web search provider trait
#[async_trait]
pub trait SearchProvider: Send + Sync {
    /// Returns the name of the provider (e.g., "duckduckgo")
    fn name(&self) -> &str;

    /// Execute one search query, returning at most `max_results` results.
    ///
    /// Never fails: transport or parsing errors for the whole batch yield
    /// an empty list (logged as a warning by the provider).
    async fn search(&self, query: &str, max_results: usize) -> Vec<SearchResult>;
}

/// Drop same-URL duplicates within one batch, keeping the first occurrence
/// in provider order.
pub fn dedup_batch(results: Vec<SearchResult>) -> Vec<SearchResult> {
    let mut seen: Vec<String> = Vec::new();
    let mut deduped = Vec::with_capacity(results.len());

    for result in results {
        if seen.iter().any(|url| url == &result.url) {
            continue;
        }
        seen.push(result.url.clone());
        deduped.push(result);
    }

    deduped
}
