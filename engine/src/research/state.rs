//! Research State
//!
//! `ResearchState` is the single mutable record threaded through the loop.
//! It is created once per research invocation with only the topic set,
//! passed by exclusive reference through each step, and discarded once the
//! final annotated summary has been rendered.

use crate::search::SearchResult;

/// Accumulating state for one research run.
///
/// Merge rules per step:
/// - `collected_results` and `source_urls` only ever grow
/// - `current_query` and `running_summary` are overwritten, never appended
/// - `loop_count` increases by exactly 1 per completed search step
#[derive(Debug, Clone, Default)]
pub struct ResearchState {
    /// Research topic; immutable for the life of a run
    pub topic: String,

    /// The query to execute next; overwritten every iteration
    pub current_query: String,

    /// Completed search iterations
    pub loop_count: u32,

    /// Every result ever merged, in fetch order, append-only
    pub collected_results: Vec<SearchResult>,

    /// Unique URLs ever seen, in first-seen order (drives citation order)
    pub source_urls: Vec<String>,

    /// Cumulative summary; absent before the first summarization step
    pub running_summary: Option<String>,
}

impl ResearchState {
    /// Create a fresh state for a topic.
    pub fn new(topic: impl Into<String>) -> Self {
        Self {
            topic: topic.into(),
            ..Self::default()
        }
    }

    /// Merge one freshly fetched batch into the state.
    ///
    /// Appends every result, records each URL not yet seen, and bumps the
    /// loop count. Cross-iteration duplicates stay in `collected_results`
    /// (per-iteration dedup is the search provider's job) but never enter
    /// `source_urls` twice.
    ///
    /// Returns the index in `collected_results` where the new batch
    /// begins, so the caller can address only the latest batch.
    pub fn merge_batch(&mut self, batch: Vec<SearchResult>) -> usize {
        let batch_start = self.collected_results.len();

        for result in batch {
            if !self.source_urls.iter().any(|url| url == &result.url) {
                self.source_urls.push(result.url.clone());
            }
            self.collected_results.push(result);
        }

        self.loop_count += 1;
        batch_start
    }
}
