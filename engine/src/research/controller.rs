//! Research Loop Controller
//!
//! Drives the state machine:
//!
//! ```text
//! Planning -> Searching -> Summarizing -> Reflecting -> (Searching | Finalizing) -> Done
//! ```
//!
//! The controller owns the iteration state, invokes planner, search
//! provider, and summarizer in sequence, applies the termination policy,
//! and renders the final annotated summary. Each step fully completes
//! (including its blocking network call) before the next begins; one run
//! is one linear chain of calls.
//!
//! The routing decision is evaluated only after a full iteration, so the
//! first Searching -> Summarizing -> Reflecting pass always runs even
//! with a loop budget of 0, and a budget of N yields N + 1 search
//! iterations. Downstream consumers depend on that comparison; do not
//! change it to an exact-N cutoff.

use anyhow::{Context, Result};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, info};

use crate::config::ResearchConfig;
use crate::llm::LlmProvider;
use crate::search::SearchProvider;

use super::planner::QueryPlanner;
use super::state::ResearchState;
use super::summarizer::Summarizer;

/// Final outcome of a research run.
#[derive(Debug, Clone, Serialize)]
pub struct ResearchReport {
    /// Topic that was researched
    pub topic: String,

    /// Final annotated summary (summary body plus sources section)
    pub summary: String,

    /// Number of completed search iterations
    pub iterations: u32,

    /// Unique source URLs in accumulation order
    pub sources: Vec<String>,
}

/// Where the loop goes after the Reflecting step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Run another search iteration with the new query
    Search,

    /// Render the final summary; terminal, never re-enters the loop
    Finalize,
}

/// Pure routing decision after reflection.
///
/// Examines only the current state and static configuration, so it is
/// testable independently of the step implementations.
pub fn route_after_reflection(state: &ResearchState, config: &ResearchConfig) -> Route {
    if state.loop_count <= config.max_web_research_loops {
        Route::Search
    } else {
        Route::Finalize
    }
}

/// Render the final annotated summary from a terminal state.
///
/// The template is fixed (including its whitespace); sources are
/// newline-joined in accumulation order.
pub fn finalize_summary(state: &ResearchState) -> String {
    let all_sources = state.source_urls.join("\n");
    format!(
        "## Summary:\n\n{}\n\n ### Sources: \n\n {}",
        state.running_summary.as_deref().unwrap_or_default(),
        all_sources
    )
}

/// Sequences query generation, search, summarization, and reflection.
pub struct ResearchController {
    planner: QueryPlanner,
    summarizer: Summarizer,
    search: Arc<dyn SearchProvider>,
    config: ResearchConfig,
}

impl ResearchController {
    /// Create a controller over a text-generation provider and a search
    /// provider.
    pub fn new(
        llm: Arc<dyn LlmProvider>,
        search: Arc<dyn SearchProvider>,
        config: ResearchConfig,
    ) -> Self {
        Self {
            planner: QueryPlanner::new(llm.clone()),
            summarizer: Summarizer::new(llm),
            search,
            config,
        }
    }

    /// Run one full research cycle for a topic.
    ///
    /// # Errors
    ///
    /// A generation failure in the planner's initial path or in the
    /// summarizer aborts the run with no partial output. Search failures
    /// never surface here; they appear as empty batches.
    pub async fn run(&self, topic: &str) -> Result<ResearchReport> {
        let mut state = ResearchState::new(topic);

        info!("Starting research run: {}", topic);

        // Planning
        state.current_query = self
            .planner
            .generate_initial_query(topic)
            .await
            .context("Failed to generate initial query")?;

        loop {
            // Searching
            let batch = self
                .search
                .search(&state.current_query, self.config.max_search_results)
                .await;
            let batch_start = state.merge_batch(batch);
            debug!(
                "Iteration {}: merged {} results for '{}'",
                state.loop_count,
                state.collected_results.len() - batch_start,
                state.current_query
            );

            // Summarizing — only the latest batch is new content
            let updated_summary = self
                .summarizer
                .summarize(
                    topic,
                    state.running_summary.as_deref(),
                    &state.collected_results[batch_start..],
                )
                .await
                .context("Failed to summarize search results")?;
            state.running_summary = Some(updated_summary);

            // Reflecting
            let summary = state.running_summary.as_deref().unwrap_or_default();
            state.current_query = self
                .planner
                .generate_follow_up_query(topic, summary)
                .await
                .context("Failed to generate follow-up query")?;

            match route_after_reflection(&state, &self.config) {
                Route::Search => continue,
                Route::Finalize => break,
            }
        }

        info!(
            "Research run finished: {} iterations, {} sources",
            state.loop_count,
            state.source_urls.len()
        );

        Ok(ResearchReport {
            topic: state.topic.clone(),
            summary: finalize_summary(&state),
            iterations: state.loop_count,
            sources: state.source_urls.clone(),
        })
    }
}
