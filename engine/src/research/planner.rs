//! Query Planner
//!
//! Synthesizes search queries through JSON-constrained generation calls.
//! Two paths share the same parsing discipline but differ in failure
//! policy:
//!
//! - initial query: a malformed response or missing `query` field is
//!   fatal to the run
//! - follow-up query (reflection): malformed JSON is fatal, but a missing
//!   or empty `follow_up_query` field falls back to a deterministic
//!   default query instead of failing

use serde::Deserialize;
use std::sync::Arc;

use crate::llm::{LlmError, LlmProvider, Message, OutputMode, Result};

use super::prompts;

/// Plans the next search query from the topic or the running summary.
pub struct QueryPlanner {
    llm: Arc<dyn LlmProvider>,
}

/// Expected shape of the query writer's output. `query` is mandatory.
#[derive(Debug, Deserialize)]
struct QueryWriterOutput {
    query: String,
}

/// Expected shape of the reflection output. `follow_up_query` is optional;
/// its absence triggers the fallback, not an error.
#[derive(Debug, Deserialize)]
struct ReflectionOutput {
    #[serde(default)]
    follow_up_query: Option<String>,
}

impl QueryPlanner {
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }

    /// Synthesize the first query of a run from the topic alone.
    ///
    /// # Errors
    ///
    /// Fails with `LlmError` if the generation call fails or the response
    /// does not parse as `{"query": ...}`. The caller decides; no retry.
    pub async fn generate_initial_query(&self, topic: &str) -> Result<String> {
        let instructions = prompts::render(prompts::QUERY_WRITER_INSTRUCTIONS, topic);
        let messages = [
            Message::system(instructions),
            Message::user("Generate a query for web search"),
        ];

        let content = self.llm.generate(&messages, OutputMode::Json).await?;

        let output: QueryWriterOutput = serde_json::from_str(&content).map_err(|e| {
            LlmError::ParseError(format!("query writer returned malformed JSON: {}", e))
        })?;

        tracing::debug!("Initial query: {}", output.query);
        Ok(output.query)
    }

    /// Synthesize a follow-up query by reflecting on the running summary.
    ///
    /// # Errors
    ///
    /// Fails with `LlmError` only if the generation call fails or returns
    /// content that is not JSON at all. A response that parses but yields
    /// no usable `follow_up_query` resolves to the fallback query.
    pub async fn generate_follow_up_query(
        &self,
        topic: &str,
        running_summary: &str,
    ) -> Result<String> {
        let instructions = prompts::render(prompts::REFLECTION_INSTRUCTIONS, topic);
        let messages = [
            Message::system(instructions),
            Message::user(format!(
                "Identify a knowledge gap and generate a follow-up web search query \
                 based on our existing knowledge: {}",
                running_summary
            )),
        ];

        let content = self.llm.generate(&messages, OutputMode::Json).await?;

        let output: ReflectionOutput = serde_json::from_str(&content).map_err(|e| {
            LlmError::ParseError(format!("reflection returned malformed JSON: {}", e))
        })?;

        match output.follow_up_query {
            Some(query) if !query.trim().is_empty() => {
                tracing::debug!("Follow-up query: {}", query);
                Ok(query)
            }
            _ => {
                tracing::debug!("Reflection yielded no follow-up query, using fallback");
                Ok(fallback_query(topic))
            }
        }
    }
}

/// The deterministic query used when reflection yields no usable follow-up.
pub fn fallback_query(topic: &str) -> String {
    format!("Tell me more about: {}", topic)
}
