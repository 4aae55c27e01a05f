//! Summarizer
//!
//! Folds the most recent search batch into the running summary through a
//! single plain-text generation call. The merge prompt is framed
//! differently depending on whether a summary already exists, because the
//! model is instructed to extend rather than re-create in that case.
//! Generation failures are fatal to the current iteration; there is no
//! partial or fallback summary.

use std::sync::Arc;

use crate::llm::{LlmProvider, Message, OutputMode, Result};
use crate::search::SearchResult;

use super::prompts;

/// Merges new search content into the running summary.
pub struct Summarizer {
    llm: Arc<dyn LlmProvider>,
}

impl Summarizer {
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }

    /// Produce the updated running summary.
    ///
    /// `new_results` is only the latest batch, never the full history; the
    /// existing summary already accounts for everything before it.
    pub async fn summarize(
        &self,
        topic: &str,
        existing_summary: Option<&str>,
        new_results: &[SearchResult],
    ) -> Result<String> {
        let rendered_results = render_results(new_results);

        let user_content = match existing_summary {
            Some(summary) => format!(
                "<User Input> \n {} \n <User Input>\n\n\
                 <Existing Summary> \n {} \n <Existing Summary>\n\n\
                 <New Search Results> \n {} \n <New Search Results>",
                topic, summary, rendered_results
            ),
            None => format!(
                "<User Input> \n {} \n <User Input>\n\n\
                 <Search Results> \n {} \n <Search Results>",
                topic, rendered_results
            ),
        };

        let messages = [
            Message::system(prompts::SUMMARIZER_INSTRUCTIONS),
            Message::user(user_content),
        ];

        self.llm.generate(&messages, OutputMode::Text).await
    }
}

/// Render a batch for the merge prompt, one line shape per result.
pub fn render_results(results: &[SearchResult]) -> String {
    results
        .iter()
        .map(|r| format!("Title: {} - Url: {} - Content: {}", r.title, r.url, r.content))
        .collect()
}
