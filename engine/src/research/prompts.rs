//! Prompt Templates
//!
//! Embedded instruction templates for the three generation call sites.
//! Templates carry a `{research_topic}` placeholder filled in with
//! `render`. The query writer and reflection instructions run in JSON
//! mode; the summarizer runs in plain-text mode.

/// System instructions for initial query synthesis (JSON mode).
pub const QUERY_WRITER_INSTRUCTIONS: &str = r#"<GOAL>
Generate a targeted web search query that will surface useful information about a research topic.
</GOAL>

<TOPIC>
{research_topic}
</TOPIC>

<FORMAT>
Respond with a JSON object containing exactly one key:
"query": the web search query string
</FORMAT>

<EXAMPLE>
{"query": "quantum error correction surface codes overview"}
</EXAMPLE>

Provide the JSON object only, with no extra commentary."#;

/// System instructions for summarization (plain-text mode).
pub const SUMMARIZER_INSTRUCTIONS: &str = r#"<GOAL>
Produce a coherent research summary of the user's topic from web search results.
</GOAL>

<REQUIREMENTS>
When extending an existing summary:
1. Integrate new information without repeating what is already covered.
2. Keep the existing structure and tone.
3. Only add points that are relevant to the user's topic.

When creating a new summary:
1. Highlight the most relevant findings from the search results.
2. Write flowing prose, not a bullet list.

Never include URLs, citations, or meta commentary about the search process in the summary text.
</REQUIREMENTS>"#;

/// System instructions for reflection / follow-up query synthesis (JSON mode).
pub const REFLECTION_INSTRUCTIONS: &str = r#"<GOAL>
You are an expert research assistant analyzing a summary about {research_topic}.
Identify a knowledge gap in the summary and generate one follow-up web search query that would close it.
</GOAL>

<FORMAT>
Respond with a JSON object containing exactly two keys:
"knowledge_gap": a short description of what the summary is missing
"follow_up_query": the web search query to run next
</FORMAT>

<EXAMPLE>
{"knowledge_gap": "The summary lacks recent benchmark numbers", "follow_up_query": "{research_topic} performance benchmarks 2024"}
</EXAMPLE>

Provide the JSON object only, with no extra commentary."#;

/// Fill the `{research_topic}` placeholder in a template.
pub fn render(template: &str, research_topic: &str) -> String {
    template.replace("{research_topic}", research_topic)
}
