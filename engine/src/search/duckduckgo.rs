//! DuckDuckGo Search Provider
//!
//! Scrapes the DuckDuckGo HTML endpoint (no API key required) and turns
//! result blocks into `SearchResult`s. Failure policy, from least to most
//! severe:
//!
//! - a result missing its title, URL, or snippet is dropped; the rest of
//!   the batch survives
//! - a failed full-page fetch for one URL falls back to that result's
//!   snippet
//! - a transport or HTTP error for the whole batch yields an empty list

use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

use super::{dedup_batch, SearchProvider, SearchResult};

/// Cap on enriched page text, in characters.
const MAX_PAGE_CHARS: usize = 20_000;

/// DuckDuckGo HTML search provider
#[derive(Debug, Clone)]
pub struct DuckDuckGoProvider {
    /// Endpoint base (normally https://html.duckduckgo.com)
    base_url: String,

    /// Fetch full-page text for each result instead of the snippet
    fetch_full_page: bool,

    /// HTTP client for search and page requests
    client: Client,
}

impl DuckDuckGoProvider {
    /// Create a provider against the public DuckDuckGo HTML endpoint.
    pub fn new(fetch_full_page: bool) -> Self {
        Self::with_base_url("https://html.duckduckgo.com", fetch_full_page)
    }

    /// Create a provider against a custom endpoint (used by HTTP-level tests).
    pub fn with_base_url(base_url: impl Into<String>, fetch_full_page: bool) -> Self {
        Self {
            base_url: base_url.into(),
            fetch_full_page,
            client: Client::builder()
                .user_agent("Mozilla/5.0 (compatible; Delver/0.1)")
                .timeout(Duration::from_secs(30))
                .build()
                .expect("Failed to create HTTP client"),
        }
    }

    async fn fetch_batch(
        &self,
        query: &str,
        max_results: usize,
    ) -> Result<Vec<SearchResult>, reqwest::Error> {
        let url = format!(
            "{}/html/?q={}",
            self.base_url,
            urlencoding::encode(query)
        );

        let response = self.client.get(&url).send().await?.error_for_status()?;
        let html = response.text().await?;

        let mut results = extract_results(&html, max_results);

        if self.fetch_full_page {
            for result in &mut results {
                match self.fetch_page(&result.url).await {
                    Ok(text) => result.content = text,
                    Err(e) => {
                        tracing::warn!(
                            "Failed to fetch full page content for {}: {}",
                            result.url,
                            e
                        );
                    }
                }
            }
        }

        Ok(results)
    }

    async fn fetch_page(&self, url: &str) -> Result<String, reqwest::Error> {
        let response = self.client.get(url).send().await?.error_for_status()?;

        let is_html = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|s| s.contains("text/html"))
            .unwrap_or(true);

        let body = response.text().await?;
        let text = if is_html {
            extract_text_from_html(&body)
        } else {
            body
        };

        Ok(truncate_chars(&text, MAX_PAGE_CHARS))
    }
}

#[async_trait]
impl SearchProvider for DuckDuckGoProvider {
    fn name(&self) -> &str {
        "duckduckgo"
    }

    async fn search(&self, query: &str, max_results: usize) -> Vec<SearchResult> {
        match self.fetch_batch(query, max_results).await {
            Ok(results) => {
                tracing::debug!("DuckDuckGo returned {} results for '{}'", results.len(), query);
                results
            }
            Err(e) => {
                tracing::warn!("DuckDuckGo search failed for '{}': {}", query, e);
                Vec::new()
            }
        }
    }
}

/// Extract up to `max_results` results from DuckDuckGo HTML.
///
/// Incomplete result blocks are dropped individually; the surviving batch
/// is deduplicated by URL (first occurrence wins).
fn extract_results(html: &str, max_results: usize) -> Vec<SearchResult> {
    let mut results = Vec::new();

    for chunk in html.split("class=\"result__body\"").skip(1) {
        if results.len() >= max_results {
            break;
        }

        let title = element_text(chunk, "class=\"result__a\"");
        let url = element_text(chunk, "class=\"result__url\"");
        let snippet = element_text(chunk, "class=\"result__snippet\"");

        match (title, url, snippet) {
            (Some(title), Some(url), Some(snippet))
                if !title.trim().is_empty() && !url.trim().is_empty() =>
            {
                results.push(SearchResult::new(
                    html_decode(title.trim()),
                    normalize_url(url.trim()),
                    html_decode(snippet.trim()),
                ));
            }
            _ => {
                tracing::warn!("Dropping incomplete DuckDuckGo result");
            }
        }
    }

    dedup_batch(results)
}

/// Pull the inner text of the first element carrying `marker` in its
/// attribute list.
fn element_text(chunk: &str, marker: &str) -> Option<String> {
    chunk
        .split(marker)
        .nth(1)?
        .split('>')
        .nth(1)?
        .split('<')
        .next()
        .map(|s| s.to_string())
}

/// Ensure the URL carries a scheme so it can be fetched and cited.
fn normalize_url(url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("https://{}", url)
    }
}

/// Basic HTML entity decoding.
fn html_decode(s: &str) -> String {
    s.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
}

/// Extract readable text from HTML (simple approach).
fn extract_text_from_html(html: &str) -> String {
    let without_scripts = strip_element(html, "<script", "</script>");
    let without_styles = strip_element(&without_scripts, "<style", "</style>");

    let mut text = String::new();
    let mut in_tag = false;
    for c in without_styles.chars() {
        match c {
            '<' => in_tag = true,
            '>' => {
                in_tag = false;
                text.push(' ');
            }
            _ if !in_tag => text.push(c),
            _ => {}
        }
    }

    let collapsed: String = text.split_whitespace().collect::<Vec<_>>().join(" ");
    html_decode(&collapsed)
}

/// Remove every `open`..`close` element from `html`, including the tags.
fn strip_element(html: &str, open: &str, close: &str) -> String {
    let mut text = html.to_string();
    while let Some(start) = text.find(open) {
        match text[start..].find(close) {
            Some(end) => {
                text.replace_range(start..start + end + close.len(), "");
            }
            None => break,
        }
    }
    text
}

/// Truncate to at most `max` characters, respecting char boundaries.
fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => format!("{}... [content truncated]", &s[..idx]),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FIXTURE: &str = r#"
        <div class="result__body">
            <a class="result__a" href="/l/?uddg=x">Rust Book</a>
            <a class="result__url" href="/l/?uddg=x"> doc.rust-lang.org/book </a>
            <a class="result__snippet" href="/l/?uddg=x">Learn Rust &amp; its ownership model</a>
        </div>
        <div class="result__body">
            <a class="result__a" href="/l/?uddg=y"></a>
            <a class="result__url" href="/l/?uddg=y"> broken.example.com </a>
        </div>
        <div class="result__body">
            <a class="result__a" href="/l/?uddg=z">Rustonomicon</a>
            <a class="result__url" href="/l/?uddg=z"> doc.rust-lang.org/nomicon </a>
            <a class="result__snippet" href="/l/?uddg=z">The dark arts of unsafe Rust</a>
        </div>
    "#;

    #[test]
    fn test_extract_results_from_fixture() {
        let results = extract_results(FIXTURE, 10);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].title, "Rust Book");
        assert_eq!(results[0].url, "https://doc.rust-lang.org/book");
        assert_eq!(results[0].content, "Learn Rust & its ownership model");
        assert_eq!(results[1].title, "Rustonomicon");
    }

    #[test]
    fn test_extract_results_respects_max() {
        let results = extract_results(FIXTURE, 1);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "Rust Book");
    }

    #[test]
    fn test_extract_results_drops_incomplete_block() {
        // The middle block has an empty title and no snippet; only it is dropped.
        let results = extract_results(FIXTURE, 10);
        assert!(results.iter().all(|r| r.url != "https://broken.example.com"));
    }

    #[test]
    fn test_duplicate_urls_keep_first() {
        let html = r##"
            <div class="result__body">
                <a class="result__a" href="#">First</a>
                <a class="result__url" href="#"> same.example.com/page </a>
                <a class="result__snippet" href="#">first snippet</a>
            </div>
            <div class="result__body">
                <a class="result__a" href="#">Second</a>
                <a class="result__url" href="#"> same.example.com/page </a>
                <a class="result__snippet" href="#">second snippet</a>
            </div>
        "##;
        let results = extract_results(html, 10);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].title, "First");
        assert_eq!(results[0].content, "first snippet");
    }

    #[test]
    fn test_normalize_url() {
        assert_eq!(normalize_url("example.com/a"), "https://example.com/a");
        assert_eq!(normalize_url("http://example.com/a"), "http://example.com/a");
        assert_eq!(normalize_url("https://example.com/a"), "https://example.com/a");
    }

    #[test]
    fn test_html_decode() {
        assert_eq!(html_decode("a &amp; b &lt;c&gt;"), "a & b <c>");
        assert_eq!(html_decode("&quot;hi&quot;&nbsp;&#39;x&#39;"), "\"hi\" 'x'");
    }

    #[test]
    fn test_extract_text_from_html() {
        let html = "<html><head><style>body { color: red }</style>\
                    <script>alert('x')</script></head>\
                    <body><h1>Title</h1><p>Some &amp; text</p></body></html>";
        assert_eq!(extract_text_from_html(html), "Title Some & text");
    }

    #[test]
    fn test_truncate_chars_multibyte() {
        let s = "héllo wörld";
        assert_eq!(truncate_chars(s, 100), s);
        let truncated = truncate_chars(s, 4);
        assert!(truncated.starts_with("héll"));
        assert!(truncated.ends_with("[content truncated]"));
    }
}
