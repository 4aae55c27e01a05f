//! HTTP-level tests for the Ollama and DuckDuckGo providers
//!
//! Validates request shape, response parsing, and error mapping using
//! mock servers.

use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use delver_engine::llm::{ollama::OllamaProvider, LlmError, LlmProvider, Message, OutputMode};
use delver_engine::search::{duckduckgo::DuckDuckGoProvider, SearchProvider};

fn ollama_chat_response(content: &str) -> serde_json::Value {
    json!({
        "model": "llama3.1:8b",
        "created_at": "2024-06-01T10:00:00.000000Z",
        "message": {
            "role": "assistant",
            "content": content
        },
        "done": true
    })
}

#[tokio::test]
async fn test_ollama_generate_text_mode() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(ollama_chat_response("a plain summary")),
        )
        .mount(&server)
        .await;

    let provider = OllamaProvider::new(server.uri(), "llama3.1:8b");
    let content = provider
        .generate(&[Message::user("Summarize this")], OutputMode::Text)
        .await
        .unwrap();

    assert_eq!(content, "a plain summary");
}

#[tokio::test]
async fn test_ollama_generate_json_mode_sets_format() {
    let server = MockServer::start().await;

    // Only a request carrying format=json matches; a missing field would 404.
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_partial_json(json!({"format": "json", "stream": false})))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(ollama_chat_response(r#"{"query": "rust lifetimes"}"#)),
        )
        .mount(&server)
        .await;

    let provider = OllamaProvider::new(server.uri(), "llama3.1:8b");
    let content = provider
        .generate(
            &[Message::system("sys"), Message::user("Generate a query")],
            OutputMode::Json,
        )
        .await
        .unwrap();

    assert_eq!(content, r#"{"query": "rust lifetimes"}"#);
}

#[tokio::test]
async fn test_ollama_http_error_maps_to_provider_unavailable() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let provider = OllamaProvider::new(server.uri(), "llama3.1:8b");
    let err = provider
        .generate(&[Message::user("hi")], OutputMode::Text)
        .await
        .unwrap_err();

    assert!(matches!(err, LlmError::ProviderUnavailable(_)));
}

#[tokio::test]
async fn test_ollama_malformed_body_maps_to_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&server)
        .await;

    let provider = OllamaProvider::new(server.uri(), "llama3.1:8b");
    let err = provider
        .generate(&[Message::user("hi")], OutputMode::Text)
        .await
        .unwrap_err();

    assert!(matches!(err, LlmError::ParseError(_)));
}

#[tokio::test]
async fn test_ollama_health_check() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"models": []})))
        .mount(&server)
        .await;

    let healthy = OllamaProvider::new(server.uri(), "llama3.1:8b");
    assert!(healthy.check_health().await);

    let unreachable = OllamaProvider::new("http://127.0.0.1:1", "llama3.1:8b");
    assert!(!unreachable.check_health().await);
}

fn ddg_fixture(page_base: &str) -> String {
    format!(
        r##"
        <div class="result__body">
            <a class="result__a" href="#">Quantum Intro</a>
            <a class="result__url" href="#"> {page_base}/intro </a>
            <a class="result__snippet" href="#">An introduction snippet</a>
        </div>
        <div class="result__body">
            <a class="result__a" href="#">Quantum Survey</a>
            <a class="result__url" href="#"> {page_base}/survey </a>
            <a class="result__snippet" href="#">A survey snippet</a>
        </div>
        "##
    )
}

#[tokio::test]
async fn test_duckduckgo_parses_results() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/html/"))
        .and(query_param("q", "quantum computing"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ddg_fixture(&server.uri())))
        .mount(&server)
        .await;

    let provider = DuckDuckGoProvider::with_base_url(server.uri(), false);
    let results = provider.search("quantum computing", 3).await;

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].title, "Quantum Intro");
    assert_eq!(results[0].url, format!("{}/intro", server.uri()));
    assert_eq!(results[0].content, "An introduction snippet");
}

#[tokio::test]
async fn test_duckduckgo_transport_failure_yields_empty_batch() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/html/"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let provider = DuckDuckGoProvider::with_base_url(server.uri(), false);
    let results = provider.search("anything", 3).await;
    assert!(results.is_empty());
}

#[tokio::test]
async fn test_duckduckgo_full_page_fetch_enriches_content() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/html/"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ddg_fixture(&server.uri())))
        .mount(&server)
        .await;

    // /intro serves full page text; /survey fails and keeps its snippet.
    Mock::given(method("GET"))
        .and(path("/intro"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(
                "<html><body><p>Full intro page text</p></body></html>",
                "text/html",
            ),
        )
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/survey"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let provider = DuckDuckGoProvider::with_base_url(server.uri(), true);
    let results = provider.search("quantum computing", 3).await;

    assert_eq!(results.len(), 2);
    assert_eq!(results[0].content, "Full intro page text");
    assert_eq!(results[1].content, "A survey snippet");
}
