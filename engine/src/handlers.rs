//! Command handlers for CLI operations
//!
//! This module implements the handlers for the CLI commands:
//! - research: run one full research cycle and print the annotated summary
//! - status: report provider availability

use anyhow::Result;
use serde_json::json;
use std::sync::Arc;

use crate::config::Config;
use crate::llm::{ollama::OllamaProvider, LlmProvider};
use crate::research::ResearchController;
use crate::search::{duckduckgo::DuckDuckGoProvider, SearchProvider};

/// Output format for command results
#[derive(Debug, Clone, Copy)]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output for machine consumption
    Json,
}

/// Research a topic and print the final annotated summary.
///
/// Wires the Ollama provider and the DuckDuckGo provider into a
/// controller and runs a single research cycle. A generation failure
/// aborts with no partial output; the process exit code surfaces it.
pub async fn handle_research(topic: String, config: &Config, format: OutputFormat) -> Result<()> {
    let llm: Arc<dyn LlmProvider> = Arc::new(OllamaProvider::new(
        config.ollama.base_url.clone(),
        config.ollama.model.clone(),
    ));
    let search: Arc<dyn SearchProvider> =
        Arc::new(DuckDuckGoProvider::new(config.research.fetch_full_page));

    let controller = ResearchController::new(llm, search, config.research.clone());
    let report = controller.run(&topic).await?;

    match format {
        OutputFormat::Text => println!("{}", report.summary),
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
    }

    Ok(())
}

/// Show provider availability.
pub async fn handle_status(config: &Config, format: OutputFormat) -> Result<()> {
    let ollama = OllamaProvider::new(config.ollama.base_url.clone(), config.ollama.model.clone());
    let ollama_available = ollama.check_health().await;

    match format {
        OutputFormat::Text => {
            println!("Providers:");
            println!(
                "  Ollama ({}): {}",
                config.ollama.base_url,
                if ollama_available {
                    "available"
                } else {
                    "unavailable"
                }
            );
            println!("  Model: {}", config.ollama.model);
        }
        OutputFormat::Json => {
            let status = json!({
                "ollama": {
                    "base_url": config.ollama.base_url,
                    "model": config.ollama.model,
                    "available": ollama_available,
                }
            });
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
    }

    Ok(())
}
