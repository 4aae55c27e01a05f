//! Configuration management
//!
//! This module handles loading and validation of the Delver configuration.
//! Configuration is read from environment variables once at startup and is
//! immutable for the duration of a research run.
//!
//! # Recognized Variables
//!
//! - `OLLAMA_BASE_URL` — Ollama API endpoint (default `http://localhost:11434`)
//! - `OLLAMA_MODEL` — model name (default `llama3.1:8b`)
//! - `MAX_WEB_RESEARCH_LOOPS` — loop budget checked after each full iteration (default `3`)
//! - `SEARCH_MAX_RESULTS` — per-query result cap (default `3`)
//! - `FETCH_FULL_PAGE` — enrich results with full-page text (default `false`)
//! - `LOG_LEVEL` — default log level when `RUST_LOG` is unset (default `info`)
//!
//! # Examples
//!
//! ```no_run
//! use delver_engine::config::Config;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config::from_env()?;
//! println!("Model: {}", config.ollama.model);
//! # Ok(())
//! # }
//! ```

use thiserror::Error;

/// Errors raised while reading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Main configuration structure
#[derive(Debug, Clone)]
pub struct Config {
    /// Core engine settings
    pub core: CoreConfig,

    /// Ollama provider settings
    pub ollama: OllamaConfig,

    /// Research loop settings
    pub research: ResearchConfig,
}

/// Core engine configuration
#[derive(Debug, Clone)]
pub struct CoreConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

/// Ollama provider configuration
#[derive(Debug, Clone)]
pub struct OllamaConfig {
    /// Base URL for the Ollama API
    pub base_url: String,

    /// Model name
    pub model: String,
}

/// Research loop configuration
#[derive(Debug, Clone)]
pub struct ResearchConfig {
    /// Loop budget; the routing decision after each full iteration keeps
    /// looping while `loop_count <= max_web_research_loops`, so a budget
    /// of N yields N + 1 search iterations.
    pub max_web_research_loops: u32,

    /// Maximum results requested per search call
    pub max_search_results: usize,

    /// Fetch full-page text for each result (falls back to the snippet
    /// per result on failure)
    pub fetch_full_page: bool,
}

// Default value functions
fn default_log_level() -> String {
    "info".to_string()
}

fn default_ollama_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_ollama_model() -> String {
    "llama3.1:8b".to_string()
}

fn default_max_web_research_loops() -> u32 {
    3
}

fn default_max_search_results() -> usize {
    3
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: default_ollama_base_url(),
            model: default_ollama_model(),
        }
    }
}

impl Default for ResearchConfig {
    fn default() -> Self {
        Self {
            max_web_research_loops: default_max_web_research_loops(),
            max_search_results: default_max_search_results(),
            fetch_full_page: false,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            core: CoreConfig::default(),
            ollama: OllamaConfig::default(),
            research: ResearchConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if a numeric or boolean variable
    /// is set but cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    ///
    /// `from_env` delegates here; tests supply a map-backed lookup so they
    /// never touch the process environment.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let core = CoreConfig {
            log_level: lookup("LOG_LEVEL").unwrap_or_else(default_log_level),
        };

        let ollama = OllamaConfig {
            base_url: lookup("OLLAMA_BASE_URL").unwrap_or_else(default_ollama_base_url),
            model: lookup("OLLAMA_MODEL").unwrap_or_else(default_ollama_model),
        };

        let research = ResearchConfig {
            max_web_research_loops: parse_var(
                "MAX_WEB_RESEARCH_LOOPS",
                lookup("MAX_WEB_RESEARCH_LOOPS"),
                default_max_web_research_loops(),
            )?,
            max_search_results: parse_var(
                "SEARCH_MAX_RESULTS",
                lookup("SEARCH_MAX_RESULTS"),
                default_max_search_results(),
            )?,
            fetch_full_page: match lookup("FETCH_FULL_PAGE") {
                Some(value) => parse_bool(&value)
                    .map_err(|e| ConfigError::InvalidValue("FETCH_FULL_PAGE".to_string(), e))?,
                None => false,
            },
        };

        Ok(Self {
            core,
            ollama,
            research,
        })
    }
}

fn parse_var<T: std::str::FromStr>(
    key: &str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError>
where
    T::Err: std::fmt::Display,
{
    match value {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|e| ConfigError::InvalidValue(key.to_string(), format!("{}", e))),
        None => Ok(default),
    }
}

fn parse_bool(value: &str) -> Result<bool, String> {
    match value.trim().to_lowercase().as_str() {
        "1" | "true" | "t" | "yes" | "y" | "on" => Ok(true),
        "0" | "false" | "f" | "no" | "n" | "off" => Ok(false),
        other => Err(format!("expected boolean-like value, got: {}", other)),
    }
}
