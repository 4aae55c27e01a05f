//! Delver Engine Library
//!
//! This library provides the core functionality of the Delver research
//! engine. It is used by both the main binary and integration tests.

/// Configuration management module
pub mod config;

/// LLM provider abstraction layer
pub mod llm;

/// Web search abstraction layer
pub mod search;

/// Research loop core module
pub mod research;

/// Telemetry and Observability
pub mod telemetry;

/// CLI interface module
pub mod cli;

/// Command handlers module
pub mod handlers;
