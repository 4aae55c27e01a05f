//! CLI interface for Delver
//!
//! This module provides the command-line interface using clap's derive API.
//! It defines the research command and global flags for output and logging.

use clap::{Parser, Subcommand};

/// Delver Research Engine
///
/// A local-first research agent that iteratively searches the web, folds
/// findings into a running summary, and reflects on knowledge gaps until
/// a configured loop budget is spent.
#[derive(Parser, Debug)]
#[command(name = "delver")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    pub json: bool,

    /// Set log level (error, warn, info, debug, trace)
    #[arg(long, global = true, value_name = "LEVEL")]
    pub log: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Research a topic and print the final annotated summary
    Research {
        /// The topic to research
        topic: String,
    },

    /// Show provider availability
    Status,
}
