//! Research Loop Core
//!
//! This module implements the iterative research cycle: plan a query,
//! search the web, fold results into a running summary, reflect on the
//! knowledge gap, and loop until the configured budget is spent.
//!
//! The controller drives every step; the planner, summarizer, and search
//! provider never call each other directly — data flows through the
//! accumulating `ResearchState` record the controller owns.

pub mod controller;
pub mod planner;
pub mod prompts;
pub mod state;
pub mod summarizer;

pub use controller::{
    finalize_summary, route_after_reflection, ResearchController, ResearchReport, Route,
};
pub use planner::{fallback_query, QueryPlanner};
pub use state::ResearchState;
pub use summarizer::Summarizer;
