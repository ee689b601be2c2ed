//! Autonomous task-management loop.
//!
//! Given an objective, the [`core::Orchestrator`] keeps a prioritized queue of
//! textual tasks, executes the head task with a language model, stores the
//! result as a vector, derives follow-up tasks and re-prioritizes the queue.

pub mod agents;
pub mod bootstrap;
pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod db;
pub mod errors;
pub mod event;
pub mod llm;
mod schema;
pub mod utils;

pub use errors::{Error, Result};
