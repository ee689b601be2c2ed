//! Core of the task loop
//!
//! This module contains:
//! - The task record and the task queue
//! - The vector store abstraction with its in-memory backend
//! - The orchestrator driving the agents cycle by cycle

mod orchestrator;
pub mod rag;
mod task;
mod task_queue;

pub use orchestrator::*;
pub use task::*;
pub use task_queue::*;
