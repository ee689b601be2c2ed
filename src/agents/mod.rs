mod context;
mod creation;
mod execution;
mod prioritization;

pub use context::*;
pub use creation::*;
pub use execution::*;
pub use prioritization::*;

use crate::core::Task;
use crate::errors::Error;
use tracing::warn;

/// Tasks parsed from an agent response, plus a warning when nothing usable came back
#[derive(Debug)]
pub struct AgentOutput {
    pub tasks: Vec<Task>,
    /// Set to [`Error::MalformedAgentResponse`] when zero tasks were parsed while work was pending
    pub warning: Option<Error>,
}

impl AgentOutput {
    /// Wraps parsed tasks, flagging an empty parse when `pending` tasks existed
    pub(crate) fn checked(agent: &'static str, tasks: Vec<Task>, pending: usize) -> Self {
        let warning = if tasks.is_empty() && pending > 0 {
            let err = Error::MalformedAgentResponse { agent, pending };
            warn!("{}", err);
            Some(err)
        } else {
            None
        };
        Self { tasks, warning }
    }

    pub fn names(&self) -> Vec<String> {
        self.tasks.iter().map(|t| t.name.clone()).collect()
    }
}
