use super::AgentOutput;
use crate::constants::{CREATION_MAX_TOKENS, CREATION_TEMPERATURE};
use crate::core::Task;
use crate::errors::Result;
use crate::llm::{CompletionRequest, CompletionService};
use crate::utils::join_task_names;
use tracing::debug;

/// Agent deriving follow-up tasks from the latest execution result.
///
/// It never touches the queue; the orchestrator enqueues what it returns.
pub struct CreationAgent<'a> {
    /// Client for interacting with the language model
    pub llm: &'a dyn CompletionService,
}

impl<'a> CreationAgent<'a> {
    pub fn new(llm: &'a dyn CompletionService) -> Self {
        Self { llm }
    }

    /// Proposes new tasks for the objective
    ///
    /// # Arguments
    /// * `objective` - Objective of the run
    /// * `result` - Result text of the last executed task
    /// * `task_description` - Name of the task that produced `result`
    /// * `pending` - Names of the tasks still in the queue
    ///
    /// # Errors
    /// Propagates `ServiceUnavailable` from the completion service
    pub async fn create_tasks(
        &self,
        objective: &str,
        result: &str,
        task_description: &str,
        pending: &[String],
    ) -> Result<AgentOutput> {
        let prompt = creation_prompt(objective, result, task_description, pending);
        let request = CompletionRequest::new(prompt, CREATION_MAX_TOKENS, CREATION_TEMPERATURE);
        let response = self.llm.create(&request).await?;
        let tasks = parse_created_tasks(&response);
        debug!("CreationAgent: {} candidate task(s)", tasks.len());
        Ok(AgentOutput::checked("creation", tasks, pending.len()))
    }
}

/// Builds the task creation prompt
pub fn creation_prompt(
    objective: &str,
    result: &str,
    task_description: &str,
    pending: &[String],
) -> String {
    format!(
        "You are a task creation AI that uses the result of an execution agent to create new tasks \
with the following objective: {objective}.\n\
The last completed task has the result: {result}\n\
This result was based on this task description: {task_description}.\n\
These are incomplete tasks: {task_list}.\n\
Based on the result, create new tasks to be completed by the AI system that do not overlap with \
incomplete tasks. Return one task per line.",
        task_list = join_task_names(pending),
    )
}

/// Turns every non-empty line of a creation response into a new task
///
/// Content is not validated; ids are left for the queue to assign.
pub fn parse_created_tasks(response: &str) -> Vec<Task> {
    response
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(Task::new)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_line_becomes_a_task() {
        let tasks = parse_created_tasks("Write a report\nReview the report\n");
        let names: Vec<_> = tasks.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["Write a report", "Review the report"]);
        assert!(tasks.iter().all(|t| t.id.is_none()));
    }

    #[test]
    fn blank_lines_are_skipped() {
        let tasks = parse_created_tasks("\n  \nOnly task\r\n\n");
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0].name, "Only task");
    }

    #[test]
    fn empty_response_yields_no_tasks() {
        assert!(parse_created_tasks("").is_empty());
    }

    #[test]
    fn prompt_lists_pending_tasks() {
        let pending = vec!["Buy milk".to_string(), "Call bank".to_string()];
        let prompt = creation_prompt("Objective", "Result text", "Previous task", &pending);
        assert!(prompt.contains("Objective"));
        assert!(prompt.contains("Result text"));
        assert!(prompt.contains("Previous task"));
        assert!(prompt.contains("Buy milk, Call bank"));
    }
}
