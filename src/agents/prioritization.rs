use super::AgentOutput;
use crate::constants::{PRIORITIZATION_MAX_TOKENS, PRIORITIZATION_TEMPERATURE};
use crate::core::{Task, TaskId};
use crate::errors::Result;
use crate::llm::{CompletionRequest, CompletionService};
use crate::utils::join_task_names;
use tracing::debug;

/// Agent re-ranking and cleaning the whole pending queue.
///
/// Its output replaces the queue; whatever the response omits is dropped.
pub struct PrioritizationAgent<'a> {
    /// Client for interacting with the language model
    pub llm: &'a dyn CompletionService,
}

impl<'a> PrioritizationAgent<'a> {
    pub fn new(llm: &'a dyn CompletionService) -> Self {
        Self { llm }
    }

    /// Asks the model for a renumbered list of the pending tasks
    ///
    /// # Arguments
    /// * `objective` - Objective of the run
    /// * `completed_task_id` - Id of the task executed this cycle
    /// * `pending` - Names of the tasks currently queued
    ///
    /// # Returns
    /// * `Result<AgentOutput>` - The new queue contents, in response order
    pub async fn prioritize(
        &self,
        objective: &str,
        completed_task_id: TaskId,
        pending: &[String],
    ) -> Result<AgentOutput> {
        let next_task_id = completed_task_id + 1;
        let prompt = prioritization_prompt(objective, next_task_id, pending);
        let request = CompletionRequest::new(
            prompt,
            PRIORITIZATION_MAX_TOKENS,
            PRIORITIZATION_TEMPERATURE,
        );
        let response = self.llm.create(&request).await?;
        let tasks = parse_prioritized_tasks(&response, next_task_id);
        debug!(
            "PrioritizationAgent: {} of {} task(s) kept",
            tasks.len(),
            pending.len()
        );
        Ok(AgentOutput::checked("prioritization", tasks, pending.len()))
    }
}

/// Builds the prioritization prompt
pub fn prioritization_prompt(objective: &str, next_task_id: TaskId, pending: &[String]) -> String {
    format!(
        "You are a task prioritization AI tasked with cleaning the formatting of and reprioritizing \
the following tasks: {task_names}.\n\
Consider the ultimate objective of your team: {objective}. Do not remove any tasks.\n\
Return the result as a numbered list, like:\n\
#. First task\n\
#. Second task\n\
Start the task list with number {next_task_id}.",
        task_names = join_task_names(pending),
    )
}

/// Extracts the task name from a numbered line `"<n>. <name>"`
///
/// Only the first `.` separates; both sides are trimmed. The marker may be
/// an integer or the `#` placeholder used in the prompt's example list.
/// Lines without a `.`, with any other marker or an empty name are rejected.
pub fn parse_numbered_line(line: &str) -> Option<&str> {
    let (marker, name) = line.trim().split_once('.')?;
    let marker = marker.trim();
    if marker != "#" && marker.parse::<u64>().is_err() {
        return None;
    }
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    Some(name)
}

/// Parses a prioritization response into the new queue
///
/// Surviving lines keep response order and are numbered consecutively from
/// `next_task_id`, so ids stay unique even when the model repeats numbers.
pub fn parse_prioritized_tasks(response: &str, next_task_id: TaskId) -> Vec<Task> {
    response
        .lines()
        .filter_map(parse_numbered_line)
        .zip(next_task_id..)
        .map(|(name, id)| Task::with_id(id, name))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_lines_are_dropped() {
        let tasks = parse_prioritized_tasks("1. Buy milk\nnot-a-task\n2. Call bank", 1);
        assert_eq!(
            tasks,
            vec![Task::with_id(1, "Buy milk"), Task::with_id(2, "Call bank")]
        );
    }

    #[test]
    fn numbering_starts_after_completed_task() {
        let tasks = parse_prioritized_tasks("1. Task A", 2);
        assert_eq!(tasks, vec![Task::with_id(2, "Task A")]);
    }

    #[test]
    fn only_first_dot_splits() {
        assert_eq!(
            parse_numbered_line(" 3. Read ch. 4 of the manual "),
            Some("Read ch. 4 of the manual")
        );
    }

    #[test]
    fn rejects_non_numeric_and_empty_names() {
        assert_eq!(parse_numbered_line("Note. remember this"), None);
        assert_eq!(parse_numbered_line("4."), None);
        assert_eq!(parse_numbered_line("#."), None);
        assert_eq!(parse_numbered_line(""), None);
    }

    #[test]
    fn repeated_numbers_still_get_unique_ids() {
        let tasks = parse_prioritized_tasks("5. a\n5. b\n5. c", 5);
        let ids: Vec<_> = tasks.iter().filter_map(|t| t.id).collect();
        assert_eq!(ids, vec![5, 6, 7]);
    }

    #[test]
    fn placeholder_markers_from_prompt_example_are_accepted() {
        let tasks = parse_prioritized_tasks("#. Buy milk\n#. Call bank", 2);
        assert_eq!(
            tasks,
            vec![Task::with_id(2, "Buy milk"), Task::with_id(3, "Call bank")]
        );
    }

    #[test]
    fn garbage_response_yields_empty_queue() {
        assert!(parse_prioritized_tasks("I cannot help with that", 2).is_empty());
    }

    #[test]
    fn prompt_mentions_start_number() {
        let prompt = prioritization_prompt("Objective", 7, &["a".to_string()]);
        assert!(prompt.contains("Start the task list with number 7."));
        assert!(prompt.contains("following tasks: a."));
    }
}
