use super::task::{Task, TaskId};
use crate::errors::{Error, Result};
use std::collections::VecDeque;

/// Ordered collection of pending tasks; position 0 executes next
#[derive(Debug, Default, Clone)]
pub struct TaskQueue {
    tasks: VecDeque<Task>,
}

impl TaskQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a task to the tail, assigning `max(existing ids) + 1` when it
    /// has no id or its id is already queued
    ///
    /// # Returns
    ///
    /// The id the task carries once queued
    pub fn enqueue(&mut self, mut task: Task) -> TaskId {
        let id = match task.id {
            Some(id) if !self.contains_id(id) => id,
            _ => {
                let id = self.next_id();
                task.id = Some(id);
                id
            }
        };
        self.tasks.push_back(task);
        id
    }

    /// Removes and returns the task at position 0
    ///
    /// # Errors
    ///
    /// Returns [`Error::EmptyQueue`] when no task is pending
    pub fn dequeue_head(&mut self) -> Result<Task> {
        self.tasks.pop_front().ok_or(Error::EmptyQueue)
    }

    /// Discards the current contents and installs `ordered` as the new queue
    pub fn replace_all(&mut self, ordered: Vec<Task>) {
        self.tasks = ordered.into();
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// Task names in queue order, used to build prompts
    pub fn snapshot_names(&self) -> Vec<String> {
        self.tasks.iter().map(|t| t.name.clone()).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Task> {
        self.tasks.iter()
    }

    fn contains_id(&self, id: TaskId) -> bool {
        self.tasks.iter().any(|t| t.id == Some(id))
    }

    fn next_id(&self) -> TaskId {
        self.tasks.iter().filter_map(|t| t.id).max().unwrap_or(0) + 1
    }
}
