/// Identifier of a task inside the queue
pub type TaskId = u64;

/// A unit of work derived from the objective
///
/// `result` and `embedding` are only ever set together, through
/// [`Task::record_result`], once the task has been executed.
#[derive(Debug, Clone, PartialEq)]
pub struct Task {
    /// Queue identifier, assigned on enqueue when absent
    pub id: Option<TaskId>,
    /// Description of the work to perform
    pub name: String,
    result: Option<String>,
    embedding: Option<Vec<f32>>,
}

impl Task {
    /// Creates a task without an id; the queue assigns one on enqueue
    ///
    /// # Arguments
    ///
    /// * `name` - Description of the work to perform
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            result: None,
            embedding: None,
        }
    }

    /// Creates a task with an explicit id
    pub fn with_id(id: TaskId, name: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            ..Self::new(name)
        }
    }

    /// Stores the execution result together with its embedding
    ///
    /// A task is embedded once; later calls leave the first result untouched.
    ///
    /// # Returns
    ///
    /// `true` if the result was recorded, `false` if the task already had one
    pub fn record_result(&mut self, result: String, embedding: Vec<f32>) -> bool {
        if self.result.is_some() {
            return false;
        }
        self.result = Some(result);
        self.embedding = Some(embedding);
        true
    }

    pub fn result(&self) -> Option<&str> {
        self.result.as_deref()
    }

    pub fn embedding(&self) -> Option<&[f32]> {
        self.embedding.as_deref()
    }

    pub fn is_executed(&self) -> bool {
        self.result.is_some()
    }

    /// Id of the vector record holding this task's result
    pub fn record_id(&self) -> Option<String> {
        self.id.map(|id| format!("result_{}", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn result_and_embedding_are_set_together() {
        let mut task = Task::with_id(1, "Develop a task list");
        assert!(task.result().is_none());
        assert!(task.embedding().is_none());

        assert!(task.record_result("done".to_string(), vec![0.1, 0.2]));
        assert_eq!(task.result(), Some("done"));
        assert_eq!(task.embedding(), Some(&[0.1, 0.2][..]));
    }

    #[test]
    fn embedding_is_never_recomputed() {
        let mut task = Task::with_id(3, "Write a report");
        task.record_result("first".to_string(), vec![1.0]);
        assert!(!task.record_result("second".to_string(), vec![2.0]));
        assert_eq!(task.result(), Some("first"));
        assert_eq!(task.embedding(), Some(&[1.0][..]));
    }

    #[test]
    fn record_id_derives_from_task_id() {
        assert_eq!(Task::with_id(7, "x").record_id().as_deref(), Some("result_7"));
        assert_eq!(Task::new("x").record_id(), None);
    }
}
