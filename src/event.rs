use crate::core::TaskId;

/// Progress notifications published by the orchestrator
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// The run started for an objective
    RunStarted(String),

    /// Queue contents at the start of a cycle, as (id, name)
    TaskListUpdated(Vec<(TaskId, String)>),

    /// A task left the queue and is being executed
    TaskStarted(TaskId, String),

    /// A task produced its result
    TaskCompleted(TaskId, String),

    /// The creation agent proposed new task names
    TasksCreated(Vec<String>),

    /// The prioritization agent installed a new queue of the given length
    QueueReprioritized(usize),

    /// A recoverable problem, such as an agent response with no usable lines
    Warning(String),

    /// The run ended after the given number of cycles
    RunFinished(usize),
}
