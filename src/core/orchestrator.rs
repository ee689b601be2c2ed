use super::rag::{RecordPayload, VectorRecord, VectorStoreProvider};
use super::task::{Task, TaskId};
use super::task_queue::TaskQueue;
use crate::agents::{
    AgentOutput, ContextAgent, CreationAgent, ExecutionAgent, PrioritizationAgent,
};
use crate::constants::{DEFAULT_CONTEXT_TOP_K, DEFAULT_ITERATIONS, LOG_EXCERPT_CHARS};
use crate::errors::{Error, Result};
use crate::event::Event;
use crate::llm::{CompletionService, Embedder};
use crate::utils::truncate_for_log;
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tracing::{debug, info, warn};

/// Knobs fixed for the whole run
#[derive(Debug, Clone, PartialEq)]
pub struct RunOptions {
    /// Maximum number of cycles
    pub iterations: usize,
    /// Number of prior results retrieved for each execution
    pub context_top_k: usize,
    /// Write retrieved context into the execution prompt
    pub context_in_prompt: bool,
    /// When the queue is empty, still run creation and prioritization with the
    /// previous cycle's result instead of stopping
    pub create_without_execution: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            context_top_k: DEFAULT_CONTEXT_TOP_K,
            context_in_prompt: true,
            create_without_execution: false,
        }
    }
}

/// What a single cycle did
#[derive(Debug, Clone, PartialEq)]
pub enum CycleOutcome {
    /// The head task was executed and the queue rebuilt
    Executed { task_id: TaskId, created: usize },
    /// Nothing was queued; creation ran on the previous cycle's result
    CarriedOver { task_id: TaskId, created: usize },
    /// Nothing was queued and nothing ran
    Idle,
}

impl CycleOutcome {
    pub fn created(&self) -> usize {
        match self {
            CycleOutcome::Executed { created, .. } | CycleOutcome::CarriedOver { created, .. } => {
                *created
            }
            CycleOutcome::Idle => 0,
        }
    }
}

/// Result of a complete run
#[derive(Debug, Clone)]
pub struct RunSummary {
    /// Number of cycles that ran
    pub cycles: usize,
    /// Executed tasks, in execution order, with their results
    pub executed: Vec<Task>,
    /// Tasks still queued when the run stopped
    pub remaining: Vec<Task>,
}

/// Drives the execute, store, create, reprioritize loop
///
/// The orchestrator exclusively owns the queue; agents only see snapshots of it.
pub struct Orchestrator {
    objective: String,
    objective_embedding: Vec<f32>,
    queue: TaskQueue,
    llm: Arc<dyn CompletionService>,
    embedder: Arc<dyn Embedder>,
    vector_store: Box<dyn VectorStoreProvider>,
    options: RunOptions,
    events: Option<UnboundedSender<Event>>,
    executed: Vec<Task>,
}

impl Orchestrator {
    /// Creates an orchestrator and embeds the objective once for context queries
    ///
    /// # Errors
    ///
    /// Fails with `ServiceUnavailable` when the objective cannot be embedded,
    /// or `DimensionMismatch` when the embedding does not fit the vector store
    pub async fn new(
        objective: &str,
        llm: Arc<dyn CompletionService>,
        embedder: Arc<dyn Embedder>,
        vector_store: Box<dyn VectorStoreProvider>,
        options: RunOptions,
    ) -> Result<Self> {
        let objective_embedding = embedder.embed_text(objective).await?;
        if objective_embedding.len() != vector_store.dimension() {
            return Err(Error::DimensionMismatch {
                expected: vector_store.dimension(),
                actual: objective_embedding.len(),
            });
        }

        Ok(Self {
            objective: objective.to_string(),
            objective_embedding,
            queue: TaskQueue::new(),
            llm,
            embedder,
            vector_store,
            options,
            events: None,
            executed: Vec::new(),
        })
    }

    /// Publishes progress events on `tx`
    pub fn with_events(mut self, tx: UnboundedSender<Event>) -> Self {
        self.events = Some(tx);
        self
    }

    pub fn objective(&self) -> &str {
        &self.objective
    }

    pub fn queue(&self) -> &TaskQueue {
        &self.queue
    }

    pub fn vector_store(&self) -> &dyn VectorStoreProvider {
        self.vector_store.as_ref()
    }

    pub fn executed(&self) -> &[Task] {
        &self.executed
    }

    /// Queues the first task of the run
    pub fn seed(&mut self, first_task: &str) -> TaskId {
        self.queue.enqueue(Task::new(first_task))
    }

    /// Seeds the queue and runs up to `options.iterations` cycles
    ///
    /// Stops early once the queue is empty and the last cycle created nothing.
    ///
    /// # Errors
    ///
    /// Any `ServiceUnavailable` aborts the run; malformed agent responses do not.
    pub async fn run(&mut self, first_task: &str) -> Result<RunSummary> {
        self.publish(Event::RunStarted(self.objective.clone()));
        self.seed(first_task);

        let mut cycles = 0;
        while cycles < self.options.iterations {
            let outcome = self.run_cycle().await?;
            if outcome == CycleOutcome::Idle {
                info!("queue empty, nothing left to run");
                break;
            }
            cycles += 1;
            if self.queue.is_empty() && outcome.created() == 0 {
                info!("queue empty and no new tasks after cycle {}", cycles);
                break;
            }
        }

        info!("run finished after {} cycle(s)", cycles);
        self.publish(Event::RunFinished(cycles));
        Ok(RunSummary {
            cycles,
            executed: self.executed.clone(),
            remaining: self.queue.iter().cloned().collect(),
        })
    }

    /// Runs one cycle of the loop
    pub async fn run_cycle(&mut self) -> Result<CycleOutcome> {
        self.publish(Event::TaskListUpdated(
            self.queue
                .iter()
                .map(|t| (t.id.unwrap_or_default(), t.name.clone()))
                .collect(),
        ));

        let task = match self.queue.dequeue_head() {
            Ok(task) => task,
            Err(Error::EmptyQueue) => return self.carry_over().await,
            Err(e) => return Err(e),
        };
        // enqueue assigns an id to every queued task
        let task_id = task.id.unwrap_or_default();
        info!("executing task {}: {}", task_id, task.name);
        self.publish(Event::TaskStarted(task_id, task.name.clone()));

        let task = self.execute_and_store(task).await?;
        let result = task.result().unwrap_or_default().to_string();
        let name = task.name.clone();
        self.executed.push(task);

        let created = self.create_and_prioritize(task_id, &name, &result).await?;
        Ok(CycleOutcome::Executed { task_id, created })
    }

    async fn carry_over(&mut self) -> Result<CycleOutcome> {
        if !self.options.create_without_execution {
            return Ok(CycleOutcome::Idle);
        }
        let Some(previous) = self.executed.last() else {
            return Ok(CycleOutcome::Idle);
        };
        let task_id = previous.id.unwrap_or_default();
        let name = previous.name.clone();
        let result = previous.result().unwrap_or_default().to_string();
        warn!("queue empty, reusing the result of task {} for task creation", task_id);

        let created = self.create_and_prioritize(task_id, &name, &result).await?;
        Ok(CycleOutcome::CarriedOver { task_id, created })
    }

    async fn execute_and_store(&mut self, mut task: Task) -> Result<Task> {
        let output = {
            let context = ContextAgent::new(self.vector_store.as_ref(), self.options.context_top_k);
            ExecutionAgent::new(self.llm.as_ref(), context, self.options.context_in_prompt)
                .execute(&self.objective, &self.objective_embedding, &task.name)
                .await?
        };
        debug!("context for task '{}': {:?}", task.name, output.context);
        info!(
            "task result: {}",
            truncate_for_log(&output.result, LOG_EXCERPT_CHARS)
        );

        let vector = self.embedder.embed_text(&output.result).await?;
        let record = VectorRecord {
            id: task.record_id().unwrap_or_default(),
            vector: vector.clone(),
            payload: RecordPayload {
                task: task.name.clone(),
                result: output.result.clone(),
            },
        };
        self.vector_store.upsert(record).await?;
        task.record_result(output.result.clone(), vector);

        self.publish(Event::TaskCompleted(
            task.id.unwrap_or_default(),
            output.result,
        ));
        Ok(task)
    }

    async fn create_and_prioritize(
        &mut self,
        task_id: TaskId,
        task_name: &str,
        result: &str,
    ) -> Result<usize> {
        let created = CreationAgent::new(self.llm.as_ref())
            .create_tasks(&self.objective, result, task_name, &self.queue.snapshot_names())
            .await?;
        let created = self.accept(created);
        let created_count = created.len();
        self.publish(Event::TasksCreated(
            created.iter().map(|t| t.name.clone()).collect(),
        ));
        for task in created {
            self.queue.enqueue(task);
        }

        let prioritized = PrioritizationAgent::new(self.llm.as_ref())
            .prioritize(&self.objective, task_id, &self.queue.snapshot_names())
            .await?;
        let prioritized = self.accept(prioritized);
        info!(
            "queue reprioritized: {} task(s) after {} created",
            prioritized.len(),
            created_count
        );
        self.queue.replace_all(prioritized);
        self.publish(Event::QueueReprioritized(self.queue.len()));

        Ok(created_count)
    }

    /// Unpacks agent output, forwarding its warning to observers
    fn accept(&self, output: AgentOutput) -> Vec<Task> {
        if let Some(warning) = &output.warning {
            self.publish(Event::Warning(warning.to_string()));
        }
        output.tasks
    }

    fn publish(&self, event: Event) {
        if let Some(tx) = &self.events {
            let _ = tx.send(event);
        }
    }
}
