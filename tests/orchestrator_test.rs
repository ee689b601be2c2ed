//! End-to-end behaviour of the task loop with stub services

mod common;

use common::{DownLlm, ScriptedLlm, StatsEmbedder, DIM};
use std::sync::Arc;
use taskloop::core::rag::{InMemoryVectorStore, VectorStoreProvider};
use taskloop::core::{CycleOutcome, Orchestrator, RunOptions, Task};
use taskloop::errors::Error;
use taskloop::event::Event;
use taskloop::llm::Embedder;

async fn orchestrator(llm: Arc<ScriptedLlm>, options: RunOptions) -> Orchestrator {
    Orchestrator::new(
        "Solve world hunger",
        llm,
        Arc::new(StatsEmbedder::default()),
        Box::new(InMemoryVectorStore::new("test-table", DIM)),
        options,
    )
    .await
    .unwrap()
}

fn iterations(n: usize) -> RunOptions {
    RunOptions {
        iterations: n,
        ..RunOptions::default()
    }
}

#[tokio::test]
async fn prioritization_replaces_created_tasks() {
    let llm = Arc::new(ScriptedLlm::new("Task B", "1. Task A", "Hunger report"));
    let mut orch = orchestrator(Arc::clone(&llm), iterations(1)).await;

    let summary = orch.run("Develop a task list").await.unwrap();

    assert_eq!(summary.cycles, 1);
    assert_eq!(summary.remaining, vec![Task::with_id(2, "Task A")]);
    assert_eq!(summary.executed.len(), 1);
    let executed = &summary.executed[0];
    assert_eq!(executed.id, Some(1));
    assert_eq!(executed.name, "Develop a task list");
    assert_eq!(executed.result(), Some("Hunger report"));
    assert_eq!(executed.embedding().map(<[f32]>::len), Some(DIM));

    let prioritization = llm.prioritization_prompts();
    assert_eq!(prioritization.len(), 1);
    assert!(prioritization[0].contains("following tasks: Task B."));
    assert!(prioritization[0].contains("Start the task list with number 2."));
}

#[tokio::test]
async fn result_is_stored_under_task_record_id() {
    let llm = Arc::new(ScriptedLlm::new("Task B", "1. Task A", "Hunger report"));
    let mut orch = orchestrator(llm, iterations(1)).await;
    orch.run("Develop a task list").await.unwrap();

    let vector = StatsEmbedder::default()
        .embed_text("Hunger report")
        .await
        .unwrap();
    let results = orch.vector_store().query(&vector, 5).await.unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].id, "result_1");
    assert_eq!(results[0].payload.task, "Develop a task list");
    assert_eq!(results[0].payload.result, "Hunger report");
}

#[tokio::test]
async fn executed_ids_increase_cycle_over_cycle() {
    let llm = Arc::new(ScriptedLlm::new("Task B", "1. Task A\n2. Task C", "done"));
    let mut orch = orchestrator(llm, iterations(3)).await;

    let summary = orch.run("Develop a task list").await.unwrap();

    let ids: Vec<_> = summary.executed.iter().filter_map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(
        summary.remaining,
        vec![Task::with_id(4, "Task A"), Task::with_id(5, "Task C")]
    );
    let stored = orch.vector_store().query(&[1.0; DIM], 10).await.unwrap();
    assert_eq!(stored.len(), 3);
}

#[tokio::test]
async fn creation_sees_pending_tasks() {
    let llm = Arc::new(ScriptedLlm::new("Task B", "1. Task A\n2. Task C", "done"));
    let mut orch = orchestrator(Arc::clone(&llm), iterations(2)).await;
    orch.run("Develop a task list").await.unwrap();

    let creation = llm.creation_prompts();
    assert_eq!(creation.len(), 2);
    assert!(creation[0].contains("These are incomplete tasks: ."));
    assert!(creation[1].contains("These are incomplete tasks: Task C."));
    assert!(creation[1].contains("task description: Task A."));
}

#[tokio::test]
async fn retrieved_context_reaches_execution_prompt() {
    let llm = Arc::new(ScriptedLlm::new("Task B", "1. Task A", "done"));
    let mut orch = orchestrator(Arc::clone(&llm), iterations(2)).await;
    orch.run("Develop a task list").await.unwrap();

    let execution = llm.execution_prompts();
    assert_eq!(execution.len(), 2);
    assert!(!execution[0].contains("previously completed"));
    assert!(execution[1].contains("previously completed tasks: Develop a task list"));
}

#[tokio::test]
async fn context_can_be_left_out_of_prompt() {
    let llm = Arc::new(ScriptedLlm::new("Task B", "1. Task A", "done"));
    let options = RunOptions {
        iterations: 2,
        context_in_prompt: false,
        ..RunOptions::default()
    };
    let mut orch = orchestrator(Arc::clone(&llm), options).await;
    orch.run("Develop a task list").await.unwrap();

    assert!(llm
        .execution_prompts()
        .iter()
        .all(|p| !p.contains("previously completed")));
}

#[tokio::test]
async fn malformed_prioritization_empties_queue_and_warns() {
    let llm = Arc::new(ScriptedLlm::new("Task B", "Sorry, I cannot do that", "done"));
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let mut orch = orchestrator(llm, iterations(4)).await.with_events(tx);

    let summary = orch.run("Develop a task list").await.unwrap();

    assert_eq!(summary.cycles, 1);
    assert!(summary.remaining.is_empty());

    let mut warnings = Vec::new();
    while let Ok(event) = rx.try_recv() {
        if let Event::Warning(message) = event {
            warnings.push(message);
        }
    }
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0].contains("prioritization"));
}

#[tokio::test]
async fn empty_queue_carries_previous_result_when_enabled() {
    let llm = Arc::new(ScriptedLlm::new("Task B", "nothing useful", "done"));
    let options = RunOptions {
        iterations: 3,
        create_without_execution: true,
        ..RunOptions::default()
    };
    let mut orch = orchestrator(Arc::clone(&llm), options).await;

    let summary = orch.run("Develop a task list").await.unwrap();

    assert_eq!(summary.cycles, 3);
    assert_eq!(summary.executed.len(), 1);
    let creation = llm.creation_prompts();
    assert_eq!(creation.len(), 3);
    assert!(creation
        .iter()
        .all(|p| p.contains("task description: Develop a task list.")));
}

#[tokio::test]
async fn empty_queue_cycle_is_idle_by_default() {
    let llm = Arc::new(ScriptedLlm::new("Task B", "nothing useful", "done"));
    let mut orch = orchestrator(Arc::clone(&llm), iterations(1)).await;
    orch.seed("Develop a task list");

    assert!(matches!(
        orch.run_cycle().await.unwrap(),
        CycleOutcome::Executed {
            task_id: 1,
            created: 1
        }
    ));
    assert_eq!(orch.run_cycle().await.unwrap(), CycleOutcome::Idle);
    assert_eq!(llm.creation_prompts().len(), 1);
}

#[tokio::test]
async fn run_stops_when_nothing_is_left() {
    let llm = Arc::new(ScriptedLlm::new("", "", "done"));
    let mut orch = orchestrator(llm, iterations(4)).await;

    let summary = orch.run("Develop a task list").await.unwrap();
    assert_eq!(summary.cycles, 1);
    assert!(summary.remaining.is_empty());
}

#[tokio::test]
async fn events_follow_cycle_order() {
    let llm = Arc::new(ScriptedLlm::new("Task B", "1. Task A", "Hunger report"));
    let (tx, mut rx) = tokio::sync::mpsc::unbounded_channel();
    let mut orch = orchestrator(llm, iterations(1)).await.with_events(tx);
    orch.run("Develop a task list").await.unwrap();

    let mut events = Vec::new();
    while let Ok(event) = rx.try_recv() {
        events.push(event);
    }
    assert_eq!(
        events,
        vec![
            Event::RunStarted("Solve world hunger".to_string()),
            Event::TaskListUpdated(vec![(1, "Develop a task list".to_string())]),
            Event::TaskStarted(1, "Develop a task list".to_string()),
            Event::TaskCompleted(1, "Hunger report".to_string()),
            Event::TasksCreated(vec!["Task B".to_string()]),
            Event::QueueReprioritized(1),
            Event::RunFinished(1),
        ]
    );
}

#[tokio::test]
async fn service_failure_aborts_run() {
    let mut orch = Orchestrator::new(
        "Solve world hunger",
        Arc::new(DownLlm),
        Arc::new(StatsEmbedder::default()),
        Box::new(InMemoryVectorStore::new("test-table", DIM)),
        RunOptions::default(),
    )
    .await
    .unwrap();

    let err = orch.run("Develop a task list").await.unwrap_err();
    assert!(err.is_service_unavailable());
}

#[tokio::test]
async fn embedding_must_match_store_dimension() {
    let result = Orchestrator::new(
        "Solve world hunger",
        Arc::new(ScriptedLlm::new("", "", "")),
        Arc::new(StatsEmbedder { dimension: 8 }),
        Box::new(InMemoryVectorStore::new("test-table", DIM)),
        RunOptions::default(),
    )
    .await;

    assert!(matches!(
        result,
        Err(Error::DimensionMismatch {
            expected: DIM,
            actual: 8
        })
    ));
}
