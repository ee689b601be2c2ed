//! Builds the services a run needs from its configuration.

use crate::config::{RunConfig, VectorStoreKind};
use crate::core::rag::{InMemoryVectorStore, VectorStoreProvider};
use crate::core::{Orchestrator, RunSummary};
use crate::db::SqliteVectorStore;
use crate::errors::Result;
use crate::event::Event;
use crate::llm::{build_embedder, CachedService, CompletionService, Embedder, LlmClient, ResponseCache};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedSender;
use tracing::info;

/// Completion and embedding services of a run, cached when configured
pub struct Services {
    pub llm: Arc<dyn CompletionService>,
    pub embedder: Arc<dyn Embedder>,
}

pub fn build_services(config: &RunConfig) -> Result<Services> {
    let params = &config.parameters;
    let llm = LlmClient::new(&params.llm_provider, &params.llm_model)?;
    let embedder = build_embedder(&params.embedder.provider, &params.embedder.model)?;

    match &config.cache {
        Some(cache) => {
            info!("caching responses in {}", cache.file);
            let cache = Arc::new(ResponseCache::open(&cache.file)?);
            Ok(Services {
                llm: Arc::new(CachedService::new(llm, Arc::clone(&cache))),
                embedder: Arc::new(CachedService::new(embedder, cache)),
            })
        }
        None => Ok(Services {
            llm: Arc::new(llm),
            embedder: Arc::from(embedder),
        }),
    }
}

pub fn build_vector_store(config: &RunConfig) -> Result<Box<dyn VectorStoreProvider>> {
    let store = &config.vector_store;
    match store.kind {
        VectorStoreKind::Memory => Ok(Box::new(InMemoryVectorStore::new(
            &store.collection,
            store.dimension,
        ))),
        VectorStoreKind::Sqlite => Ok(Box::new(SqliteVectorStore::open(
            &store.path,
            &store.collection,
            store.dimension,
            store.reset,
        )?)),
    }
}

/// Validates `config`, wires the services and runs the loop to completion
pub async fn run_from_config(
    config: &RunConfig,
    events: Option<UnboundedSender<Event>>,
) -> Result<RunSummary> {
    config.validate()?;
    let services = build_services(config)?;
    let store = build_vector_store(config)?;

    let mut orchestrator = Orchestrator::new(
        &config.objective,
        services.llm,
        services.embedder,
        store,
        config.run_options(),
    )
    .await?;
    if let Some(tx) = events {
        orchestrator = orchestrator.with_events(tx);
    }
    orchestrator.run(&config.first_task).await
}
