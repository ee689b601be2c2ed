mod parser;

use crate::constants::*;
use crate::core::RunOptions;
use crate::errors::{Error, Result};
use serde::{Deserialize, Serialize};

pub use parser::{load_run_config, parse_run_config};

/// Main configuration structure for a run
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct RunConfig {
    /// Top-level goal guiding every prompt
    #[serde(default = "default_objective")]
    pub objective: String,
    /// Name of the seed task
    #[serde(default = "default_first_task")]
    pub first_task: String,
    /// Maximum number of cycles
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    /// Completion and embedding service settings
    #[serde(default)]
    pub parameters: ParametersConfig,
    /// Vector store backend
    #[serde(default)]
    pub vector_store: VectorStoreConfig,
    /// Optional response cache
    #[serde(default)]
    pub cache: Option<CacheConfig>,
    /// Loop behaviour switches
    #[serde(default)]
    pub behaviour: BehaviourConfig,
}

/// Completion and embedding service settings
#[derive(Debug, Deserialize, Clone, Serialize, PartialEq)]
pub struct ParametersConfig {
    /// Name of the LLM provider ("openai", "anthropic", "ollama")
    #[serde(default = "default_llm_provider")]
    pub llm_provider: String,
    /// Model identifier passed to the provider
    #[serde(default = "default_llm_model")]
    pub llm_model: String,
    /// Embedder configuration
    #[serde(default)]
    pub embedder: EmbedderConfig,
    /// Number of prior results retrieved as execution context
    #[serde(default = "default_context_top_k")]
    pub context_top_k: usize,
}

/// Embedder configuration
#[derive(Debug, Deserialize, Clone, Serialize, PartialEq)]
pub struct EmbedderConfig {
    #[serde(default = "default_llm_provider")]
    pub provider: String,
    #[serde(default = "default_embedder_model")]
    pub model: String,
}

/// Backend kinds for the vector store
#[derive(Debug, Deserialize, Clone, Copy, Serialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum VectorStoreKind {
    #[default]
    Memory,
    Sqlite,
}

/// Vector store configuration
#[derive(Debug, Deserialize, Clone, Serialize, PartialEq)]
pub struct VectorStoreConfig {
    #[serde(default)]
    pub kind: VectorStoreKind,
    /// Collection (table) name
    #[serde(default = "default_collection")]
    pub collection: String,
    /// Vector length produced by the embedder
    #[serde(default = "default_dimension")]
    pub dimension: usize,
    /// SQLite file, used by the sqlite backend
    #[serde(default = "default_sqlite_path")]
    pub path: String,
    /// Clear the collection when the run starts
    #[serde(default = "default_true")]
    pub reset: bool,
}

/// Response cache configuration
#[derive(Debug, Deserialize, Clone, Serialize, PartialEq)]
pub struct CacheConfig {
    /// JSON file holding cached completions and embeddings
    pub file: String,
}

/// Loop behaviour switches
#[derive(Debug, Deserialize, Clone, Serialize, PartialEq)]
pub struct BehaviourConfig {
    /// Write retrieved context into the execution prompt
    #[serde(default = "default_true")]
    pub context_in_prompt: bool,
    /// Run creation on the previous result when the queue is empty
    #[serde(default)]
    pub create_without_execution: bool,
}

fn default_objective() -> String {
    DEFAULT_OBJECTIVE.to_string()
}
fn default_first_task() -> String {
    DEFAULT_FIRST_TASK.to_string()
}
fn default_iterations() -> usize {
    DEFAULT_ITERATIONS
}
fn default_llm_provider() -> String {
    DEFAULT_LLM_PROVIDER.to_string()
}
fn default_llm_model() -> String {
    DEFAULT_LLM_MODEL.to_string()
}
fn default_embedder_model() -> String {
    crate::llm::DEFAULT_EMBEDDER_MODEL.to_string()
}
fn default_context_top_k() -> usize {
    DEFAULT_CONTEXT_TOP_K
}
fn default_collection() -> String {
    DEFAULT_COLLECTION.to_string()
}
fn default_dimension() -> usize {
    DEFAULT_DIMENSION
}
fn default_sqlite_path() -> String {
    DEFAULT_SQLITE_PATH.to_string()
}
fn default_true() -> bool {
    true
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            objective: default_objective(),
            first_task: default_first_task(),
            iterations: default_iterations(),
            parameters: ParametersConfig::default(),
            vector_store: VectorStoreConfig::default(),
            cache: None,
            behaviour: BehaviourConfig::default(),
        }
    }
}

impl Default for ParametersConfig {
    fn default() -> Self {
        Self {
            llm_provider: default_llm_provider(),
            llm_model: default_llm_model(),
            embedder: EmbedderConfig::default(),
            context_top_k: default_context_top_k(),
        }
    }
}

impl Default for EmbedderConfig {
    fn default() -> Self {
        Self {
            provider: default_llm_provider(),
            model: default_embedder_model(),
        }
    }
}

impl Default for VectorStoreConfig {
    fn default() -> Self {
        Self {
            kind: VectorStoreKind::default(),
            collection: default_collection(),
            dimension: default_dimension(),
            path: default_sqlite_path(),
            reset: true,
        }
    }
}

impl Default for BehaviourConfig {
    fn default() -> Self {
        Self {
            context_in_prompt: true,
            create_without_execution: false,
        }
    }
}

impl RunConfig {
    /// Checks the values the run cannot start without
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] naming the first offending field
    pub fn validate(&self) -> Result<()> {
        if self.objective.trim().is_empty() {
            return Err(Error::Config("objective must not be empty".to_string()));
        }
        if self.first_task.trim().is_empty() {
            return Err(Error::Config("first_task must not be empty".to_string()));
        }
        if self.vector_store.dimension == 0 {
            return Err(Error::Config("vector_store.dimension must be positive".to_string()));
        }
        if self.vector_store.collection.trim().is_empty() {
            return Err(Error::Config("vector_store.collection must not be empty".to_string()));
        }
        if self.parameters.context_top_k == 0 {
            return Err(Error::Config("parameters.context_top_k must be positive".to_string()));
        }
        Ok(())
    }

    /// Options handed to the orchestrator
    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            iterations: self.iterations,
            context_top_k: self.parameters.context_top_k,
            context_in_prompt: self.behaviour.context_in_prompt,
            create_without_execution: self.behaviour.create_without_execution,
        }
    }
}
