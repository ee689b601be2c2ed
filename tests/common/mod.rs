#![allow(dead_code)]

use async_trait::async_trait;
use std::sync::Mutex;
use taskloop::constants::{CREATION_MAX_TOKENS, EXECUTION_MAX_TOKENS, PRIORITIZATION_MAX_TOKENS};
use taskloop::errors::{Error, Result, Service};
use taskloop::llm::{CompletionRequest, CompletionService, Embedder};

pub const DIM: usize = 4;

/// Completion service answering each agent with a fixed response
///
/// Agents are told apart by their max-token budget.
#[derive(Debug)]
pub struct ScriptedLlm {
    pub creation: String,
    pub prioritization: String,
    pub execution: String,
    pub requests: Mutex<Vec<CompletionRequest>>,
}

impl ScriptedLlm {
    pub fn new(creation: &str, prioritization: &str, execution: &str) -> Self {
        Self {
            creation: creation.to_string(),
            prioritization: prioritization.to_string(),
            execution: execution.to_string(),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts_with_budget(&self, max_tokens: u32) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.max_tokens == max_tokens)
            .map(|r| r.prompt.clone())
            .collect()
    }

    pub fn creation_prompts(&self) -> Vec<String> {
        self.prompts_with_budget(CREATION_MAX_TOKENS)
    }

    pub fn prioritization_prompts(&self) -> Vec<String> {
        self.prompts_with_budget(PRIORITIZATION_MAX_TOKENS)
    }

    pub fn execution_prompts(&self) -> Vec<String> {
        self.prompts_with_budget(EXECUTION_MAX_TOKENS)
    }
}

#[async_trait]
impl CompletionService for ScriptedLlm {
    async fn create(&self, request: &CompletionRequest) -> Result<String> {
        self.requests.lock().unwrap().push(request.clone());
        let response = match request.max_tokens {
            CREATION_MAX_TOKENS => &self.creation,
            PRIORITIZATION_MAX_TOKENS => &self.prioritization,
            EXECUTION_MAX_TOKENS => &self.execution,
            other => panic!("unexpected max_tokens {}", other),
        };
        Ok(response.trim().to_string())
    }
}

/// Completion service whose every call fails
#[derive(Debug)]
pub struct DownLlm;

#[async_trait]
impl CompletionService for DownLlm {
    async fn create(&self, _request: &CompletionRequest) -> Result<String> {
        Err(Error::unavailable(Service::Completion, "connection refused"))
    }
}

/// Deterministic embedder producing `DIM`-length vectors from simple text statistics
#[derive(Debug)]
pub struct StatsEmbedder {
    pub dimension: usize,
}

impl Default for StatsEmbedder {
    fn default() -> Self {
        Self { dimension: DIM }
    }
}

#[async_trait]
impl Embedder for StatsEmbedder {
    async fn embed_text(&self, text: &str) -> Result<Vec<f32>> {
        let mut vector = vec![
            text.len() as f32,
            text.matches(' ').count() as f32,
            text.chars().filter(|c| "aeiou".contains(*c)).count() as f32,
            1.0,
        ];
        vector.resize(self.dimension, 0.5);
        Ok(vector)
    }
}
