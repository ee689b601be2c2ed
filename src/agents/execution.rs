use super::ContextAgent;
use crate::constants::{EXECUTION_MAX_TOKENS, EXECUTION_TEMPERATURE};
use crate::core::rag::VectorStoreProvider;
use crate::errors::Result;
use crate::llm::{CompletionRequest, CompletionService};
use tracing::debug;

/// Result text of an executed task together with the context retrieved for it
#[derive(Debug, Clone, PartialEq)]
pub struct ExecutionOutput {
    pub result: String,
    pub context: Vec<String>,
}

/// Agent producing the result text of a single task.
pub struct ExecutionAgent<'a> {
    /// Client for interacting with the language model
    pub llm: &'a dyn CompletionService,
    pub context: ContextAgent<'a>,
    /// Whether retrieved context is written into the prompt
    pub context_in_prompt: bool,
}

impl<'a> ExecutionAgent<'a> {
    pub fn new(
        llm: &'a dyn CompletionService,
        context: ContextAgent<'a>,
        context_in_prompt: bool,
    ) -> Self {
        Self {
            llm,
            context,
            context_in_prompt,
        }
    }

    /// Executes `task_name` towards the objective
    ///
    /// # Arguments
    /// * `objective` - Objective of the run
    /// * `objective_embedding` - Embedding of the objective, used as the context query
    /// * `task_name` - Task to perform
    ///
    /// # Errors
    /// Propagates `ServiceUnavailable` from the vector store or the completion service
    pub async fn execute(
        &self,
        objective: &str,
        objective_embedding: &[f32],
        task_name: &str,
    ) -> Result<ExecutionOutput> {
        let context = self.context.retrieve(objective_embedding).await?;
        let prompt_context: &[String] = if self.context_in_prompt { &context } else { &[] };
        let prompt = execution_prompt(objective, task_name, prompt_context);
        let request = CompletionRequest::new(prompt, EXECUTION_MAX_TOKENS, EXECUTION_TEMPERATURE);
        let result = self.llm.create(&request).await?;
        debug!("ExecutionAgent: {} chars for '{}'", result.len(), task_name);
        Ok(ExecutionOutput { result, context })
    }
}

/// Builds the execution prompt; `context` is omitted when empty
pub fn execution_prompt(objective: &str, task: &str, context: &[String]) -> String {
    let mut prompt = format!(
        "You are an AI who performs one task based on the following objective: {objective}\n"
    );
    if !context.is_empty() {
        prompt.push_str("Take into account these previously completed tasks: ");
        prompt.push_str(&context.join(", "));
        prompt.push('\n');
    }
    prompt.push_str(&format!("Your task: {task}\nResponse:"));
    prompt
}
