/// Number of cycles the orchestrator runs by default
pub const DEFAULT_ITERATIONS: usize = 4;

/// Vector length produced by the default embedding model
pub const DEFAULT_DIMENSION: usize = 1536;

/// Number of prior results fetched as execution context
pub const DEFAULT_CONTEXT_TOP_K: usize = 5;

pub const DEFAULT_COLLECTION: &str = "test-table";
pub const DEFAULT_OBJECTIVE: &str = "Solve world hunger.";
pub const DEFAULT_FIRST_TASK: &str = "Develop a task list.";
pub const DEFAULT_LLM_PROVIDER: &str = "openai";
pub const DEFAULT_LLM_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_SQLITE_PATH: &str = "taskloop.db";

/// Creation agent: short continuation, one task per line
pub const CREATION_MAX_TOKENS: u32 = 100;
pub const CREATION_TEMPERATURE: f32 = 0.5;

/// Prioritization agent: rewrites the full list
pub const PRIORITIZATION_MAX_TOKENS: u32 = 1000;
pub const PRIORITIZATION_TEMPERATURE: f32 = 0.5;

/// Execution agent: free-form task output
pub const EXECUTION_MAX_TOKENS: u32 = 2000;
pub const EXECUTION_TEMPERATURE: f32 = 0.7;

/// Longest result excerpt written to the info log
pub const LOG_EXCERPT_CHARS: usize = 200;
