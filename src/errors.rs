use std::fmt;

/// External collaborator a failing call was addressed to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Service {
    Completion,
    Embedding,
    VectorStore,
}

impl fmt::Display for Service {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Service::Completion => write!(f, "completion service"),
            Service::Embedding => write!(f, "embedding service"),
            Service::VectorStore => write!(f, "vector store"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{service} unavailable: {reason}")]
    ServiceUnavailable { service: Service, reason: String },
    #[error("task queue is empty")]
    EmptyQueue,
    #[error("{agent} agent response yielded no tasks while {pending} task(s) were pending")]
    MalformedAgentResponse { agent: &'static str, pending: usize },
    #[error("vector dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Cache error: {0}")]
    Cache(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serde error: {0}")]
    SerdeError(#[from] serde_json::Error),
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

impl Error {
    pub fn unavailable(service: Service, reason: impl fmt::Display) -> Self {
        Error::ServiceUnavailable {
            service,
            reason: reason.to_string(),
        }
    }

    pub fn is_service_unavailable(&self) -> bool {
        matches!(self, Error::ServiceUnavailable { .. })
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
