use super::RunConfig;
use crate::errors::Result;
use std::fs;

use tracing::info;

/// Loads and parses a run configuration from a YAML file
///
/// # Arguments
///
/// * `file_path` - Path to the YAML configuration file
///
/// # Errors
///
/// Returns an error if:
/// * The file cannot be read
/// * The YAML content cannot be parsed into a RunConfig
pub fn load_run_config(file_path: &str) -> Result<RunConfig> {
    let yaml_str = fs::read_to_string(file_path)?;
    let config = parse_run_config(&yaml_str)?;
    info!("Loaded run configuration from {}", file_path);
    Ok(config)
}

/// Parses a run configuration from YAML text; missing fields take their defaults
pub fn parse_run_config(yaml_str: &str) -> Result<RunConfig> {
    if yaml_str.trim().is_empty() {
        return Ok(RunConfig::default());
    }
    Ok(serde_yaml::from_str(yaml_str)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::VectorStoreKind;

    #[test]
    fn empty_document_gives_defaults() {
        assert_eq!(parse_run_config("").unwrap(), RunConfig::default());
    }

    #[test]
    fn partial_document_keeps_other_defaults() {
        let config = parse_run_config(
            r#"
objective: "Write a novel"
iterations: 2
vector_store:
  kind: sqlite
  path: /tmp/novel.db
cache:
  file: novel_cache.json
"#,
        )
        .unwrap();

        assert_eq!(config.objective, "Write a novel");
        assert_eq!(config.iterations, 2);
        assert_eq!(config.first_task, "Develop a task list.");
        assert_eq!(config.vector_store.kind, VectorStoreKind::Sqlite);
        assert_eq!(config.vector_store.path, "/tmp/novel.db");
        assert_eq!(config.vector_store.collection, "test-table");
        assert_eq!(config.cache.unwrap().file, "novel_cache.json");
        assert!(config.behaviour.context_in_prompt);
    }

    #[test]
    fn unknown_store_kind_fails() {
        assert!(parse_run_config("vector_store:\n  kind: pinecone\n").is_err());
    }

    #[test]
    fn missing_file_is_an_io_error() {
        assert!(matches!(
            load_run_config("/nonexistent/taskloop.yaml"),
            Err(crate::errors::Error::Io(_))
        ));
    }
}
