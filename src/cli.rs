use crate::config::RunConfig;
use clap::Parser;
use std::path::PathBuf;

/// Command line interface for the application
#[derive(Parser, Debug)]
#[command(name = "taskloop", about = "Autonomous task-management loop driven by a language model")]
pub struct Cli {
    /// Path to a YAML run configuration
    #[arg(short, long)]
    pub config: Option<String>,

    /// Objective guiding every prompt; asked interactively when neither flag nor file provides one
    #[arg(short, long)]
    pub objective: Option<String>,

    /// Name of the seed task
    #[arg(long)]
    pub first_task: Option<String>,

    /// Maximum number of cycles
    #[arg(short, long)]
    pub iterations: Option<usize>,

    /// Sets the logging verbosity level for the application
    /// Possible values: "error", "warn", "info", "debug", "trace"
    #[arg(long, default_value_t = String::from("info"))]
    pub logging_level: String,

    /// Also write logs to daily rotating files in this directory
    #[arg(long, value_name = "DIR")]
    pub log_dir: Option<PathBuf>,
}

impl Cli {
    /// Applies command-line overrides on top of `config`
    pub fn apply_overrides(&self, config: &mut RunConfig) {
        if let Some(objective) = &self.objective {
            config.objective = objective.clone();
        }
        if let Some(first_task) = &self.first_task {
            config.first_task = first_task.clone();
        }
        if let Some(iterations) = self.iterations {
            config.iterations = iterations;
        }
    }
}
