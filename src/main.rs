//! Main entry point for the application.
//!
//! Initializes logging, loads environment variables and the run configuration,
//! then drives the task loop while a console reporter prints its progress.

use clap::Parser;
use dialoguer::{theme::ColorfulTheme, Input};
use std::process::ExitCode;
use taskloop::bootstrap::run_from_config;
use taskloop::cli::Cli;
use taskloop::config::{load_run_config, RunConfig};
use taskloop::utils::{init_logging, ConsoleReporter};
use tracing::{error, warn};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let _log_guard = init_logging(&cli.logging_level, cli.log_dir.as_deref());

    if let Err(e) = dotenvy::dotenv() {
        warn!("Failed to load .env file: {}", e);
    }

    let mut config = match &cli.config {
        Some(path) => match load_run_config(path) {
            Ok(config) => config,
            Err(e) => {
                error!("Failed to load configuration {}: {}", path, e);
                return ExitCode::FAILURE;
            }
        },
        None if cli.objective.is_some() => RunConfig::default(),
        None => match ask_objective() {
            Some(objective) => RunConfig {
                objective,
                ..RunConfig::default()
            },
            None => return ExitCode::FAILURE,
        },
    };
    cli.apply_overrides(&mut config);

    let (tx, rx) = tokio::sync::mpsc::unbounded_channel();
    let reporter = tokio::spawn(ConsoleReporter::new(true).run(rx));

    let outcome = run_from_config(&config, Some(tx)).await;
    let _ = reporter.await;

    match outcome {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Run aborted: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Asks for the objective when no configuration file was given
fn ask_objective() -> Option<String> {
    match Input::<String>::with_theme(&ColorfulTheme::default())
        .with_prompt("Objective")
        .interact_text()
    {
        Ok(objective) => Some(objective),
        Err(e) => {
            error!("Failed to read objective: {}", e);
            None
        }
    }
}
