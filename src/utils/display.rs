use crate::event::Event;
use colored::*;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;
use tokio::sync::mpsc::UnboundedReceiver;

/// Separator line used for visual formatting
const SEPARATOR: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━";

/// Prints orchestrator events to the terminal
#[derive(Debug)]
pub struct ConsoleReporter {
    spinner: Option<ProgressBar>,
    show_spinner: bool,
}

impl ConsoleReporter {
    /// Creates a reporter; `show_spinner` enables the progress spinner while a task executes
    pub fn new(show_spinner: bool) -> Self {
        Self {
            spinner: None,
            show_spinner,
        }
    }

    /// Consumes events until the orchestrator drops its sender
    pub async fn run(mut self, mut rx: UnboundedReceiver<Event>) {
        while let Some(event) = rx.recv().await {
            self.handle(&event);
        }
        self.stop_spinner();
    }

    fn handle(&mut self, event: &Event) {
        if !matches!(event, Event::TaskStarted(..)) {
            self.stop_spinner();
        }
        if let Some(text) = render_event(event) {
            println!("{}", text);
        }
        if let Event::TaskStarted(_, name) = event {
            self.start_spinner(name);
        }
    }

    fn start_spinner(&mut self, name: &str) {
        if !self.show_spinner {
            return;
        }
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
            .template("{spinner} [{elapsed_precise}] {msg}")
        {
            spinner.set_style(style);
        }
        spinner.enable_steady_tick(Duration::from_millis(120));
        spinner.set_message(format!("executing: {}", name));
        self.spinner = Some(spinner);
    }

    fn stop_spinner(&mut self) {
        if let Some(spinner) = self.spinner.take() {
            spinner.finish_and_clear();
        }
    }
}

/// Formats an event for the terminal, `None` for events with no visible output
pub fn render_event(event: &Event) -> Option<String> {
    match event {
        Event::RunStarted(objective) => Some(format!(
            "{}\n{}\n{}",
            "*****OBJECTIVE*****".blue().bold(),
            objective,
            SEPARATOR
        )),
        Event::TaskListUpdated(tasks) => {
            let mut out = format!("{}", "*****TASK LIST*****".magenta().bold());
            for (id, name) in tasks {
                out.push_str(&format!("\n{}: {}", id, name));
            }
            Some(out)
        }
        Event::TaskStarted(id, name) => Some(format!(
            "{}\n{}: {}",
            "*****NEXT TASK*****".green().bold(),
            id,
            name
        )),
        Event::TaskCompleted(_, result) => Some(format!(
            "{}\n{}",
            "*****TASK RESULT*****".yellow().bold(),
            result
        )),
        Event::TasksCreated(_) | Event::QueueReprioritized(_) => None,
        Event::Warning(message) => Some(format!("{} {}", "⚠".yellow(), message.yellow())),
        Event::RunFinished(cycles) => Some(format!(
            "{}\n{} {} cycle(s)",
            SEPARATOR,
            "✓".green(),
            cycles
        )),
    }
}
