//! Progress reporting while tutor requests are outstanding

use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::sync::{Mutex, PoisonError};
use std::time::Duration;
use tutor_application::ports::progress::ProgressNotifier;
use tutor_domain::{RequestKind, Targets};

/// Shows a spinner while a tutor request is in flight
pub struct ProgressReporter {
    spinner: Mutex<Option<ProgressBar>>,
}

impl ProgressReporter {
    pub fn new() -> Self {
        Self {
            spinner: Mutex::new(None),
        }
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold.cyan} {msg} {elapsed:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn waiting_message(kind: RequestKind, targets: Option<Targets>) -> String {
        match (kind, targets) {
            (RequestKind::Critique, _) => "Critics are writing their essays...".to_string(),
            (_, Some(Targets::Agent(agent))) => format!("{} is thinking...", agent.label()),
            (RequestKind::Opening, _) => "Lenses are preparing their first questions...".to_string(),
            (RequestKind::Round, _) => "Lenses are reading your answer...".to_string(),
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressNotifier for ProgressReporter {
    fn on_request_start(&self, kind: RequestKind, targets: Option<Targets>) {
        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix(kind.as_str().to_string());
        pb.set_message(Self::waiting_message(kind, targets));
        pb.enable_steady_tick(Duration::from_millis(100));

        let previous = self
            .spinner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .replace(pb);
        if let Some(previous) = previous {
            previous.finish_and_clear();
        }
    }

    fn on_request_complete(&self, _kind: RequestKind, success: bool) {
        let spinner = self
            .spinner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        if let Some(pb) = spinner {
            if success {
                pb.finish_and_clear();
            } else {
                pb.abandon_with_message(format!("{}", "request failed".red()));
            }
        }
    }
}

/// Simple text-based progress (no fancy UI)
pub struct SimpleProgress;

impl ProgressNotifier for SimpleProgress {
    fn on_request_start(&self, kind: RequestKind, targets: Option<Targets>) {
        println!(
            "{} {}",
            "->".cyan(),
            ProgressReporter::waiting_message(kind, targets).bold()
        );
    }

    fn on_request_complete(&self, kind: RequestKind, success: bool) {
        if success {
            println!("  {} {}", "v".green(), kind);
        } else {
            println!("  {} {} (failed)", "x".red(), kind);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tutor_domain::PipelineAgent;

    #[test]
    fn test_waiting_message_names_the_agent() {
        let message = ProgressReporter::waiting_message(
            RequestKind::Round,
            Some(Targets::Agent(PipelineAgent::CriticB)),
        );
        assert_eq!(message, "Critic B is thinking...");
    }

    #[test]
    fn test_waiting_message_for_lenses() {
        let message =
            ProgressReporter::waiting_message(RequestKind::Opening, Some(Targets::AllLenses));
        assert!(message.starts_with("Lenses"));
        let message = ProgressReporter::waiting_message(RequestKind::Critique, None);
        assert!(message.starts_with("Critics"));
    }

    #[test]
    fn test_complete_without_start_is_harmless() {
        let reporter = ProgressReporter::new();
        reporter.on_request_complete(RequestKind::Round, true);
        assert!(reporter.spinner.lock().unwrap().is_none());
    }
}
