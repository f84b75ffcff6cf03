//! Spinner-backed progress reporting for provisioning runs.

use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use strata_core::{application::ports::ProgressReporter, domain::ProvisionStep};

const TICK: Duration = Duration::from_millis(80);

/// One spinner for the whole run; finished steps scroll above it.
pub struct SpinnerReporter {
    bar: ProgressBar,
    color: bool,
}

impl SpinnerReporter {
    pub fn new(color: bool) -> Self {
        let bar = ProgressBar::new_spinner();
        let style = ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        bar.set_style(style);
        bar.enable_steady_tick(TICK);
        Self { bar, color }
    }

    /// Reporter that draws nothing (quiet mode, JSON output, or no TTY).
    pub fn hidden() -> Self {
        Self {
            bar: ProgressBar::hidden(),
            color: false,
        }
    }

    /// Stop the spinner and clear its line.
    pub fn finish(&self) {
        self.bar.finish_and_clear();
    }

    fn line(&self, mark: &str, paint: fn(&str) -> String, text: &str) {
        let mark = if self.color {
            paint(mark)
        } else {
            mark.to_string()
        };
        self.bar.println(format!("{mark} {text}"));
    }
}

impl ProgressReporter for SpinnerReporter {
    fn step_started(&self, step: &ProvisionStep) {
        self.bar.set_message(format!("{}...", step.describe()));
    }

    fn step_finished(&self, step: &ProvisionStep) {
        self.line("\u{2713}", |m| m.green().to_string(), &step.describe());
    }

    fn step_skipped(&self, step: &ProvisionStep) {
        self.line(
            "-",
            |m| m.dimmed().to_string(),
            &format!("{} (skipped)", step.describe()),
        );
    }

    fn step_warned(&self, step: &ProvisionStep, message: &str) {
        self.line(
            "\u{26a0}",
            |m| m.yellow().to_string(),
            &format!("{}: {message}", step.describe()),
        );
    }

    fn step_failed(&self, step: &ProvisionStep, _message: &str) {
        // The error itself is rendered by the top-level handler.
        self.line("\u{2717}", |m| m.red().to_string(), &step.describe());
        self.bar.finish_and_clear();
    }
}

impl Drop for SpinnerReporter {
    fn drop(&mut self) {
        if !self.bar.is_finished() {
            self.bar.finish_and_clear();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hidden_reporter_accepts_every_event() {
        let reporter = SpinnerReporter::hidden();
        let step = ProvisionStep::ComposeOverlay("storybook".into());

        reporter.step_started(&step);
        reporter.step_finished(&step);
        reporter.step_skipped(&ProvisionStep::InstallDependencies);
        reporter.step_warned(&ProvisionStep::InitVersionControl, "git not found");
        reporter.step_failed(&step, "boom");

        assert!(reporter.bar.is_finished());
    }
}
