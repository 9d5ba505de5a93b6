//! Colored output and progress display.
//!
//! Step lines are dimmed and suppressed in quiet mode. The updater's
//! mutation phase gets a spinner that is created lazily, so it never
//! animates while a prompt is waiting for the operator.

use crate::config::Config;
use crate::constants::PROGRESS_TICK_MS;
use crate::update::BuildStep;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use std::cell::RefCell;
use std::time::Duration;

/// Prints a step progress line unless quiet.
pub fn print_step(config: &Config, text: &str) {
    if config.is_quiet() {
        return;
    }
    eprintln!("  {}...", text.dimmed());
}

/// Prints a final success line unless quiet.
pub fn print_success(config: &Config, message: &str) {
    if config.is_quiet() {
        return;
    }
    eprintln!("{} {}", "✓".green(), message);
}

/// Prints the error chain that aborted the run.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {:#}", "✗".red(), err);
}

/// Spinner for the updater's mutation phase.
///
/// The `ProgressBar` is created on the first step, after all prompts have
/// been answered. Verbose mode prints step lines instead; quiet mode shows
/// nothing.
pub struct BuildProgress {
    config: Config,
    spinner: RefCell<Option<ProgressBar>>,
}

impl BuildProgress {
    #[must_use]
    pub fn new(config: Config) -> Self {
        Self {
            config,
            spinner: RefCell::new(None),
        }
    }

    pub fn update(&self, step: &BuildStep) {
        if self.config.is_quiet() {
            return;
        }
        if self.config.is_verbose() {
            print_step(&self.config, &step.to_string());
            return;
        }
        let mut slot = self.spinner.borrow_mut();
        let spinner = slot.get_or_insert_with(|| {
            let spinner = ProgressBar::new_spinner();
            spinner.set_style(
                ProgressStyle::default_spinner()
                    .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏")
                    .template("{spinner:.cyan} {msg}")
                    .unwrap(),
            );
            spinner.enable_steady_tick(Duration::from_millis(PROGRESS_TICK_MS));
            spinner
        });
        spinner.set_message(step.to_string());
    }

    pub fn finish_success(&self, message: &str) {
        if let Some(spinner) = self.spinner.borrow_mut().take() {
            spinner.finish_with_message(format!("{} {}", "✓".green(), message));
        } else {
            print_success(&self.config, message);
        }
    }

    /// Clears the spinner so the error report is the last thing on screen.
    pub fn abandon(&self) {
        if let Some(spinner) = self.spinner.borrow_mut().take() {
            spinner.finish_and_clear();
        }
    }
}
