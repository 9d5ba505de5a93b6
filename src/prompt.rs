//! Operator prompts.
//!
//! Procedures take prompting as an explicit collaborator so tests can
//! script answers instead of driving a terminal.

use anyhow::Result;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input};

pub trait Prompter {
    /// Asks for a line of free-form text, offering `default` when given.
    fn input(&self, prompt: &str, default: Option<&str>) -> Result<String>;

    /// Asks a yes/no question. Declining is not an error here; callers
    /// decide what a refusal means.
    fn confirm(&self, prompt: &str) -> Result<bool>;

    /// Displays text the operator should review before the next question.
    fn show(&self, text: &str);
}

/// Interactive prompts on the controlling terminal.
#[derive(Debug, Default, Clone, Copy)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn input(&self, prompt: &str, default: Option<&str>) -> Result<String> {
        let theme = ColorfulTheme::default();
        let mut input = Input::<String>::with_theme(&theme).with_prompt(prompt);
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        Ok(input.interact_text()?)
    }

    fn confirm(&self, prompt: &str) -> Result<bool> {
        let theme = ColorfulTheme::default();
        Ok(Confirm::with_theme(&theme)
            .with_prompt(prompt)
            .default(false)
            .interact()?)
    }

    fn show(&self, text: &str) {
        println!("{text}");
    }
}
