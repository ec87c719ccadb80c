//! Non-interactive UI for CI/headless environments.

use std::collections::HashMap;

use crate::error::{PrepareError, Result};

use super::prompts::{parse_bool_default, split_selection};
use super::theme::PrepareTheme;
use super::{Prompt, PromptResult, PromptType, SpinnerHandle, UserInterface};

/// Prefix for environment variables that answer prompts.
pub const PROMPT_ENV_PREFIX: &str = "PREPARE_PROMPT_";

/// UI implementation for non-interactive mode.
///
/// Prompts are answered from `PREPARE_PROMPT_<KEY>` environment variables,
/// falling back to the prompt's default. With the default menu selection
/// being "already installed tools", a headless run installs nothing new
/// unless told to.
pub struct NonInteractiveUI {
    env_overrides: HashMap<String, String>,
    theme: PrepareTheme,
}

impl NonInteractiveUI {
    /// Create a new non-interactive UI.
    pub fn from_env() -> Self {
        let env_overrides: HashMap<String, String> = std::env::vars()
            .filter(|(k, _)| k.starts_with(PROMPT_ENV_PREFIX))
            .collect();

        Self::with_overrides(env_overrides)
    }

    /// Create with explicit overrides (for testing).
    pub fn with_overrides(overrides: HashMap<String, String>) -> Self {
        Self {
            env_overrides: overrides,
            theme: PrepareTheme::plain(),
        }
    }

    fn answer(&self, prompt: &Prompt, value: Option<&str>) -> Result<PromptResult> {
        match &prompt.prompt_type {
            PromptType::Confirm => Ok(PromptResult::Bool(parse_bool_default(value, false))),
            PromptType::MultiSelect { .. } => Ok(PromptResult::Strings(split_selection(value))),
        }
    }
}

impl UserInterface for NonInteractiveUI {
    fn message(&mut self, msg: &str) {
        println!("{}", msg);
    }

    fn success(&mut self, msg: &str) {
        println!("{}", self.theme.format_success(msg));
    }

    fn warning(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_warning(msg));
    }

    fn error(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_error(msg));
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        let env_key = format!("{}{}", PROMPT_ENV_PREFIX, prompt.key.to_uppercase());
        if let Some(value) = self.env_overrides.get(&env_key) {
            return self.answer(prompt, Some(value));
        }

        if let PromptType::MultiSelect { defaults, .. } = &prompt.prompt_type {
            return Ok(PromptResult::Strings(defaults.clone()));
        }

        if let Some(default) = &prompt.default {
            return self.answer(prompt, Some(default));
        }

        Err(PrepareError::Other(anyhow::anyhow!(
            "Cannot prompt for '{}' in non-interactive mode (no default value)",
            prompt.key
        )))
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        println!("⌛ {}", message);
        Box::new(LineSpinner::new(self.theme.clone()))
    }
}

/// Spinner that prints only its final line.
pub(crate) struct LineSpinner {
    theme: PrepareTheme,
}

impl LineSpinner {
    pub(crate) fn new(theme: PrepareTheme) -> Self {
        Self { theme }
    }
}

impl SpinnerHandle for LineSpinner {
    fn finish_success(&mut self, msg: &str) {
        println!("{}", self.theme.format_success(msg));
    }

    fn finish_error(&mut self, msg: &str) {
        eprintln!("{}", self.theme.format_error(msg));
    }
}
