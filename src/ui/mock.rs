//! Mock UI implementation for testing.
//!
//! `MockUI` implements the `UserInterface` trait and captures all
//! interactions for later assertion. It can be configured with
//! pre-determined prompt responses.
//!
//! # Example
//!
//! ```
//! use prepare::ui::{MockUI, UserInterface};
//!
//! let mut ui = MockUI::new();
//! ui.set_prompt_response("tools", "Git,Go");
//!
//! // Use ui in code under test...
//! ui.message("Checking Git installation...");
//! ui.success("Git installed successfully.");
//!
//! // Assert on captured interactions
//! assert!(ui.has_message("Checking Git"));
//! assert!(ui.has_success("Git installed"));
//! ```

use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::rc::Rc;

use crate::error::{PrepareError, Result};

use super::{Prompt, PromptResult, PromptType, SpinnerHandle, UserInterface};

type SpinnerLog = Rc<RefCell<Vec<(SpinnerStatus, String)>>>;

/// Mock UI implementation for testing.
///
/// Captures all UI interactions and allows pre-configured prompt responses.
/// Supports both single responses (via `set_prompt_response`) and queued
/// responses (via `queue_prompt_responses`) for keys asked multiple times,
/// such as the tool menu across restarts.
#[derive(Debug, Default)]
pub struct MockUI {
    transcript: Vec<String>,
    messages: Vec<String>,
    successes: Vec<String>,
    warnings: Vec<String>,
    errors: Vec<String>,
    spinners: Vec<String>,
    spinner_log: SpinnerLog,
    prompt_responses: HashMap<String, String>,
    prompt_queues: HashMap<String, VecDeque<String>>,
    failing_prompts: Vec<String>,
    prompts_shown: Vec<Prompt>,
}

impl MockUI {
    /// Create an empty MockUI.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a response for a prompt key.
    ///
    /// Confirm prompts accept "true"/"yes"/"y"/"1"; multi-select responses
    /// are comma-separated values.
    pub fn set_prompt_response(&mut self, key: &str, response: &str) {
        self.prompt_responses
            .insert(key.to_string(), response.to_string());
    }

    /// Queue multiple responses for the same prompt key.
    ///
    /// Responses are returned in order. After the queue is exhausted,
    /// falls back to `set_prompt_response` or the prompt default.
    pub fn queue_prompt_responses(&mut self, key: &str, responses: Vec<&str>) {
        let queue = responses.into_iter().map(|s| s.to_string()).collect();
        self.prompt_queues.insert(key.to_string(), queue);
    }

    /// Make every prompt with this key fail, as if the terminal went away.
    pub fn fail_prompt(&mut self, key: &str) {
        self.failing_prompts.push(key.to_string());
    }

    /// Every message, success, warning and error in the order shown,
    /// tagged with its kind (`"error: ..."`).
    pub fn transcript(&self) -> &[String] {
        &self.transcript
    }

    /// Get all captured messages.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Get all captured success messages.
    pub fn successes(&self) -> &[String] {
        &self.successes
    }

    /// Get all captured warning messages.
    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }

    /// Get all captured error messages.
    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    /// Get all spinner messages that were started.
    pub fn spinners(&self) -> &[String] {
        &self.spinners
    }

    /// How spinners finished, in order.
    pub fn spinner_results(&self) -> Vec<(SpinnerStatus, String)> {
        self.spinner_log.borrow().clone()
    }

    /// Get all prompts that were shown.
    pub fn prompts_shown(&self) -> &[Prompt] {
        &self.prompts_shown
    }

    /// Keys of all prompts that were shown, in order.
    pub fn prompt_keys(&self) -> Vec<&str> {
        self.prompts_shown.iter().map(|p| p.key.as_str()).collect()
    }

    /// Check if a specific message was shown.
    pub fn has_message(&self, msg: &str) -> bool {
        self.messages.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific success was shown.
    pub fn has_success(&self, msg: &str) -> bool {
        self.successes.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific error was shown.
    pub fn has_error(&self, msg: &str) -> bool {
        self.errors.iter().any(|m| m.contains(msg))
    }

    /// Check if a specific warning was shown.
    pub fn has_warning(&self, msg: &str) -> bool {
        self.warnings.iter().any(|m| m.contains(msg))
    }

    fn respond(prompt: &Prompt, response: &str) -> PromptResult {
        match prompt.prompt_type {
            PromptType::Confirm => {
                PromptResult::Bool(matches!(response, "true" | "yes" | "y" | "1"))
            }
            PromptType::MultiSelect { .. } => PromptResult::Strings(
                response
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect(),
            ),
        }
    }
}

impl UserInterface for MockUI {
    fn message(&mut self, msg: &str) {
        self.transcript.push(format!("message: {}", msg));
        self.messages.push(msg.to_string());
    }

    fn success(&mut self, msg: &str) {
        self.transcript.push(format!("success: {}", msg));
        self.successes.push(msg.to_string());
    }

    fn warning(&mut self, msg: &str) {
        self.transcript.push(format!("warning: {}", msg));
        self.warnings.push(msg.to_string());
    }

    fn error(&mut self, msg: &str) {
        self.transcript.push(format!("error: {}", msg));
        self.errors.push(msg.to_string());
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        self.prompts_shown.push(prompt.clone());

        if self.failing_prompts.contains(&prompt.key) {
            return Err(PrepareError::Io(std::io::Error::new(
                std::io::ErrorKind::Interrupted,
                "prompt interrupted",
            )));
        }

        // Check queued responses first (for keys asked multiple times)
        if let Some(queue) = self.prompt_queues.get_mut(&prompt.key) {
            if let Some(response) = queue.pop_front() {
                return Ok(Self::respond(prompt, &response));
            }
        }

        if let Some(response) = self.prompt_responses.get(&prompt.key) {
            return Ok(Self::respond(prompt, response));
        }

        if let PromptType::MultiSelect { defaults, .. } = &prompt.prompt_type {
            return Ok(PromptResult::Strings(defaults.clone()));
        }

        if let Some(default) = &prompt.default {
            return Ok(Self::respond(prompt, default));
        }

        // Type-appropriate empty answer as a last resort
        Ok(Self::respond(prompt, ""))
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        self.spinners.push(message.to_string());
        Box::new(MockSpinner::new(Rc::clone(&self.spinner_log)))
    }
}

/// Status of a mock spinner when finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpinnerStatus {
    /// Finished successfully.
    Success,
    /// Finished with error.
    Error,
}

/// Mock spinner that reports its finish into the owning `MockUI`.
#[derive(Debug, Default)]
pub struct MockSpinner {
    log: SpinnerLog,
}

impl MockSpinner {
    fn new(log: SpinnerLog) -> Self {
        Self { log }
    }
}

impl SpinnerHandle for MockSpinner {
    fn finish_success(&mut self, msg: &str) {
        self.log
            .borrow_mut()
            .push((SpinnerStatus::Success, msg.to_string()));
    }

    fn finish_error(&mut self, msg: &str) {
        self.log
            .borrow_mut()
            .push((SpinnerStatus::Error, msg.to_string()));
    }
}
