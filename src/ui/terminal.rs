//! Interactive terminal UI.

use console::Term;
use std::io::Write;

use crate::error::Result;

use super::non_interactive::LineSpinner;
use super::{
    prompt_user, HourglassSpinner, NonInteractiveUI, OutputMode, PrepareTheme, Prompt,
    PromptResult, SpinnerHandle, UserInterface,
};

/// Interactive terminal UI implementation.
pub struct TerminalUI {
    term: Term,
    theme: PrepareTheme,
    mode: OutputMode,
}

impl TerminalUI {
    /// Create a new terminal UI.
    pub fn new(mode: OutputMode) -> Self {
        Self {
            term: Term::stdout(),
            theme: PrepareTheme::detect(),
            mode,
        }
    }
}

impl UserInterface for TerminalUI {
    fn message(&mut self, msg: &str) {
        writeln!(self.term, "{}", msg).ok();
    }

    fn success(&mut self, msg: &str) {
        writeln!(self.term, "{}", self.theme.format_success(msg)).ok();
    }

    fn warning(&mut self, msg: &str) {
        writeln!(self.term, "{}", self.theme.format_warning(msg)).ok();
    }

    fn error(&mut self, msg: &str) {
        writeln!(self.term, "{}", self.theme.format_error(msg)).ok();
    }

    fn prompt(&mut self, prompt: &Prompt) -> Result<PromptResult> {
        prompt_user(prompt, &self.term, &self.theme)
    }

    fn start_spinner(&mut self, message: &str) -> Box<dyn SpinnerHandle> {
        if self.mode.shows_spinners() {
            Box::new(HourglassSpinner::new(message, self.term.clone()))
        } else {
            writeln!(self.term, "⌛ {}", message).ok();
            Box::new(LineSpinner::new(self.theme.clone()))
        }
    }
}

/// Create the appropriate UI based on context.
pub fn create_ui(interactive: bool, mode: OutputMode) -> Box<dyn UserInterface> {
    if interactive && Term::stdout().is_term() {
        Box::new(TerminalUI::new(mode))
    } else {
        Box::new(NonInteractiveUI::from_env())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_ui_writes_to_stdout() {
        let mut ui = TerminalUI::new(OutputMode::Quiet);
        ui.message("Checking Git installation...");
        assert!(matches!(ui.term.target(), console::TermTarget::Stdout));
    }

    #[test]
    fn quiet_spinner_prints_final_line_only() {
        let mut ui = TerminalUI::new(OutputMode::Quiet);
        let mut spinner = ui.start_spinner("Installing Git");
        spinner.finish_success("Git installed successfully.");
    }

    #[test]
    fn create_ui_non_interactive() {
        let mut ui = create_ui(false, OutputMode::Normal);
        ui.message("headless");
    }
}
