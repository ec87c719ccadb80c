//! Interactive prompts.

use console::{style, Term};
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, MultiSelect};

use crate::error::{PrepareError, Result};

use super::{Prompt, PromptOption, PromptResult, PromptType, PrepareTheme};

/// Convert dialoguer errors to PrepareError.
fn map_dialoguer_err(e: dialoguer::Error) -> PrepareError {
    PrepareError::Io(e.into())
}

/// Dialoguer theme without the default yellow `?` prefix.
fn prompt_theme() -> ColorfulTheme {
    ColorfulTheme {
        prompt_prefix: style("".to_string()),
        ..ColorfulTheme::default()
    }
}

/// Parse a boolean prompt default ("yes", "y", "true").
pub(crate) fn parse_bool_default(value: Option<&str>, fallback: bool) -> bool {
    value
        .map(|s| matches!(s.to_lowercase().as_str(), "true" | "y" | "yes" | "1"))
        .unwrap_or(fallback)
}

/// Split a comma-separated multi-select answer into values.
pub(crate) fn split_selection(value: Option<&str>) -> Vec<String> {
    value
        .map(|d| {
            d.split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect()
        })
        .unwrap_or_default()
}

/// Which options start checked.
pub(crate) fn checked_defaults(options: &[PromptOption], defaults: &[String]) -> Vec<bool> {
    options.iter().map(|o| defaults.contains(&o.value)).collect()
}

/// Render the label shown for an option.
pub(crate) fn option_label(option: &PromptOption, theme: &PrepareTheme) -> String {
    match option.hint.as_deref() {
        Some(hint) if !hint.is_empty() => theme.format_option(&option.label, hint),
        _ => option.label.clone(),
    }
}

/// Prompt the user for input.
pub fn prompt_user(prompt: &Prompt, term: &Term, theme: &PrepareTheme) -> Result<PromptResult> {
    match &prompt.prompt_type {
        PromptType::Confirm => prompt_confirm(prompt, term),
        PromptType::MultiSelect { options, defaults } => {
            prompt_multiselect(prompt, options, defaults, term, theme)
        }
    }
}

fn prompt_confirm(prompt: &Prompt, term: &Term) -> Result<PromptResult> {
    let default = parse_bool_default(prompt.default.as_deref(), false);

    let result = Confirm::with_theme(&prompt_theme())
        .with_prompt(&prompt.question)
        .default(default)
        .interact_on(term)
        .map_err(map_dialoguer_err)?;

    Ok(PromptResult::Bool(result))
}

fn prompt_multiselect(
    prompt: &Prompt,
    options: &[PromptOption],
    defaults: &[String],
    term: &Term,
    theme: &PrepareTheme,
) -> Result<PromptResult> {
    let labels: Vec<String> = options.iter().map(|o| option_label(o, theme)).collect();
    let checked = checked_defaults(options, defaults);

    let selections = MultiSelect::with_theme(&prompt_theme())
        .with_prompt(&prompt.question)
        .items(&labels)
        .defaults(&checked)
        .interact_on(term)
        .map_err(map_dialoguer_err)?;

    let values: Vec<String> = selections
        .iter()
        .map(|&i| options[i].value.clone())
        .collect();

    Ok(PromptResult::Strings(values))
}
