//! Interactive confirmations for destructive commands.

use dialoguer::{theme::ColorfulTheme, Confirm, Input};

use crate::cli::core::CommandError;

pub(crate) fn confirm(
    theme: &ColorfulTheme,
    prompt: &str,
    default: bool,
) -> Result<bool, CommandError> {
    Ok(Confirm::with_theme(theme)
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

/// Asks the user to type `phrase` exactly; anything else, including an empty line, declines.
pub(crate) fn typed_confirmation(
    theme: &ColorfulTheme,
    phrase: &str,
) -> Result<bool, CommandError> {
    let typed: String = Input::with_theme(theme)
        .with_prompt(format!("Type {} to continue", phrase))
        .allow_empty(true)
        .interact_text()?;
    Ok(phrase_matches(&typed, phrase))
}

fn phrase_matches(typed: &str, phrase: &str) -> bool {
    typed.trim() == phrase
}
