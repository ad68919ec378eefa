//! Dispatch, error reporting and argument helpers shared by the command handlers.

use std::io;

use chrono::NaiveDate;
use rustyline::error::ReadlineError;

use crate::{domain::parse_date, errors::TrackerError};

use super::output;
use super::prompt;
use super::registry::CommandEntry;
use super::shell::tokenize;
pub use super::shell_context::{CliMode, ShellContext};

const SUGGESTION_DISTANCE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error("{0}")]
    Message(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Core(#[from] TrackerError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

/// Errors that end the shell session.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] TrackerError),
    #[error("input error: {0}")]
    Input(String),
    #[error("{0}")]
    Command(String),
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        CliError::Command(err.to_string())
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Command(err.to_string())
    }
}

impl From<ReadlineError> for CliError {
    fn from(err: ReadlineError) -> Self {
        CliError::Input(err.to_string())
    }
}

impl ShellContext {
    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    /// Tokenizes one shell line and runs it. Blank lines and unbalanced quotes never
    /// reach a handler.
    pub(crate) fn process_line(&mut self, line: &str) -> Result<LoopControl, CommandError> {
        let tokens = match tokenize(line) {
            Ok(tokens) => tokens,
            Err(err) => {
                output::warning(format!("Could not read that line: {}", err));
                return Ok(LoopControl::Continue);
            }
        };
        let Some((raw, rest)) = tokens.split_first() else {
            return Ok(LoopControl::Continue);
        };
        let args: Vec<&str> = rest.iter().map(String::as_str).collect();
        self.dispatch(&raw.to_lowercase(), raw, &args)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        if let Some(name) = self.registry.closest(input, SUGGESTION_DISTANCE) {
            output::hint(format!("Did you mean `{}`?", name));
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        prompt::confirm(&self.theme, "Exit shell?", true).map_err(CliError::from)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
                Ok(())
            }
            other => {
                output::error(other);
                Ok(())
            }
        }
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }
}

pub(crate) fn usage_error(usage: &str) -> CommandError {
    CommandError::InvalidArguments(format!("usage: {}", usage))
}

pub(crate) fn parse_date_arg(input: &str) -> Result<NaiveDate, CommandError> {
    parse_date(input).ok_or_else(|| {
        CommandError::InvalidArguments(format!(
            "invalid date `{}` (use dd-MM-yyyy or YYYY-MM-DD)",
            input
        ))
    })
}

pub(crate) fn parse_number_arg(input: &str, field: &str) -> Result<f64, CommandError> {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| {
            CommandError::InvalidArguments(format!("`{}` is not a valid {}", input, field))
        })
}

#[cfg(test)]
pub(crate) mod test_support {
    use std::sync::Arc;

    use chrono::NaiveDate;
    use tempfile::TempDir;

    use crate::core::time::FixedClock;

    use super::{CliMode, LoopControl, ShellContext};

    pub(crate) fn context_in(temp: &TempDir, today: NaiveDate) -> ShellContext {
        ShellContext::with_base_dir(
            CliMode::Script,
            temp.path().to_path_buf(),
            Arc::new(FixedClock::new(today)),
        )
        .unwrap()
    }

    /// Runs each line, reporting command errors the way the shell does.
    pub(crate) fn run_lines(context: &mut ShellContext, lines: &[&str]) {
        for line in lines {
            match context.process_line(line) {
                Ok(LoopControl::Continue) => {}
                Ok(LoopControl::Exit) => break,
                Err(err) => context.report_error(err).unwrap(),
            }
        }
    }
}
