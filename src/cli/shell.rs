use std::io::{self, BufRead, Lines, StdinLock};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::Validator,
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};
use tracing::debug;

use crate::cli::core::{CliError, CliMode, LoopControl, ShellContext};
use crate::cli::output;
use crate::cli::registry::CommandRegistry;

const SCRIPT_ENV: &str = "EBILL_TRACKER_CLI_SCRIPT";

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;
    debug!(?mode, "shell started");
    context.report_startup_notices();

    let mut input = match mode {
        CliMode::Interactive => {
            output::info("E-Bill Tracker. Type `help` to list commands.");
            LineSource::editor(&context.registry)?
        }
        CliMode::Script => LineSource::stdin(),
    };
    run_loop(&mut context, &mut input)
}

fn run_loop(context: &mut ShellContext, input: &mut LineSource) -> Result<(), CliError> {
    loop {
        match input.next_line(&context.prompt())? {
            InputEvent::Line(line) => match context.process_line(&line) {
                Ok(LoopControl::Continue) => {}
                Ok(LoopControl::Exit) => break,
                Err(err) => context.report_error(err)?,
            },
            InputEvent::Interrupted => {
                if context.confirm_exit()? {
                    break;
                }
            }
            InputEvent::Closed => {
                if context.mode == CliMode::Interactive {
                    output::info("Exiting shell.");
                }
                break;
            }
        }
    }
    Ok(())
}

pub(crate) fn tokenize(line: &str) -> Result<Vec<String>, shell_words::ParseError> {
    shell_words::split(line)
}

enum InputEvent {
    Line(String),
    Interrupted,
    Closed,
}

/// Where shell lines come from: a line editor at a terminal, or piped stdin for scripts.
enum LineSource {
    Editor(Box<Editor<ShellCompleter, DefaultHistory>>),
    Stdin(Lines<StdinLock<'static>>),
}

impl LineSource {
    fn editor(registry: &CommandRegistry) -> Result<Self, CliError> {
        let mut editor = Editor::<ShellCompleter, DefaultHistory>::new()?;
        editor.set_helper(Some(ShellCompleter::from_registry(registry)));
        editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);
        Ok(Self::Editor(Box::new(editor)))
    }

    fn stdin() -> Self {
        Self::Stdin(io::stdin().lock().lines())
    }

    fn next_line(&mut self, prompt: &str) -> Result<InputEvent, CliError> {
        match self {
            Self::Editor(editor) => match editor.readline(prompt) {
                Ok(line) => {
                    let trimmed = line.trim();
                    if !trimmed.is_empty() {
                        editor.add_history_entry(trimmed).ok();
                    }
                    Ok(InputEvent::Line(line))
                }
                Err(ReadlineError::Interrupted) => Ok(InputEvent::Interrupted),
                Err(ReadlineError::Eof) => Ok(InputEvent::Closed),
                Err(err) => Err(err.into()),
            },
            Self::Stdin(lines) => match lines.next() {
                Some(line) => Ok(InputEvent::Line(line?)),
                None => Ok(InputEvent::Closed),
            },
        }
    }
}

/// Completes command names in the first position and each command's keywords in the
/// second (`help` takes command names there).
struct ShellCompleter {
    commands: Vec<(&'static str, &'static [&'static str])>,
}

impl ShellCompleter {
    fn from_registry(registry: &CommandRegistry) -> Self {
        Self {
            commands: registry
                .iter()
                .map(|entry| (entry.name, entry.keywords))
                .collect(),
        }
    }

    fn command_names(&self) -> Vec<&'static str> {
        self.commands.iter().map(|(name, _)| *name).collect()
    }

    fn candidates(&self, prefix: &str) -> (usize, Vec<&'static str>) {
        let start = prefix
            .rfind(char::is_whitespace)
            .map(|idx| idx + 1)
            .unwrap_or(0);
        let earlier: Vec<String> = prefix[..start]
            .split_whitespace()
            .map(str::to_lowercase)
            .collect();
        let pool = match earlier.as_slice() {
            [] => self.command_names(),
            [command] if command == "help" => self.command_names(),
            [command] => self
                .commands
                .iter()
                .find(|(name, _)| name == command)
                .map(|(_, keywords)| keywords.to_vec())
                .unwrap_or_default(),
            _ => Vec::new(),
        };
        let needle = prefix[start..].to_lowercase();
        let matches = pool
            .into_iter()
            .filter(|candidate| candidate.starts_with(&needle))
            .collect();
        (start, matches)
    }
}

impl Helper for ShellCompleter {}

impl Completer for ShellCompleter {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let (start, matches) = self.candidates(&line[..pos]);
        let pairs = matches
            .into_iter()
            .map(|word| Pair {
                display: word.to_string(),
                replacement: word.to_string(),
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Hinter for ShellCompleter {
    type Hint = String;
}

impl Highlighter for ShellCompleter {}

impl Validator for ShellCompleter {}
