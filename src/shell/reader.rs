use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::history::DefaultHistory;
use rustyline::validate::Validator;
use rustyline::{Context, Editor, Helper};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ReadError {
    #[error("line editor error: {0}")]
    Editor(#[from] ReadlineError),

    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),
}

/// Result of waiting for one line of input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReadOutcome {
    Line(String),
    /// Ctrl-C at the prompt
    Interrupted,
    /// Ctrl-D or closed input
    Eof,
}

/// Source of interactive input lines
pub trait LineReader {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome, ReadError>;

    /// Make a line available for recall (arrow-up)
    fn add_history(&mut self, _line: &str) {}
}

/// Tab completion over built-in command names
pub struct ShellHelper {
    builtins: Vec<&'static str>,
}

impl ShellHelper {
    pub fn new(builtins: impl IntoIterator<Item = &'static str>) -> Self {
        Self {
            builtins: builtins.into_iter().collect(),
        }
    }

    /// Builtins starting with `partial`; only the first word is completed
    pub fn candidates(&self, partial: &str) -> Vec<&'static str> {
        if partial.is_empty() || partial.contains(char::is_whitespace) {
            return Vec::new();
        }

        let lower = partial.to_lowercase();
        self.builtins
            .iter()
            .copied()
            .filter(|name| name.starts_with(&lower))
            .collect()
    }
}

impl Completer for ShellHelper {
    type Candidate = Pair;

    fn complete(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
        let partial = &line[..pos];

        let matches = self
            .candidates(partial)
            .into_iter()
            .map(|name| Pair {
                display: name.to_string(),
                replacement: name.to_string(),
            })
            .collect();

        Ok((0, matches))
    }
}

impl Hinter for ShellHelper {
    type Hint = String;
}

impl Highlighter for ShellHelper {}

impl Validator for ShellHelper {}

impl Helper for ShellHelper {}

/// Line reader backed by rustyline
pub struct RustylineReader {
    editor: Editor<ShellHelper, DefaultHistory>,
}

impl RustylineReader {
    pub fn new(helper: ShellHelper) -> Result<Self, ReadError> {
        let mut editor = Editor::<ShellHelper, DefaultHistory>::new()?;
        editor.set_helper(Some(helper));
        Ok(Self { editor })
    }

    /// Seed recall history with entries from a previous session
    pub fn load_history(&mut self, entries: &[String]) {
        for entry in entries {
            self.add_history(entry);
        }
    }
}

impl LineReader for RustylineReader {
    fn read_line(&mut self, prompt: &str) -> Result<ReadOutcome, ReadError> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(ReadOutcome::Line(line)),
            Err(ReadlineError::Interrupted) => Ok(ReadOutcome::Interrupted),
            Err(ReadlineError::Eof) => Ok(ReadOutcome::Eof),
            Err(e) => Err(ReadError::Editor(e)),
        }
    }

    fn add_history(&mut self, line: &str) {
        if let Err(e) = self.editor.add_history_entry(line) {
            debug!("could not add history entry: {}", e);
        }
    }
}
