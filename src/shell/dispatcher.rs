use crate::error::{AppError, AppResult};
use crate::error_translation::ErrorTranslator;
use crate::exec::ProcessExecutor;
use crate::llm::{Intent, LLMClient, interpret};
use crate::security::CommandAllowlist;
use crate::shell::builtins::{Builtin, BuiltinTable, Flow, change_dir};
use crate::shell::history::HistoryLog;
use crate::shell::reader::{LineReader, ReadOutcome};
use crate::ui::{Console, help_text};
use std::io::Write;
use tracing::{debug, info, warn};

/// Prefix that sends the rest of a line straight to the gated executor
pub const RAW_COMMAND_PREFIX: char = '!';

/// Everything the read loop needs that never changes after start-up
#[derive(Debug, Clone)]
pub struct DispatcherConfig {
    pub allowlist: CommandAllowlist,
    pub builtins: BuiltinTable,
    pub prompt: String,
}

impl DispatcherConfig {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            allowlist: CommandAllowlist::new(),
            builtins: BuiltinTable::new(),
            prompt: prompt.into(),
        }
    }
}

/// Lines entered during one interactive run, in order
#[derive(Debug, Default)]
pub struct ShellSession {
    history: Vec<String>,
}

impl ShellSession {
    pub fn record(&mut self, line: &str) {
        self.history.push(line.to_string());
    }

    pub fn entries(&self) -> &[String] {
        &self.history
    }
}

/// How a trimmed input line is routed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    Builtin(Builtin, Vec<&'a str>),
    RawCommand(&'a str),
    Query(&'a str),
}

/// Builtins win over `!`, and anything else goes to the AI
pub fn classify<'a>(builtins: &BuiltinTable, line: &'a str) -> LineKind<'a> {
    let mut tokens = line.split_whitespace();

    if let Some(first) = tokens.next() {
        if let Some(command) = builtins.lookup(first) {
            return LineKind::Builtin(command.builtin, tokens.collect());
        }
    }

    match line.strip_prefix(RAW_COMMAND_PREFIX) {
        Some(command) => LineKind::RawCommand(command.trim()),
        None => LineKind::Query(line),
    }
}

pub struct ShellDispatcher<'a, W: Write> {
    config: &'a DispatcherConfig,
    client: &'a dyn LLMClient,
    executor: &'a dyn ProcessExecutor,
    console: Console<W>,
    session: ShellSession,
}

impl<'a, W: Write> ShellDispatcher<'a, W> {
    pub fn new(
        config: &'a DispatcherConfig,
        client: &'a dyn LLMClient,
        executor: &'a dyn ProcessExecutor,
        console: Console<W>,
    ) -> Self {
        Self {
            config,
            client,
            executor,
            console,
            session: ShellSession::default(),
        }
    }

    /// Read and dispatch lines until `exit`, end of input or a read failure
    ///
    /// The session is flushed to `history` on every way out.
    pub async fn run(&mut self, reader: &mut dyn LineReader, history: Option<&HistoryLog>) -> AppResult<()> {
        let result = self.read_loop(reader).await;
        self.flush_history(history);
        result?;
        self.console.flush()?;
        Ok(())
    }

    async fn read_loop(&mut self, reader: &mut dyn LineReader) -> AppResult<()> {
        loop {
            let line = match reader.read_line(&self.config.prompt)? {
                ReadOutcome::Line(line) => line,
                ReadOutcome::Interrupted => {
                    debug!("interrupted at prompt");
                    continue;
                }
                ReadOutcome::Eof => return Ok(()),
            };

            let trimmed = line.trim();
            if !trimmed.is_empty() {
                reader.add_history(trimmed);
            }

            if self.dispatch(trimmed).await? == Flow::Exit {
                return Ok(());
            }
        }
    }

    /// Handle one line; recoverable errors are printed and the loop continues
    pub async fn dispatch(&mut self, line: &str) -> AppResult<Flow> {
        let line = line.trim();
        if line.is_empty() {
            return Ok(Flow::Continue);
        }

        self.session.record(line);

        let result = match classify(&self.config.builtins, line) {
            LineKind::Builtin(builtin, args) => self.run_builtin(builtin, &args),
            LineKind::RawCommand(command) => self.execute_gated(command).map(|_| Flow::Continue),
            LineKind::Query(query) => self.ask(query).await.map(|_| Flow::Continue),
        };

        match result {
            Ok(flow) => Ok(flow),
            Err(AppError::Io(e)) => Err(AppError::Io(e)),
            Err(e) => {
                self.report(&e)?;
                Ok(Flow::Continue)
            }
        }
    }

    fn run_builtin(&mut self, builtin: Builtin, args: &[&str]) -> AppResult<Flow> {
        match builtin {
            Builtin::Help => self.console.plain(help_text(&self.config.builtins).trim_end())?,
            Builtin::Exit => return Ok(Flow::Exit),
            Builtin::Clear => self.console.clear_screen()?,
            Builtin::Cd => match change_dir(args) {
                Ok(dir) => debug!("changed directory to {}", dir.display()),
                // A failed cd is a user error, not a broken terminal
                Err(AppError::Io(e)) => self.console.error(&format!("cd: {}", e))?,
                Err(e) => return Err(e),
            },
        }
        Ok(Flow::Continue)
    }

    /// Run a command only if its program is allowed; nothing runs otherwise
    pub fn execute_gated(&mut self, command: &str) -> AppResult<()> {
        self.gate(command)?;
        self.run_command(command)
    }

    fn gate(&self, command: &str) -> AppResult<()> {
        if let Err(e) = self.config.allowlist.check(command) {
            warn!("rejected command {:?}: {}", command, e);
            return Err(e.into());
        }
        Ok(())
    }

    fn run_command(&self, command: &str) -> AppResult<()> {
        info!("running command: {}", command);
        self.executor.execute(command)?;
        Ok(())
    }

    /// Send a query to the AI and act on the interpreted response
    pub async fn ask(&mut self, query: &str) -> AppResult<()> {
        let response = self.client.ask(query).await?;

        match interpret(&response) {
            Intent::PlainText(text) => self.console.plain(&text)?,
            Intent::CodeBlocks(segments) => self.console.code_blocks(&segments)?,
            Intent::CommandDirective(command) => {
                debug!("AI suggested command: {}", command);
                // Announce only what is actually going to run
                self.gate(&command)?;
                self.console.info(&format!("Running: {}", command))?;
                self.run_command(&command)?;
            }
        }

        Ok(())
    }

    fn report(&mut self, error: &AppError) -> AppResult<()> {
        let friendly = ErrorTranslator::translate_app_error(error);
        self.console.user_error(&friendly)?;
        Ok(())
    }

    fn flush_history(&self, history: Option<&HistoryLog>) {
        let Some(history) = history else {
            return;
        };

        if let Err(e) = history.append(self.session.entries()) {
            warn!("could not save history to {}: {}", history.path().display(), e);
        }
    }

    pub fn session(&self) -> &ShellSession {
        &self.session
    }

    pub fn into_console(self) -> Console<W> {
        self.console
    }
}
