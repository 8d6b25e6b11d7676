use crate::error_translation::UserFriendlyError;
use crate::llm::Segment;
use colored::Colorize;
use crossterm::cursor::MoveTo;
use crossterm::execute;
use crossterm::terminal::{Clear, ClearType};
use std::io::{self, Stdout, Write};

/// Styled output for the CLI and the interactive shell
pub struct Console<W: Write> {
    out: W,
}

impl Console<Stdout> {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write> Console<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn plain(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}", text)
    }

    pub fn info(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}", text.cyan())
    }

    pub fn success(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}", text.green())
    }

    pub fn warning(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{}", text.yellow())
    }

    pub fn error(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.out, "{} {}", "Error:".red().bold(), text.red())
    }

    /// Translated error with an optional hint line
    pub fn user_error(&mut self, error: &UserFriendlyError) -> io::Result<()> {
        self.error(&error.simple_message)?;
        if let Some(ref suggestion) = error.suggestion {
            writeln!(self.out, "{} {}", "Hint:".yellow(), suggestion)?;
        }
        Ok(())
    }

    /// Prose as-is, code segments between rules labelled with their language
    pub fn code_blocks(&mut self, segments: &[Segment]) -> io::Result<()> {
        for segment in segments {
            if !segment.is_code {
                let prose = segment.text.trim();
                if !prose.is_empty() {
                    writeln!(self.out, "{}", prose)?;
                }
                continue;
            }

            let label = segment.language().unwrap_or("code");
            writeln!(self.out, "{}", format!("--- {} ---", label).dimmed())?;
            writeln!(self.out, "{}", segment.code().trim_matches('\n').yellow())?;
            writeln!(self.out, "{}", "---".dimmed())?;
        }
        Ok(())
    }

    pub fn clear_screen(&mut self) -> io::Result<()> {
        execute!(self.out, Clear(ClearType::All), MoveTo(0, 0))
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.out.flush()
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}
