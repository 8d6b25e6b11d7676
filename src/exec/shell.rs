use std::io;
use std::process::{Command, ExitStatus};
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum ExecError {
    #[error("failed to start command: {0}")]
    Spawn(#[from] io::Error),

    #[error("{}", exit_message(.0))]
    ExitStatus(Option<i32>),
}

fn exit_message(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("exited with status {}", code),
        None => "terminated by signal".to_string(),
    }
}

/// Runs a command string with the terminal's standard streams attached
pub trait ProcessExecutor {
    fn execute(&self, command: &str) -> Result<(), ExecError>;
}

/// Executes through the host shell: `sh -c` on Unix, `cmd /C` on Windows
#[derive(Debug, Default, Clone, Copy)]
pub struct ShellExecutor;

impl ShellExecutor {
    pub fn new() -> Self {
        Self
    }

    fn command(command: &str) -> Command {
        if cfg!(windows) {
            let mut cmd = Command::new("cmd");
            cmd.args(["/C", command]);
            cmd
        } else {
            let mut cmd = Command::new("sh");
            cmd.args(["-c", command]);
            cmd
        }
    }
}

impl ProcessExecutor for ShellExecutor {
    fn execute(&self, command: &str) -> Result<(), ExecError> {
        debug!("executing: {}", command);

        // stdin, stdout and stderr are inherited by default with status()
        let status: ExitStatus = Self::command(command).status()?;

        if status.success() {
            Ok(())
        } else {
            Err(ExecError::ExitStatus(status.code()))
        }
    }
}
