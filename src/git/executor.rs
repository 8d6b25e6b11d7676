use crate::error::{GitError, GitResult};
use std::path::{Path, PathBuf};
use std::process::{Command, Output};

/// Result of executing a git command
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: i32,
    pub success: bool,
}

/// Runs git as a child process inside a working directory
#[derive(Debug)]
pub struct GitExecutor {
    repo_path: PathBuf,
}

impl GitExecutor {
    pub fn new<P: AsRef<Path>>(repo_path: P) -> Self {
        Self {
            repo_path: repo_path.as_ref().to_path_buf(),
        }
    }

    /// Execute a whitespace-separated git command
    ///
    /// The command string should not include the "git" prefix.
    /// Example: executor.execute("diff --cached --name-status")
    pub fn execute(&self, command: &str) -> GitResult<CommandOutput> {
        // No shell is involved, but reject substitution syntax anyway
        if command.contains('$') || command.contains('`') {
            return Err(GitError::CommandFailed(
                "Command contains potentially unsafe characters".to_string(),
            ));
        }

        let args: Vec<&str> = command.split_whitespace().collect();
        if args.is_empty() {
            return Err(GitError::CommandFailed("Empty command".to_string()));
        }

        self.execute_args(&args)
    }

    /// Execute git with pre-split arguments, passed through unmodified
    ///
    /// Used when an argument may contain spaces, such as a commit message.
    pub fn execute_args(&self, args: &[&str]) -> GitResult<CommandOutput> {
        let first = args
            .first()
            .ok_or_else(|| GitError::CommandFailed("Empty command".to_string()))?;

        let output = Command::new("git")
            .args(args)
            .current_dir(&self.repo_path)
            .output()
            .map_err(|e| GitError::CommandFailed(format!("Failed to execute git: {}", e)))?;

        self.process_output(output, first)
    }

    fn process_output(&self, output: Output, command: &str) -> GitResult<CommandOutput> {
        let stdout = String::from_utf8_lossy(&output.stdout).to_string();
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        let exit_code = output.status.code().unwrap_or(-1);
        let success = output.status.success();

        if !success {
            return Err(GitError::CommandFailed(format!(
                "Command 'git {}' failed with exit code {}: {}",
                command,
                exit_code,
                stderr.trim()
            )));
        }

        Ok(CommandOutput {
            stdout,
            stderr,
            exit_code,
            success,
        })
    }
}
