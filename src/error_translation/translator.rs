use crate::commit::CommitError;
use crate::error::{AppError, GitError};
use crate::exec::ExecError;
use crate::security::{ALLOWED_PROGRAMS, SafetyError};

#[derive(Debug, Clone)]
pub struct UserFriendlyError {
    pub simple_message: String,
    pub suggestion: Option<String>,
    pub raw_error: String,
}

pub struct ErrorTranslator;

impl ErrorTranslator {
    /// Translate an AppError into a user-friendly error message
    pub fn translate_app_error(error: &AppError) -> UserFriendlyError {
        match error {
            AppError::Safety(safety_err) => Self::translate_safety(safety_err),
            AppError::Backend(llm_err) => UserFriendlyError {
                simple_message: "The AI backend is unavailable.".to_string(),
                suggestion: Some("Check your network connection and the [llm] endpoint in your config".to_string()),
                raw_error: llm_err.to_string(),
            },
            AppError::Commit(commit_err) => Self::translate_commit(commit_err),
            AppError::Execution(exec_err) => Self::translate_exec(exec_err),
            AppError::Git(git_err) => Self::translate(git_err),
            AppError::Config(config_err) => UserFriendlyError {
                simple_message: "Configuration error occurred.".to_string(),
                suggestion: Some("Check your config file at ~/.config/shellmind/config.toml".to_string()),
                raw_error: config_err.to_string(),
            },
            AppError::Input(read_err) => UserFriendlyError {
                simple_message: "Could not read input from the terminal.".to_string(),
                suggestion: None,
                raw_error: read_err.to_string(),
            },
            AppError::Io(io_err) => UserFriendlyError {
                simple_message: "I/O error occurred.".to_string(),
                suggestion: Some("Check file permissions and disk space".to_string()),
                raw_error: io_err.to_string(),
            },
        }
    }

    fn translate_safety(error: &SafetyError) -> UserFriendlyError {
        let simple_message = match error {
            SafetyError::EmptyCommand => "No command to run.".to_string(),
            SafetyError::DisallowedProgram(program) => {
                format!("'{}' is not on the list of allowed commands.", program)
            }
        };

        UserFriendlyError {
            simple_message,
            suggestion: Some(format!("Allowed commands: {}", ALLOWED_PROGRAMS.join(", "))),
            raw_error: error.to_string(),
        }
    }

    fn translate_commit(error: &CommitError) -> UserFriendlyError {
        let raw_error = error.to_string();

        let (simple_message, suggestion) = match error {
            CommitError::NotARepository => (
                "Current directory is not a git repository.".to_string(),
                Some("Run this inside a git work tree, or initialize with: git init".to_string()),
            ),
            CommitError::NoStagedChanges | CommitError::EmptyDiff => (
                "No files staged for commit.".to_string(),
                Some("Stage files with: git add <file>".to_string()),
            ),
            CommitError::Git(git_err) => return Self::translate(git_err),
            CommitError::Backend(_) => (
                "The AI backend is unavailable.".to_string(),
                Some("Check your network connection and try again".to_string()),
            ),
            CommitError::Invalid { attempts, message, .. } => (
                format!(
                    "Could not generate a conventional commit message after {} attempts.",
                    attempts
                ),
                Some(format!("Last candidate was: {}", message)),
            ),
        };

        UserFriendlyError {
            simple_message,
            suggestion,
            raw_error,
        }
    }

    fn translate_exec(error: &ExecError) -> UserFriendlyError {
        let suggestion = match error {
            ExecError::ExitStatus(Some(127)) => Some("The program was not found on PATH".to_string()),
            ExecError::Spawn(_) => Some("Check that a system shell is available".to_string()),
            ExecError::ExitStatus(_) => None,
        };

        UserFriendlyError {
            simple_message: format!("Command failed: {}.", error),
            suggestion,
            raw_error: error.to_string(),
        }
    }

    /// Translate a GitError into a user-friendly error message
    pub fn translate(error: &GitError) -> UserFriendlyError {
        let raw_error = error.to_string();
        let (simple_message, suggestion) = Self::match_error_patterns(&raw_error);

        UserFriendlyError {
            simple_message,
            suggestion,
            raw_error,
        }
    }

    /// Match common git error patterns and provide user-friendly messages
    fn match_error_patterns(error_text: &str) -> (String, Option<String>) {
        let lower = error_text.to_lowercase();

        if lower.contains("not a git repository") {
            return (
                "Current directory is not a git repository.".to_string(),
                Some("Initialize with: git init".to_string()),
            );
        }

        if lower.contains("nothing to commit") || lower.contains("working tree clean") {
            return (
                "No changes to commit - working directory is clean.".to_string(),
                None,
            );
        }

        if lower.contains("no changes added to commit") {
            return (
                "No files staged for commit.".to_string(),
                Some("Stage files with: git add <file>".to_string()),
            );
        }

        if lower.contains("please tell me who you are") || lower.contains("user.email") {
            return (
                "Git does not know who you are yet.".to_string(),
                Some("Set it with: git config --global user.name/user.email".to_string()),
            );
        }

        if lower.contains("merge in progress") || lower.contains("unmerged files") {
            return (
                "A merge operation is currently in progress.".to_string(),
                Some("Resolve conflicts and commit, or abort: git merge --abort".to_string()),
            );
        }

        if lower.contains("failed to execute git") {
            return (
                "Git could not be started.".to_string(),
                Some("Make sure git is installed and on PATH".to_string()),
            );
        }

        // Default: return the error as-is with no suggestion
        (error_text.to_string(), None)
    }
}
