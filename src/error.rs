use std::io;
use thiserror::Error;

// Import module-level errors for AppError
use crate::commit::synthesizer::CommitError;
use crate::config::settings::ConfigError;
use crate::exec::shell::ExecError;
use crate::llm::client::LLMError;
use crate::security::allowlist::SafetyError;
use crate::shell::reader::ReadError;

/// Errors that can occur during git operations
#[derive(Debug, Error)]
pub enum GitError {
    #[error("Not a git repository")]
    NotARepository,

    #[error("Git command failed: {0}")]
    CommandFailed(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),
}

/// Top-level application error that wraps all module-specific errors
///
/// Each variant maps onto one class of the error taxonomy: safety rejections,
/// backend failures, commit synthesis failures (validation and preconditions),
/// execution failures, plus the ambient configuration, input and I/O errors.
/// All module errors convert to AppError via the `From` trait.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unsafe command rejected: {0}")]
    Safety(#[from] SafetyError),

    #[error("AI backend unavailable: {0}")]
    Backend(#[from] LLMError),

    #[error("{0}")]
    Commit(#[from] CommitError),

    #[error("Command failed: {0}")]
    Execution(#[from] ExecError),

    #[error("Git error: {0}")]
    Git(#[from] GitError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Input error: {0}")]
    Input(#[from] ReadError),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type for git operations
pub type GitResult<T> = std::result::Result<T, GitError>;

/// Result type for application-level operations
pub type AppResult<T> = std::result::Result<T, AppError>;
