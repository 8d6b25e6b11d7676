pub mod cli;
pub mod commands;
pub mod commit;
pub mod config;
pub mod error;
pub mod error_translation;
pub mod exec;
pub mod generate;
pub mod git;
pub mod llm;
pub mod logger;
pub mod security;
pub mod shell;
pub mod ui;

// Re-export commonly used types for convenience
pub use error::{AppError, AppResult, GitError, GitResult};
pub use llm::{Intent, interpret};
pub use security::CommandAllowlist;
