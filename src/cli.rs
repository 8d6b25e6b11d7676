use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI structure defining the available commands and global arguments
#[derive(Parser, Debug)]
#[command(
    name = "shellmind",
    version,
    about = "AI terminal assistant: answers, code generation, allowed shell commands and commit messages",
    long_about = "Ask questions in plain language, generate code, run allowed shell commands suggested \
by the AI, and write conventional commit messages for staged changes."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Config file to use instead of the default location
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Log filter, e.g. `debug` or `shellmind=trace` (RUST_LOG takes precedence)
    #[arg(long = "log-level", global = true, value_name = "LEVEL")]
    pub log_level: Option<String>,

    /// Show extra detail, such as every commit message attempt
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Free-text query; a leading `!` runs an allowed command directly
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub query: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ask a question to the AI
    Ask {
        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        prompt: Vec<String>,
    },

    /// Generate code from a description
    Gen {
        /// Programming language (python, go, js, etc.)
        #[arg(short, long, default_value = "python")]
        language: String,

        /// Output file (default: print to console)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        #[arg(required = true, trailing_var_arg = true, allow_hyphen_values = true)]
        description: Vec<String>,
    },

    /// Explain the staged changes
    Diff,

    /// Generate a conventional commit message for the staged changes
    Commit {
        /// Commit with the generated message
        #[arg(long)]
        commit: bool,
    },

    /// Start the interactive shell
    Shell,
}
