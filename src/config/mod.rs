pub mod settings;

pub use settings::{CommitConfig, Config, ConfigError, LLMConfig, LoggingConfig, ShellConfig};
