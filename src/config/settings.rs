use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    #[error("Config directory not found")]
    DirectoryNotFound,

    #[error("Config file not found: {0}")]
    NotFound(PathBuf),

    #[error("Invalid config value: {0}")]
    InvalidValue(String),
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub llm: LLMConfig,
    pub shell: ShellConfig,
    pub commit: CommitConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct LLMConfig {
    pub endpoint: String,
    pub model: String,
    pub temperature: f64,
    pub max_tokens: u32,
    pub timeout_seconds: u64,
    pub api_key_env: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,
}

impl Default for LLMConfig {
    fn default() -> Self {
        Self {
            endpoint: "https://text.pollinations.ai/openai".to_string(),
            model: "openai".to_string(),
            temperature: 0.7,
            max_tokens: 2000,
            timeout_seconds: 60,
            api_key_env: "SHELLMIND_API_KEY".to_string(),
            api_key: None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct ShellConfig {
    pub prompt: String,
    /// Defaults to `~/.shellmind_history`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub history_file: Option<PathBuf>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            prompt: "shellmind> ".to_string(),
            history_file: None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct CommitConfig {
    pub max_attempts: usize,
}

impl Default for CommitConfig {
    fn default() -> Self {
        Self {
            max_attempts: crate::commit::synthesizer::MAX_ATTEMPTS,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf, ConfigError> {
        dirs::config_dir()
            .map(|dir| dir.join("shellmind"))
            .ok_or(ConfigError::DirectoryNotFound)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf, ConfigError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Load from the default location, falling back to defaults when the
    /// file does not exist
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path()?;

        if !path.exists() {
            return Ok(Self::default_config());
        }

        Self::load_from(&path)
    }

    /// Load from an explicit path, which must exist
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.to_path_buf()));
        }

        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;

        config.validate()?;

        Ok(config)
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        self.validate()?;

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;

        // The file may hold an API key: owner read/write only
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = fs::metadata(path)?.permissions();
            perms.set_mode(0o600);
            fs::set_permissions(path, perms)?;
        }

        Ok(())
    }

    pub fn default_config() -> Self {
        Self::default()
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.llm.endpoint.starts_with("http://") || self.llm.endpoint.starts_with("https://")) {
            return Err(ConfigError::InvalidValue(format!(
                "endpoint must be an http(s) URL: {}",
                self.llm.endpoint
            )));
        }

        if self.llm.model.trim().is_empty() {
            return Err(ConfigError::InvalidValue("model must not be empty".to_string()));
        }

        if !(0.0..=2.0).contains(&self.llm.temperature) {
            return Err(ConfigError::InvalidValue(format!(
                "temperature must be between 0.0 and 2.0, got {}",
                self.llm.temperature
            )));
        }

        if self.llm.max_tokens == 0 {
            return Err(ConfigError::InvalidValue(
                "max_tokens must be greater than 0".to_string(),
            ));
        }

        if self.llm.timeout_seconds == 0 {
            return Err(ConfigError::InvalidValue(
                "timeout_seconds must be greater than 0".to_string(),
            ));
        }

        if self.commit.max_attempts == 0 {
            return Err(ConfigError::InvalidValue(
                "max_attempts must be greater than 0".to_string(),
            ));
        }

        if self.shell.prompt.is_empty() {
            return Err(ConfigError::InvalidValue("prompt must not be empty".to_string()));
        }

        Ok(())
    }

    /// Get API key from environment variable or config
    pub fn get_api_key(&self) -> Option<String> {
        if let Ok(key) = std::env::var(&self.llm.api_key_env) {
            if !key.is_empty() {
                return Some(key);
            }
        }

        self.llm.api_key.clone().filter(|key| !key.is_empty())
    }

    /// Configured history file, else `~/.shellmind_history`
    pub fn history_path(&self) -> Option<PathBuf> {
        self.shell
            .history_file
            .clone()
            .or_else(|| dirs::home_dir().map(|home| home.join(".shellmind_history")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default_config();
        assert_eq!(config.llm.endpoint, "https://text.pollinations.ai/openai");
        assert_eq!(config.llm.model, "openai");
        assert_eq!(config.llm.api_key_env, "SHELLMIND_API_KEY");
        assert_eq!(config.commit.max_attempts, 3);
        assert_eq!(config.logging.level, "warn");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_endpoint() {
        let mut config = Config::default_config();
        config.llm.endpoint = "ftp://example.com".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_temperature() {
        let mut config = Config::default_config();
        config.llm.temperature = 2.5;
        assert!(config.validate().is_err());

        config.llm.temperature = 0.0;
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_zero_values() {
        let mut config = Config::default_config();
        config.llm.max_tokens = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default_config();
        config.llm.timeout_seconds = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default_config();
        config.commit.max_attempts = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_empty_model_and_prompt() {
        let mut config = Config::default_config();
        config.llm.model = "  ".to_string();
        assert!(config.validate().is_err());

        let mut config = Config::default_config();
        config.shell.prompt = String::new();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let config: Config = toml::from_str("[commit]\nmax_attempts = 5\n").unwrap();
        assert_eq!(config.commit.max_attempts, 5);
        assert_eq!(config.llm, LLMConfig::default());
        assert_eq!(config.shell.prompt, "shellmind> ");
    }

    #[test]
    fn test_api_key_from_env() {
        unsafe {
            std::env::set_var("SHELLMIND_TEST_API_KEY", "test-key-123");
        }
        let mut config = Config::default_config();
        config.llm.api_key_env = "SHELLMIND_TEST_API_KEY".to_string();
        config.llm.api_key = Some("file-key".to_string());

        assert_eq!(config.get_api_key(), Some("test-key-123".to_string()));

        unsafe {
            std::env::remove_var("SHELLMIND_TEST_API_KEY");
        }
    }

    #[test]
    fn test_api_key_from_config() {
        let mut config = Config::default_config();
        config.llm.api_key_env = "NONEXISTENT_VAR".to_string();
        assert_eq!(config.get_api_key(), None);

        config.llm.api_key = Some("config-key-456".to_string());
        assert_eq!(config.get_api_key(), Some("config-key-456".to_string()));
    }

    #[test]
    fn test_history_path_override() {
        let mut config = Config::default_config();
        config.shell.history_file = Some(PathBuf::from("/tmp/hist"));
        assert_eq!(config.history_path(), Some(PathBuf::from("/tmp/hist")));
    }

    #[test]
    fn test_save_and_load() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nested").join("config.toml");

        let mut config = Config::default_config();
        config.llm.model = "mistral".to_string();
        config.save_to(&path).unwrap();

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o600);
        }

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_load_from_missing_path() {
        let temp = TempDir::new().unwrap();
        let result = Config::load_from(&temp.path().join("missing.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_invalid_value() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.toml");
        fs::write(&path, "[llm]\nmax_tokens = 0\n").unwrap();

        assert!(matches!(Config::load_from(&path), Err(ConfigError::InvalidValue(_))));
    }
}
