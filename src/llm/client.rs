use async_trait::async_trait;
use thiserror::Error;

/// Errors that can occur during LLM operations
///
/// Callers treat every variant the same way: the backend is unavailable.
#[derive(Debug, Error)]
pub enum LLMError {
    #[error("API request failed: {0}")]
    ApiError(String),

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("JSON parsing error: {0}")]
    JsonError(#[from] serde_json::Error),
}

/// A language-model backend that answers one prompt per call
#[async_trait]
pub trait LLMClient: Send + Sync {
    /// Send a prompt and return the raw response text
    async fn ask(&self, prompt: &str) -> Result<String, LLMError>;
}
