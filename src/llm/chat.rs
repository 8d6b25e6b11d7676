use crate::config::LLMConfig;
use crate::llm::client::{LLMClient, LLMError};
use crate::llm::interpreter::COMMAND_PREFIX;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<Message>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Serialize, Deserialize)]
struct Message {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: Option<ResponseMessage>,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

/// Client for an OpenAI-compatible chat completions endpoint
pub struct ChatClient {
    endpoint: String,
    model: String,
    temperature: f64,
    max_tokens: u32,
    api_key: Option<String>,
    http_client: Client,
}

impl ChatClient {
    pub fn new(config: &LLMConfig, api_key: Option<String>) -> Result<Self, LLMError> {
        let http_client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            api_key,
            http_client,
        })
    }

    fn system_prompt() -> String {
        format!(
            "You are shellmind, an AI assistant specialized in command-line tools and code generation. \
Provide clear, concise, and technically accurate responses. \
Format code blocks with proper syntax highlighting and include only necessary explanations. \
When the user asks you to run something and a single read-only shell command answers it, \
reply with exactly one line of the form `{}<command>` and nothing else.",
            COMMAND_PREFIX
        )
    }

    fn build_request(&self, prompt: &str) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages: vec![
                Message {
                    role: "system".to_string(),
                    content: Self::system_prompt(),
                },
                Message {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                },
            ],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        }
    }

    /// Pull the message text out of a decoded response body
    fn extract_content(body: &str) -> Result<String, LLMError> {
        let response: ChatResponse = serde_json::from_str(body)?;

        response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message)
            .and_then(|message| message.content)
            .ok_or_else(|| LLMError::InvalidResponse("No message content in response".to_string()))
    }
}

#[async_trait]
impl LLMClient for ChatClient {
    async fn ask(&self, prompt: &str) -> Result<String, LLMError> {
        let request_body = self.build_request(prompt);

        let mut request = self
            .http_client
            .post(&self.endpoint)
            .header("content-type", "application/json")
            .json(&request_body);

        if let Some(ref key) = self.api_key {
            request = request.bearer_auth(key);
        }

        debug!(endpoint = %self.endpoint, model = %self.model, "sending prompt");
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(LLMError::ApiError(format!(
                "API returned status {}: {}",
                status, body
            )));
        }

        Self::extract_content(&body)
    }
}
