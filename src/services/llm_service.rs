use crate::config::AppConfig;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt;

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[derive(Debug)]
pub enum LlmError {
    MissingApiKey,
    HttpError(reqwest::Error),
    StatusError { status: u16, body: String },
    ResponseError(String),
}

impl fmt::Display for LlmError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LlmError::MissingApiKey => write!(f, "Language model API key not configured"),
            LlmError::HttpError(err) => write!(f, "HTTP error: {}", err),
            LlmError::StatusError { status, body } => {
                write!(f, "Language model returned {}: {}", status, body)
            }
            LlmError::ResponseError(msg) => write!(f, "Response error: {}", msg),
        }
    }
}

impl Error for LlmError {}

impl From<reqwest::Error> for LlmError {
    fn from(err: reqwest::Error) -> Self {
        LlmError::HttpError(err)
    }
}

/// Chat completions client for an xAI-compatible endpoint.
#[derive(Clone)]
pub struct LlmService {
    http_client: reqwest::Client,
    api_key: Option<String>,
    url: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl LlmService {
    pub fn new(config: &AppConfig) -> Result<Self, LlmError> {
        let http_client = reqwest::Client::builder()
            .timeout(config.llm_timeout)
            .build()?;

        Ok(Self {
            http_client,
            api_key: config.xai_api_key.clone(),
            url: config.chat_url.clone(),
            model: config.chat_model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }

    /// Send one system + user exchange and return the assistant's text.
    /// Attempted once, never retried.
    pub async fn complete(&self, system_prompt: &str, user_prompt: &str) -> Result<String, LlmError> {
        let api_key = self.api_key.as_deref().ok_or(LlmError::MissingApiKey)?;

        let request = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        debug!("Sending chat completion request to {} ({})", self.url, self.model);

        let response = self
            .http_client
            .post(&self.url)
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            warn!("Language model request failed with status {}", status);
            return Err(LlmError::StatusError { status, body });
        }

        let raw = response.text().await?;
        debug!("Chat response body: {}", raw);

        let chat: ChatResponse = serde_json::from_str(&raw)
            .map_err(|e| LlmError::ResponseError(format!("Invalid chat response: {}", e)))?;

        chat.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or_else(|| LlmError::ResponseError("Chat response has no content".to_string()))
    }
}
