use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, error};

use crate::config::CompletionConfig;

/// Ways a completion request can fail.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// The service could not be reached or the body could not be read.
    #[error("could not reach completion service: {0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("completion service rejected the request (status {status}): {message}")]
    Rejection { status: u16, message: String },

    /// The service answered with success but without usable content.
    #[error("malformed completion response: {0}")]
    Malformed(String),
}

impl From<reqwest::Error> for CompletionError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

/// Something that turns a single user message into generated text.
#[async_trait]
pub trait Completion: Send + Sync {
    async fn complete(&self, user_text: &str) -> Result<String, CompletionError>;
}

pub struct CompletionClient {
    config: CompletionConfig,
    client: reqwest::Client,
}

impl CompletionClient {
    pub fn new(config: CompletionConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }

    pub fn config(&self) -> &CompletionConfig {
        &self.config
    }

    /// Builds the request body. Only the latest user text is sent, so the
    /// service never sees earlier turns.
    pub fn request_body(&self, user_text: &str) -> Value {
        json!({
            "model": self.config.model,
            "messages": [
                { "role": "system", "content": self.config.system_prompt },
                { "role": "user", "content": user_text }
            ],
            "max_tokens": self.config.max_tokens,
            "temperature": self.config.temperature
        })
    }
}

#[async_trait]
impl Completion for CompletionClient {
    async fn complete(&self, user_text: &str) -> Result<String, CompletionError> {
        let request_body = self.request_body(user_text);
        debug!("Sending completion request: {}", request_body);

        let response = self
            .client
            .post(self.config.endpoint.clone())
            .bearer_auth(&self.config.api_key)
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            let message = rejection_message(&body);
            error!(status = status.as_u16(), "Completion request rejected: {}", body);
            return Err(CompletionError::Rejection {
                status: status.as_u16(),
                message,
            });
        }

        debug!("Received completion response: {}", body);
        parse_completion(&body)
    }
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: Option<String>,
}

/// Extracts `choices[0].message.content` from a success body.
pub fn parse_completion(body: &str) -> Result<String, CompletionError> {
    let response: CompletionResponse = serde_json::from_str(body)
        .map_err(|e| CompletionError::Malformed(format!("invalid response body: {e}")))?;

    response
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.message.content)
        .ok_or_else(|| CompletionError::Malformed("missing choices[0].message.content".into()))
}

/// Provider error text from an error body, falling back to a generic message.
fn rejection_message(body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error.message)
        .filter(|m| !m.is_empty())
        .unwrap_or_else(|| "API request failed".to_string())
}
