use std::env;

use eyre::{Result, WrapErr};
use tracing::warn;
use url::Url;

pub const API_KEY_VAR: &str = "SOFTSELL_API_KEY";
pub const ENDPOINT_VAR: &str = "SOFTSELL_COMPLETION_URL";

pub const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";
pub const MODEL: &str = "gpt-4o-mini";
pub const SYSTEM_PROMPT: &str = "You are a helpful assistant.";
pub const MAX_TOKENS: u32 = 100;
pub const TEMPERATURE: f32 = 0.7;

/// Settings for the completion service.
///
/// Only the endpoint and the credential come from the environment. The model
/// and sampling parameters are fixed.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionConfig {
    pub endpoint: Url,
    pub api_key: String,
    pub model: String,
    pub system_prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
}

impl CompletionConfig {
    pub fn new(endpoint: Url, api_key: impl Into<String>) -> Self {
        Self {
            endpoint,
            api_key: api_key.into(),
            model: MODEL.to_string(),
            system_prompt: SYSTEM_PROMPT.to_string(),
            max_tokens: MAX_TOKENS,
            temperature: TEMPERATURE,
        }
    }

    pub fn from_env() -> Result<Self> {
        Self::from_vars(env::var(ENDPOINT_VAR).ok(), env::var(API_KEY_VAR).ok())
    }

    fn from_vars(endpoint: Option<String>, api_key: Option<String>) -> Result<Self> {
        let raw = endpoint.unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());
        let endpoint = Url::parse(raw.trim())
            .wrap_err_with(|| format!("{ENDPOINT_VAR} is not a valid URL: {raw}"))?;

        // A missing key is left for the service to reject.
        let api_key = api_key.unwrap_or_else(|| {
            warn!("{} is not set; requests will be sent without a credential", API_KEY_VAR);
            String::new()
        });

        Ok(Self::new(endpoint, api_key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_public_endpoint() {
        let config = CompletionConfig::from_vars(None, Some("sk-test".into())).unwrap();
        assert_eq!(config.endpoint.as_str(), DEFAULT_ENDPOINT);
        assert_eq!(config.api_key, "sk-test");
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.max_tokens, 100);
        assert!((config.temperature - 0.7).abs() < f32::EPSILON);
    }

    #[test]
    fn missing_key_is_not_fatal() {
        let config = CompletionConfig::from_vars(None, None).unwrap();
        assert!(config.api_key.is_empty());
    }

    #[test]
    fn custom_endpoint_is_parsed() {
        let config = CompletionConfig::from_vars(
            Some(" http://localhost:8080/v1/chat/completions ".into()),
            None,
        )
        .unwrap();
        assert_eq!(config.endpoint.host_str(), Some("localhost"));
        assert_eq!(config.endpoint.port(), Some(8080));
    }

    #[test]
    fn invalid_endpoint_is_rejected() {
        let err = CompletionConfig::from_vars(Some("not a url".into()), None).unwrap_err();
        assert!(err.to_string().contains(ENDPOINT_VAR));
    }
}
