//! Groq chat-completion provider.
//!
//! Groq exposes an OpenAI-compatible `/chat/completions` endpoint, so this
//! works against any compatible base URL.

use async_trait::async_trait;
use neko_core::{config::GroqConfig, error::NekoError, traits::Provider};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Groq (OpenAI-compatible) completion provider.
pub struct GroqProvider {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
    /// `None` when timeouts are disabled in config.
    timeout: Option<Duration>,
}

impl GroqProvider {
    /// Create from config values.
    pub fn from_config(config: &GroqConfig) -> Self {
        let timeout = if config.timeout_secs > 0 {
            Some(Duration::from_secs(config.timeout_secs))
        } else {
            None
        };
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
            timeout,
        }
    }
}

#[derive(Serialize, Deserialize, Clone)]
pub(crate) struct ChatMessage {
    pub role: String,
    pub content: String,
}

#[derive(Serialize)]
pub(crate) struct ChatCompletionRequest {
    pub model: String,
    pub messages: Vec<ChatMessage>,
    pub max_tokens: u32,
    pub temperature: f32,
}

#[derive(Deserialize)]
pub(crate) struct ChatCompletionResponse {
    pub choices: Option<Vec<ChatChoice>>,
}

#[derive(Deserialize)]
pub(crate) struct ChatChoice {
    pub message: Option<ChatMessage>,
}

/// Build the ordered (system, user) message pair.
pub(crate) fn build_messages(system_prompt: &str, user_text: &str) -> Vec<ChatMessage> {
    vec![
        ChatMessage {
            role: "system".to_string(),
            content: system_prompt.to_string(),
        },
        ChatMessage {
            role: "user".to_string(),
            content: user_text.to_string(),
        },
    ]
}

/// Map a non-2xx API response to a provider error carrying status and body.
pub(crate) fn status_error(status: reqwest::StatusCode, body: &str) -> NekoError {
    NekoError::Provider(format!("groq returned {status}: {body}"))
}

/// Extract the trimmed text of the first choice, if any.
pub(crate) fn extract_text(resp: &ChatCompletionResponse) -> Option<String> {
    resp.choices
        .as_ref()
        .and_then(|c| c.first())
        .and_then(|c| c.message.as_ref())
        .map(|m| m.content.trim().to_string())
}

#[async_trait]
impl Provider for GroqProvider {
    fn name(&self) -> &str {
        "groq"
    }

    async fn complete(&self, system_prompt: &str, user_text: &str) -> Result<String, NekoError> {
        let body = ChatCompletionRequest {
            model: self.model.clone(),
            messages: build_messages(system_prompt, user_text),
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        };

        let url = format!("{}/chat/completions", self.base_url);
        debug!("groq: POST {url} model={}", self.model);

        let mut req = self
            .client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body);
        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }

        let resp = req
            .send()
            .await
            .map_err(|e| NekoError::Provider(format!("groq request failed: {e}")))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let text = resp.text().await.unwrap_or_default();
            return Err(status_error(status, &text));
        }

        let parsed: ChatCompletionResponse = resp
            .json()
            .await
            .map_err(|e| NekoError::Provider(format!("groq: failed to parse response: {e}")))?;

        extract_text(&parsed)
            .filter(|t| !t.is_empty())
            .ok_or_else(|| NekoError::Provider("groq returned no choices".into()))
    }

    async fn is_available(&self) -> bool {
        if self.api_key.is_empty() {
            warn!("groq: no API key configured");
            return false;
        }
        // Basic check: try to list models.
        let url = format!("{}/models", self.base_url);
        match self
            .client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await
        {
            Ok(resp) => resp.status().is_success(),
            Err(e) => {
                warn!("groq not available: {e}");
                false
            }
        }
    }
}
