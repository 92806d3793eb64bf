//! OpenRouter Provider
//!
//! Completion client for the OpenRouter chat-completions endpoint, used for
//! answer evaluation calls.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::provider::CompletionClient;
use crate::types::{CompletionError, CompletionResult, Message, MessageRole};

/// Default OpenRouter API endpoint
const OPENROUTER_API_URL: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Referer and title headers OpenRouter uses for app attribution
const HTTP_REFERER: &str = "http://localhost:3000";
const APP_TITLE: &str = "Mockmate Interview";

/// OpenRouter completion client
pub struct OpenRouterClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl OpenRouterClient {
    /// Create a new client for the given API key and model
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: OPENROUTER_API_URL.to_string(),
        }
    }

    /// Override the API base URL (used by tests against local servers)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Map an internal role to the OpenAI-style role vocabulary.
    fn provider_role(role: MessageRole) -> &'static str {
        match role {
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
        }
    }

    /// Build the chat-completions request body: a leading system message
    /// followed by the history in transcript order.
    fn build_request_body(&self, system_prompt: &str, history: &[Message]) -> serde_json::Value {
        let mut messages = Vec::with_capacity(history.len() + 1);
        messages.push(serde_json::json!({
            "role": "system",
            "content": system_prompt
        }));

        for msg in history {
            messages.push(serde_json::json!({
                "role": Self::provider_role(msg.role),
                "content": msg.content
            }));
        }

        serde_json::json!({
            "model": self.model,
            "messages": messages
        })
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionsResponse {
    #[serde(default)]
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[async_trait]
impl CompletionClient for OpenRouterClient {
    fn name(&self) -> &'static str {
        "openrouter"
    }

    async fn complete(
        &self,
        system_prompt: &str,
        history: &[Message],
        timeout: Duration,
    ) -> CompletionResult<String> {
        let body = self.build_request_body(system_prompt, history);

        debug!(
            model = %self.model,
            history_len = history.len(),
            "openrouter: sending completion request"
        );

        let request = async {
            let response = self
                .client
                .post(&self.base_url)
                .bearer_auth(&self.api_key)
                .header("HTTP-Referer", HTTP_REFERER)
                .header("X-Title", APP_TITLE)
                .json(&body)
                .send()
                .await
                .map_err(|e| CompletionError::Transport(e.to_string()))?;

            let status = response.status().as_u16();
            if !(200..300).contains(&status) {
                let body = response.text().await.unwrap_or_default();
                return Err(CompletionError::Upstream { status, body });
            }

            let parsed: ChatCompletionsResponse = response
                .json()
                .await
                .map_err(|e| CompletionError::Transport(e.to_string()))?;

            parsed
                .choices
                .into_iter()
                .next()
                .and_then(|c| c.message)
                .and_then(|m| m.content)
                .filter(|t| !t.trim().is_empty())
                .ok_or(CompletionError::EmptyResponse)
        };

        match tokio::time::timeout(timeout, request).await {
            Ok(result) => result,
            Err(_) => Err(CompletionError::Timeout(timeout)),
        }
    }
}
