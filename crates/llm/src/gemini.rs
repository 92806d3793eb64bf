//! Gemini Provider
//!
//! Completion client for the Google Generative Language `generateContent`
//! endpoint, used for interactive chat turns.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::debug;

use crate::provider::CompletionClient;
use crate::types::{CompletionError, CompletionResult, Message, MessageRole};

/// Default Gemini API base URL (model name and key are appended per call)
const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Gemini completion client
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a new client for the given API key and model
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: GEMINI_API_URL.to_string(),
        }
    }

    /// Override the API base URL (used by tests against local servers)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Map an internal role to the Gemini role vocabulary.
    ///
    /// This is the single place where the translation lives; handlers and
    /// the turn manager only ever see `user`/`assistant`.
    fn provider_role(role: MessageRole) -> &'static str {
        match role {
            MessageRole::User => "user",
            MessageRole::Assistant => "model",
        }
    }

    /// Build the `generateContent` request body.
    ///
    /// This API shape has no dedicated system role; the instruction rides as
    /// the first user content part, followed by the full history.
    fn build_request_body(&self, system_prompt: &str, history: &[Message]) -> serde_json::Value {
        let mut contents = Vec::with_capacity(history.len() + 1);
        contents.push(serde_json::json!({
            "role": "user",
            "parts": [{ "text": system_prompt }]
        }));

        for msg in history {
            contents.push(serde_json::json!({
                "role": Self::provider_role(msg.role),
                "parts": [{ "text": msg.content }]
            }));
        }

        serde_json::json!({ "contents": contents })
    }
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[async_trait]
impl CompletionClient for GeminiClient {
    fn name(&self) -> &'static str {
        "gemini"
    }

    async fn complete(
        &self,
        system_prompt: &str,
        history: &[Message],
        timeout: Duration,
    ) -> CompletionResult<String> {
        let url = format!(
            "{}/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );
        let body = self.build_request_body(system_prompt, history);

        debug!(
            model = %self.model,
            history_len = history.len(),
            "gemini: sending completion request"
        );

        let request = async {
            let response = self
                .client
                .post(&url)
                .json(&body)
                .send()
                .await
                .map_err(|e| CompletionError::Transport(e.to_string()))?;

            let status = response.status().as_u16();
            if !(200..300).contains(&status) {
                let body = response.text().await.unwrap_or_default();
                return Err(CompletionError::Upstream { status, body });
            }

            let parsed: GenerateContentResponse = response
                .json()
                .await
                .map_err(|e| CompletionError::Transport(e.to_string()))?;

            parsed
                .candidates
                .into_iter()
                .next()
                .and_then(|c| c.content)
                .and_then(|c| c.parts.into_iter().next())
                .and_then(|p| p.text)
                .filter(|t| !t.trim().is_empty())
                .ok_or(CompletionError::EmptyResponse)
        };

        // Dropping the request future cancels the in-flight call.
        match tokio::time::timeout(timeout, request).await {
            Ok(result) => result,
            Err(_) => Err(CompletionError::Timeout(timeout)),
        }
    }
}
