//! Service Configuration
//!
//! Environment-driven settings: bind address, upstream credentials, model
//! names, and the per-call timeouts.

use std::net::SocketAddr;
use std::time::Duration;

use crate::error::{AppError, AppResult};

/// Wall-clock timeout for one chat turn completion
pub const CHAT_TIMEOUT: Duration = Duration::from_secs(12);

/// Wall-clock timeout for a single-answer evaluation call
pub const ANSWER_EVAL_TIMEOUT: Duration = Duration::from_secs(15);

/// Wall-clock timeout for a whole-transcript evaluation call
pub const TRANSCRIPT_EVAL_TIMEOUT: Duration = Duration::from_secs(30);

const DEFAULT_BIND_ADDR: &str = "127.0.0.1:8080";
const DEFAULT_CHAT_MODEL: &str = "gemini-3-flash-preview";
const DEFAULT_EVAL_MODEL: &str = "openai/gpt-oss-120b:free";

/// Service configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Address the server listens on
    pub bind_addr: SocketAddr,
    /// Credential for the chat-turn provider; `None` leaves the chat
    /// endpoint responding 500 until configured
    pub gemini_api_key: Option<String>,
    /// Credential for the evaluation provider; same semantics
    pub openrouter_api_key: Option<String>,
    /// Model used for chat turns
    pub chat_model: String,
    /// Model used for evaluations
    pub eval_model: String,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// API keys may be absent at startup; only a malformed bind address is a
    /// startup failure.
    pub fn from_env() -> AppResult<Self> {
        let bind_addr = std::env::var("MOCKMATE_BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .map_err(|e| AppError::config(format!("invalid bind address: {e}")))?;

        Ok(Self {
            bind_addr,
            gemini_api_key: non_empty_env("GEMINI_API_KEY"),
            openrouter_api_key: non_empty_env("OPENROUTER_API_KEY"),
            chat_model: std::env::var("MOCKMATE_CHAT_MODEL")
                .unwrap_or_else(|_| DEFAULT_CHAT_MODEL.to_string()),
            eval_model: std::env::var("MOCKMATE_EVAL_MODEL")
                .unwrap_or_else(|_| DEFAULT_EVAL_MODEL.to_string()),
        })
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}
