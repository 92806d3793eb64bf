//! Completion Types
//!
//! Core types shared by all completion providers.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Role of a message within a transcript.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// A single message in an interview transcript.
///
/// Transcripts are append-only and ordered; insertion order is conversation
/// order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Role of the message sender
    pub role: MessageRole,
    /// Message text
    pub content: String,
}

impl Message {
    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }

    /// Create an assistant message
    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Assistant,
            content: content.into(),
        }
    }
}

/// Error type for completion calls.
///
/// `Timeout` is deliberately distinct from the other variants so callers can
/// substitute conversational filler instead of propagating an error to the
/// user.
#[derive(Debug, Error)]
pub enum CompletionError {
    /// The wall-clock timeout elapsed; the in-flight request was cancelled.
    #[error("completion timed out after {0:?}")]
    Timeout(Duration),

    /// The upstream responded with a non-success status.
    #[error("upstream returned HTTP {status}: {body}")]
    Upstream { status: u16, body: String },

    /// Connection, TLS, or body-read failure before a status was available.
    #[error("transport error: {0}")]
    Transport(String),

    /// The upstream responded 2xx but carried no usable completion text.
    #[error("upstream returned no completion text")]
    EmptyResponse,
}

impl CompletionError {
    /// Whether this failure was the per-call timeout firing.
    pub fn is_timeout(&self) -> bool {
        matches!(self, CompletionError::Timeout(_))
    }
}

/// Result type for completion operations
pub type CompletionResult<T> = Result<T, CompletionError>;
