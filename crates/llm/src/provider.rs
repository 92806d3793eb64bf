//! Completion Provider Trait
//!
//! Defines the common interface for all completion providers.

use std::time::Duration;

use async_trait::async_trait;

use crate::types::{CompletionResult, Message};

/// Trait that all completion providers implement.
///
/// One call is one completion: a single request/response cycle against the
/// remote text-generation endpoint. Implementations enforce the given
/// wall-clock `timeout` themselves and never retry; the caller decides what
/// a failure means for the conversation.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Returns the provider name for logging.
    fn name(&self) -> &'static str;

    /// Send a system instruction plus the full prior message history and
    /// return the raw reply text.
    ///
    /// # Arguments
    /// * `system_prompt` - Behavioral instruction, translated into whatever
    ///   shape the provider expects
    /// * `history` - Conversation history in transcript order
    /// * `timeout` - Hard wall-clock limit for the whole call
    async fn complete(
        &self,
        system_prompt: &str,
        history: &[Message],
        timeout: Duration,
    ) -> CompletionResult<String>;
}
