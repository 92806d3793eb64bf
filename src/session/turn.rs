//! Turn Manager
//!
//! Owns one conversational transcript and drives the request/reply cycle for
//! chat turns. Invariant: each accepted submission grows the transcript by
//! exactly two messages, the user's input and the interviewer's reply. When
//! the upstream call fails, a filler reply stands in for the interviewer so
//! the conversation never stalls.

use std::time::Duration;

use mockmate_llm::{CompletionClient, CompletionError, Message, MessageRole};
use tracing::warn;

use crate::error::{AppError, AppResult};
use crate::prompts;

/// Interviewer reply substituted when the chat call times out
pub const TIMEOUT_FILLER: &str =
    "We seem to be having connection issues on our end. Let's keep going; please continue \
     with your answer or ask me to repeat the question.";

/// Interviewer reply substituted when the chat call fails outright
pub const DEGRADED_FILLER: &str =
    "The interviewer nods and moves on. Let's continue with the next part of your answer.";

/// Interviewer reply substituted when the upstream returned no usable text
pub const THINKING_FILLER: &str = "The interviewer is thinking... Try again.";

/// Lifecycle state of a conversational session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnState {
    /// Ready to accept the next user message
    AwaitingUserInput,
    /// A completion call is in flight; no overlapping submissions
    Generating,
    /// The session was ended; no further submissions are accepted
    Ended,
}

/// Conversational state machine for one interview session.
pub struct TurnManager {
    domain: String,
    category: String,
    transcript: Vec<Message>,
    state: TurnState,
}

impl TurnManager {
    /// Start a fresh session with an empty transcript.
    pub fn new(domain: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            domain: domain.into(),
            category: category.into(),
            transcript: Vec::new(),
            state: TurnState::AwaitingUserInput,
        }
    }

    /// Rebuild a session from a transcript supplied by the client.
    ///
    /// Used by the stateless HTTP layer, where the client carries the full
    /// conversation on every request.
    pub fn from_transcript(
        domain: impl Into<String>,
        category: impl Into<String>,
        transcript: Vec<Message>,
    ) -> Self {
        Self {
            domain: domain.into(),
            category: category.into(),
            transcript,
            state: TurnState::AwaitingUserInput,
        }
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn state(&self) -> TurnState {
        self.state
    }

    /// Number of completed user/interviewer exchanges.
    pub fn exchanges(&self) -> usize {
        self.transcript
            .iter()
            .filter(|m| m.role == MessageRole::User)
            .count()
    }

    /// Submit one user message and obtain the interviewer's reply.
    ///
    /// The transcript grows by exactly two messages whether or not the
    /// upstream call succeeds.
    pub async fn submit(
        &mut self,
        client: &dyn CompletionClient,
        timeout: Duration,
        content: impl Into<String>,
    ) -> AppResult<String> {
        if self.state == TurnState::Ended {
            return Err(AppError::validation("Session has already ended"));
        }
        self.transcript.push(Message::user(content));
        let reply = self.generate_reply(client, timeout).await;
        self.transcript.push(Message::assistant(reply.clone()));
        Ok(reply)
    }

    /// Produce the interviewer reply for a transcript that already ends with
    /// the pending user message, appending the reply.
    ///
    /// This is the entry point for the stateless HTTP handler, which
    /// receives the user's message already inside the transcript.
    pub async fn resolve_pending_turn(
        &mut self,
        client: &dyn CompletionClient,
        timeout: Duration,
    ) -> String {
        let reply = self.generate_reply(client, timeout).await;
        self.transcript.push(Message::assistant(reply.clone()));
        reply
    }

    async fn generate_reply(&mut self, client: &dyn CompletionClient, timeout: Duration) -> String {
        self.state = TurnState::Generating;
        let system = prompts::interviewer_system_prompt(&self.domain, &self.category);
        let result = client.complete(&system, &self.transcript, timeout).await;
        self.state = TurnState::AwaitingUserInput;

        match result {
            Ok(text) => text,
            Err(CompletionError::Timeout(elapsed)) => {
                warn!(
                    "Chat turn timed out after {elapsed:?} via {}",
                    client.name()
                );
                TIMEOUT_FILLER.to_string()
            }
            Err(CompletionError::EmptyResponse) => {
                warn!("Chat turn returned no text via {}", client.name());
                THINKING_FILLER.to_string()
            }
            Err(e) => {
                warn!("Chat turn failed via {}: {e}", client.name());
                DEGRADED_FILLER.to_string()
            }
        }
    }

    /// End the session. Idempotent.
    pub fn end(&mut self) {
        self.state = TurnState::Ended;
    }
}
