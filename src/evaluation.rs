//! Answer Evaluation
//!
//! Scores candidate answers via a completion provider. Two modes:
//! - per-answer: one `(question, answer)` pair, strict JSON object reply
//! - whole-transcript: the full conversation rendered as plain text, JSON
//!   array reply
//!
//! Neither mode surfaces upstream failures to the caller. Every failure path
//! ends in a renderable fallback so the session can always complete.

use std::sync::Arc;
use std::time::Duration;

use mockmate_llm::{CompletionClient, Message, MessageRole};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::config::{ANSWER_EVAL_TIMEOUT, TRANSCRIPT_EVAL_TIMEOUT};
use crate::prompts;

/// Score assigned when the reply cannot be parsed as an evaluation
const PARSE_FALLBACK_SCORE: u8 = 5;

/// Score assigned when the evaluation call times out
const TIMEOUT_FALLBACK_SCORE: u8 = 3;

/// Scored judgment of a single answer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerEvaluation {
    #[serde(default = "default_score")]
    pub score: u8,
    #[serde(default)]
    pub feedback: String,
    #[serde(default)]
    pub suggestion: String,
}

fn default_score() -> u8 {
    PARSE_FALLBACK_SCORE
}

impl AnswerEvaluation {
    fn parse_fallback() -> Self {
        Self {
            score: PARSE_FALLBACK_SCORE,
            feedback: "The evaluator response could not be interpreted.".to_string(),
            suggestion: "Please try again later.".to_string(),
        }
    }

    fn timeout_fallback() -> Self {
        Self {
            score: TIMEOUT_FALLBACK_SCORE,
            feedback: "The evaluator took too long to respond. Continue with the next question."
                .to_string(),
            suggestion: "Your answer was recorded but not scored.".to_string(),
        }
    }
}

/// One entry of a whole-transcript evaluation.
///
/// `score` is optional: entries the model returned without a numeric score
/// are still displayed but excluded from averages.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationResult {
    #[serde(default)]
    pub question: String,
    #[serde(default)]
    pub answer: String,
    #[serde(default)]
    pub score: Option<u8>,
    #[serde(default)]
    pub feedback: String,
    #[serde(default)]
    pub suggestion: String,
}

impl EvaluationResult {
    fn parse_fallback() -> Self {
        Self {
            question: "Overall interview".to_string(),
            answer: "See transcript".to_string(),
            score: Some(PARSE_FALLBACK_SCORE),
            feedback: "The evaluator response could not be interpreted.".to_string(),
            suggestion: "Please try again later.".to_string(),
        }
    }

    fn timeout_fallback() -> Self {
        Self {
            question: "Overall interview".to_string(),
            answer: "See transcript".to_string(),
            score: Some(TIMEOUT_FALLBACK_SCORE),
            feedback: "The evaluator took too long to respond. Continue with your preparation."
                .to_string(),
            suggestion: "Your transcript was recorded but not scored.".to_string(),
        }
    }
}

/// Drives evaluation calls against a completion provider.
pub struct Evaluator {
    client: Arc<dyn CompletionClient>,
    answer_timeout: Duration,
    transcript_timeout: Duration,
}

impl Evaluator {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        Self {
            client,
            answer_timeout: ANSWER_EVAL_TIMEOUT,
            transcript_timeout: TRANSCRIPT_EVAL_TIMEOUT,
        }
    }

    /// Override the default timeouts, primarily for tests.
    pub fn with_timeouts(
        client: Arc<dyn CompletionClient>,
        answer_timeout: Duration,
        transcript_timeout: Duration,
    ) -> Self {
        Self {
            client,
            answer_timeout,
            transcript_timeout,
        }
    }

    /// Score one question/answer pair. Never fails: parse problems yield a
    /// neutral default and timeouts a low-but-nonzero score.
    pub async fn evaluate_answer(&self, question: &str, answer: &str) -> AnswerEvaluation {
        let request = prompts::answer_evaluation_request(question, answer);
        let history = [Message::user(request)];

        match self
            .client
            .complete(prompts::ANSWER_EVALUATOR_SYSTEM, &history, self.answer_timeout)
            .await
        {
            Ok(text) => match serde_json::from_str::<AnswerEvaluation>(extract_json(&text)) {
                Ok(eval) => eval,
                Err(e) => {
                    warn!("Failed to parse answer evaluation: {e}; raw text: {text}");
                    AnswerEvaluation::parse_fallback()
                }
            },
            Err(e) if e.is_timeout() => {
                warn!("Answer evaluation timed out via {}", self.client.name());
                AnswerEvaluation::timeout_fallback()
            }
            Err(e) => {
                warn!("Answer evaluation failed via {}: {e}", self.client.name());
                AnswerEvaluation::parse_fallback()
            }
        }
    }

    /// Score a whole transcript. Returns at least one entry; total failures
    /// collapse into a single synthetic entry.
    pub async fn evaluate_transcript(
        &self,
        domain: &str,
        transcript: &[Message],
    ) -> Vec<EvaluationResult> {
        let rendered = render_transcript(transcript);
        let system = prompts::transcript_evaluator_system_prompt(domain);
        let history = [Message::user(prompts::transcript_evaluation_request(
            &rendered,
        ))];

        match self
            .client
            .complete(&system, &history, self.transcript_timeout)
            .await
        {
            Ok(text) => {
                match serde_json::from_str::<Vec<EvaluationResult>>(extract_json(&text)) {
                    Ok(results) if !results.is_empty() => {
                        debug!("Transcript evaluation produced {} entries", results.len());
                        results
                    }
                    Ok(_) => {
                        warn!("Transcript evaluation returned an empty array");
                        vec![EvaluationResult::parse_fallback()]
                    }
                    Err(e) => {
                        warn!("Failed to parse transcript evaluation: {e}; raw text: {text}");
                        vec![EvaluationResult::parse_fallback()]
                    }
                }
            }
            Err(e) if e.is_timeout() => {
                warn!("Transcript evaluation timed out via {}", self.client.name());
                vec![EvaluationResult::timeout_fallback()]
            }
            Err(e) => {
                warn!(
                    "Transcript evaluation failed via {}: {e}",
                    self.client.name()
                );
                vec![EvaluationResult::parse_fallback()]
            }
        }
    }
}

/// Strip a leading/trailing markdown code fence from a model reply.
///
/// Accepts ```` ```json ```` or a bare ```` ``` ```` opener; anything else is
/// returned trimmed but otherwise untouched.
pub fn extract_json(text: &str) -> &str {
    let trimmed = text.trim();
    let inner = if let Some(rest) = trimmed.strip_prefix("```json") {
        rest
    } else if let Some(rest) = trimmed.strip_prefix("```") {
        rest
    } else {
        return trimmed;
    };
    inner.strip_suffix("```").unwrap_or(inner).trim()
}

/// Render a transcript as the plain-text dialogue the evaluator prompt
/// expects, one `Speaker: text` line per message.
pub fn render_transcript(transcript: &[Message]) -> String {
    transcript
        .iter()
        .map(|m| {
            let speaker = match m.role {
                MessageRole::User => "Candidate",
                MessageRole::Assistant => "Interviewer",
            };
            format!("{speaker}: {}", m.content)
        })
        .collect::<Vec<_>>()
        .join("\n")
}
