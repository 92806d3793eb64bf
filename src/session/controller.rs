//! Session Controller
//!
//! Drives a session from creation through evaluation: question sequencing in
//! the fixed-question mode, chat turns in the conversational mode, and the
//! final scoring pass. No retries happen at this layer; resilience lives in
//! the completion clients and the evaluator.

use chrono::{DateTime, Utc};
use mockmate_llm::Message;
use serde::Serialize;
use uuid::Uuid;

use crate::catalog::Question;
use crate::evaluation::{AnswerEvaluation, EvaluationResult, Evaluator};
use crate::session::turn::{TurnManager, TurnState};

/// A question the candidate has answered, with its evaluation once scoring
/// has run.
#[derive(Debug, Clone, Serialize)]
pub struct AnsweredQuestion {
    pub question: String,
    pub answer: String,
    pub evaluation: Option<AnswerEvaluation>,
}

/// Outcome of ending a session.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutcome {
    /// The session ended before anything was answered; nothing to score
    NothingToEvaluate,
    /// Scoring ran; `average` is `None` when no entry carried a score
    Evaluated { average: Option<f64> },
}

/// Fixed-question interview session.
///
/// Walks a prepared question list in order; answers are collected first and
/// scored together when the session ends.
pub struct InterviewSession {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    questions: Vec<Question>,
    cursor: usize,
    answered: Vec<AnsweredQuestion>,
    finished: bool,
}

impl InterviewSession {
    pub fn new(questions: Vec<Question>) -> Self {
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            questions,
            cursor: 0,
            answered: Vec::new(),
            finished: false,
        }
    }

    /// The question currently awaiting an answer, if any remain.
    pub fn current_question(&self) -> Option<&Question> {
        if self.finished {
            return None;
        }
        self.questions.get(self.cursor)
    }

    /// Record the candidate's answer to the current question and advance.
    /// Returns false when there is no question to answer.
    pub fn submit_answer(&mut self, answer: impl Into<String>) -> bool {
        let Some(question) = self.current_question() else {
            return false;
        };
        self.answered.push(AnsweredQuestion {
            question: question.text.clone(),
            answer: answer.into(),
            evaluation: None,
        });
        self.cursor += 1;
        true
    }

    /// End the session and score every answered question, one evaluation
    /// call at a time. Ending with no answers skips scoring entirely.
    pub async fn finish(&mut self, evaluator: &Evaluator) -> SessionOutcome {
        self.finished = true;
        if self.answered.is_empty() {
            return SessionOutcome::NothingToEvaluate;
        }

        // Strictly sequential: one upstream call in flight at a time.
        for item in &mut self.answered {
            let evaluation = evaluator
                .evaluate_answer(&item.question, &item.answer)
                .await;
            item.evaluation = Some(evaluation);
        }

        SessionOutcome::Evaluated {
            average: self.average_score(),
        }
    }

    pub fn answered(&self) -> &[AnsweredQuestion] {
        &self.answered
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Arithmetic mean over answered questions with a numeric score.
    pub fn average_score(&self) -> Option<f64> {
        let scores: Vec<u8> = self
            .answered
            .iter()
            .filter_map(|a| a.evaluation.as_ref().map(|e| e.score))
            .collect();
        if scores.is_empty() {
            return None;
        }
        Some(scores.iter().map(|&s| f64::from(s)).sum::<f64>() / scores.len() as f64)
    }
}

/// Conversational interview session.
///
/// Wraps a turn manager and runs whole-transcript evaluation when the
/// session ends.
pub struct ChatSession {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    domain: String,
    turns: TurnManager,
    results: Vec<EvaluationResult>,
}

impl ChatSession {
    pub fn new(domain: impl Into<String>, category: impl Into<String>) -> Self {
        let domain = domain.into();
        Self {
            id: Uuid::new_v4(),
            created_at: Utc::now(),
            turns: TurnManager::new(domain.clone(), category),
            domain,
            results: Vec::new(),
        }
    }

    pub fn turns_mut(&mut self) -> &mut TurnManager {
        &mut self.turns
    }

    pub fn transcript(&self) -> &[Message] {
        self.turns.transcript()
    }

    /// End the session and score the transcript. A session with no
    /// completed exchanges is discarded without an evaluation call.
    pub async fn end(&mut self, evaluator: &Evaluator) -> SessionOutcome {
        self.turns.end();
        if self.turns.exchanges() == 0 {
            return SessionOutcome::NothingToEvaluate;
        }
        self.results = evaluator
            .evaluate_transcript(&self.domain, self.turns.transcript())
            .await;
        SessionOutcome::Evaluated {
            average: self.average_score(),
        }
    }

    pub fn results(&self) -> &[EvaluationResult] {
        &self.results
    }

    pub fn is_ended(&self) -> bool {
        self.turns.state() == TurnState::Ended
    }

    /// Arithmetic mean over result entries that carry a numeric score;
    /// unscored entries are still displayed but excluded here.
    pub fn average_score(&self) -> Option<f64> {
        let scores: Vec<u8> = self.results.iter().filter_map(|r| r.score).collect();
        if scores.is_empty() {
            return None;
        }
        Some(scores.iter().map(|&s| f64::from(s)).sum::<f64>() / scores.len() as f64)
    }
}
