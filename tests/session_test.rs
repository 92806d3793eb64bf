//! Session-level tests: turn manager resilience, evaluation sequencing, and
//! score aggregation.

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::StubClient;
use mockmate::catalog::Question;
use mockmate::evaluation::Evaluator;
use mockmate::session::turn::{TIMEOUT_FILLER, TurnManager, TurnState};
use mockmate::session::{ChatSession, InterviewSession, SessionOutcome};

const TEST_TIMEOUT: Duration = Duration::from_secs(1);

fn question(id: &str, text: &str) -> Question {
    Question {
        id: id.to_string(),
        domain: "aiml".to_string(),
        category: "technical".to_string(),
        text: text.to_string(),
    }
}

// ============================================================================
// Turn manager
// ============================================================================

#[tokio::test]
async fn test_turns_grow_transcript_by_two_even_on_timeout() {
    let client = StubClient::timing_out();
    let mut turns = TurnManager::new("aiml", "technical");

    for i in 0..3 {
        let reply = turns
            .submit(&client, TEST_TIMEOUT, format!("answer {i}"))
            .await
            .unwrap();
        assert_eq!(reply, TIMEOUT_FILLER);
    }

    assert_eq!(turns.transcript().len(), 6);
    assert_eq!(turns.exchanges(), 3);
    assert_eq!(turns.state(), TurnState::AwaitingUserInput);
}

#[tokio::test]
async fn test_submit_after_end_is_rejected() {
    let client = StubClient::replying(["hello"]);
    let mut turns = TurnManager::new("aiml", "technical");
    turns.end();
    let result = turns.submit(&client, TEST_TIMEOUT, "late answer").await;
    assert!(result.is_err());
    assert_eq!(client.call_count(), 0);
    assert!(turns.transcript().is_empty());
}

#[tokio::test]
async fn test_upstream_failure_yields_filler_reply() {
    let client = StubClient::failing();
    let mut turns = TurnManager::new("backend", "behavioral");
    let reply = turns.submit(&client, TEST_TIMEOUT, "my answer").await.unwrap();
    assert!(!reply.is_empty());
    assert_eq!(turns.transcript().len(), 2);
}

// ============================================================================
// Question-mode session
// ============================================================================

#[tokio::test]
async fn test_question_session_average_score() {
    let client = Arc::new(StubClient::replying([
        r#"{"score": 8, "feedback": "good", "suggestion": "s"}"#,
        r#"{"score": 6, "feedback": "fair", "suggestion": "s"}"#,
        r#"{"score": 4, "feedback": "weak", "suggestion": "s"}"#,
    ]));
    let evaluator = Evaluator::with_timeouts(client.clone(), TEST_TIMEOUT, TEST_TIMEOUT);

    let mut session = InterviewSession::new(vec![
        question("q1", "First?"),
        question("q2", "Second?"),
        question("q3", "Third?"),
    ]);
    for answer in ["a1", "a2", "a3"] {
        assert!(session.submit_answer(answer));
    }

    let outcome = session.finish(&evaluator).await;
    assert_eq!(outcome, SessionOutcome::Evaluated { average: Some(6.0) });
    assert_eq!(client.call_count(), 3);
    assert!(session.is_finished());
    assert!(session.answered().iter().all(|a| a.evaluation.is_some()));
}

#[tokio::test]
async fn test_question_session_timeouts_still_produce_scores() {
    let client = Arc::new(StubClient::timing_out());
    let evaluator = Evaluator::with_timeouts(client, TEST_TIMEOUT, TEST_TIMEOUT);

    let mut session = InterviewSession::new(vec![question("q1", "First?")]);
    session.submit_answer("a1");
    let outcome = session.finish(&evaluator).await;

    let SessionOutcome::Evaluated { average } = outcome else {
        panic!("expected an evaluated outcome");
    };
    assert_eq!(average, Some(3.0));
}

#[tokio::test]
async fn test_empty_session_skips_evaluation() {
    let client = Arc::new(StubClient::replying(["should never be used"]));
    let evaluator = Evaluator::with_timeouts(client.clone(), TEST_TIMEOUT, TEST_TIMEOUT);

    let mut session = InterviewSession::new(vec![question("q1", "First?")]);
    let outcome = session.finish(&evaluator).await;
    assert_eq!(outcome, SessionOutcome::NothingToEvaluate);
    assert_eq!(client.call_count(), 0);
}

// ============================================================================
// Chat-mode session
// ============================================================================

#[tokio::test]
async fn test_chat_session_end_without_exchanges() {
    let client = Arc::new(StubClient::replying(["unused"]));
    let evaluator = Evaluator::with_timeouts(client.clone(), TEST_TIMEOUT, TEST_TIMEOUT);

    let mut session = ChatSession::new("aiml", "technical");
    let outcome = session.end(&evaluator).await;
    assert_eq!(outcome, SessionOutcome::NothingToEvaluate);
    assert_eq!(client.call_count(), 0);
    assert!(session.is_ended());
}

#[tokio::test]
async fn test_chat_session_scores_transcript() {
    let chat_client = StubClient::replying(["Tell me about concurrency."]);
    let eval_client = Arc::new(StubClient::replying([
        r#"[
            {"question": "Q1", "answer": "A1", "score": 9, "feedback": "f", "suggestion": "s"},
            {"question": "Q2", "answer": "A2", "feedback": "no score given", "suggestion": "s"},
            {"question": "Q3", "answer": "A3", "score": 5, "feedback": "f", "suggestion": "s"}
        ]"#,
    ]));
    let evaluator = Evaluator::with_timeouts(eval_client, TEST_TIMEOUT, TEST_TIMEOUT);

    let mut session = ChatSession::new("backend", "technical");
    session
        .turns_mut()
        .submit(&chat_client, TEST_TIMEOUT, "I use async runtimes.")
        .await
        .unwrap();

    let outcome = session.end(&evaluator).await;
    assert_eq!(outcome, SessionOutcome::Evaluated { average: Some(7.0) });
    assert_eq!(session.results().len(), 3);
    assert_eq!(session.results()[1].score, None);
}

#[tokio::test]
async fn test_transcript_evaluation_empty_array_is_total_failure() {
    let eval_client = Arc::new(StubClient::replying(["[]"]));
    let evaluator = Evaluator::with_timeouts(eval_client, TEST_TIMEOUT, TEST_TIMEOUT);

    let transcript = vec![
        mockmate_llm::Message::assistant("Tell me about caching."),
        mockmate_llm::Message::user("I use an LRU cache."),
    ];
    let results = evaluator.evaluate_transcript("backend", &transcript).await;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].score, Some(5));
    assert!(!results[0].feedback.is_empty());
    assert!(!results[0].suggestion.is_empty());
}

#[tokio::test]
async fn test_transcript_evaluation_unparsable_reply_is_total_failure() {
    let eval_client = Arc::new(StubClient::replying([
        "I'd rate this interview a solid effort overall.",
    ]));
    let evaluator = Evaluator::with_timeouts(eval_client, TEST_TIMEOUT, TEST_TIMEOUT);

    let transcript = vec![
        mockmate_llm::Message::assistant("A question."),
        mockmate_llm::Message::user("An answer."),
    ];
    let results = evaluator.evaluate_transcript("aiml", &transcript).await;

    assert_eq!(results.len(), 1);
    assert_eq!(results[0].score, Some(5));
    assert!(!results[0].feedback.is_empty());
}

#[tokio::test]
async fn test_chat_session_evaluation_timeout_fallback() {
    let chat_client = StubClient::replying(["A question."]);
    let eval_client = Arc::new(StubClient::timing_out());
    let evaluator = Evaluator::with_timeouts(eval_client, TEST_TIMEOUT, TEST_TIMEOUT);

    let mut session = ChatSession::new("aiml", "technical");
    session
        .turns_mut()
        .submit(&chat_client, TEST_TIMEOUT, "My answer.")
        .await
        .unwrap();

    let outcome = session.end(&evaluator).await;
    let SessionOutcome::Evaluated { average } = outcome else {
        panic!("expected an evaluated outcome");
    };
    assert_eq!(average, Some(3.0));
    assert_eq!(session.results().len(), 1);
    assert!(!session.results()[0].feedback.is_empty());
}
