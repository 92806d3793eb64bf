//! HTTP Routes
//!
//! Axum router and handlers for the four service endpoints. Request bodies
//! for the POST endpoints are taken as raw JSON and validated by hand so
//! missing fields produce a 400 with a readable message instead of a
//! framework rejection.

use std::collections::HashMap;
use std::sync::Arc;

use axum::extract::{Query, State};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use mockmate_llm::{CompletionClient, GeminiClient, Message, OpenRouterClient};
use serde_json::{json, Value};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::catalog::{self, DEFAULT_QUESTION_COUNT};
use crate::config::{AppConfig, CHAT_TIMEOUT};
use crate::error::{AppError, AppResult};
use crate::evaluation::Evaluator;
use crate::session::TurnManager;

/// Shared application state.
///
/// Clients are `None` when the corresponding API key is not configured; the
/// affected endpoints then answer 500 until the key is supplied.
pub struct AppState {
    pub config: AppConfig,
    pub chat_client: Option<Arc<dyn CompletionClient>>,
    pub eval_client: Option<Arc<dyn CompletionClient>>,
}

impl AppState {
    pub fn from_config(config: AppConfig) -> Self {
        let chat_client: Option<Arc<dyn CompletionClient>> = config
            .gemini_api_key
            .as_deref()
            .map(|key| Arc::new(GeminiClient::new(key, &config.chat_model)) as Arc<dyn CompletionClient>);
        let eval_client: Option<Arc<dyn CompletionClient>> = config
            .openrouter_api_key
            .as_deref()
            .map(|key| Arc::new(OpenRouterClient::new(key, &config.eval_model)) as Arc<dyn CompletionClient>);
        Self {
            config,
            chat_client,
            eval_client,
        }
    }
}

/// Build the service router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/questions", get(get_questions))
        .route("/api/chat", post(post_chat))
        .route("/api/evaluate", post(post_evaluate))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn health() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET /api/questions?domain=...&category=...
async fn get_questions(
    Query(params): Query<HashMap<String, String>>,
) -> AppResult<impl IntoResponse> {
    let domain = params.get("domain").map(String::as_str).unwrap_or("");
    let category = params.get("category").map(String::as_str).unwrap_or("");
    if domain.is_empty() || category.is_empty() {
        return Err(AppError::validation("Missing domain or category"));
    }

    let mut questions = catalog::get_questions(domain, category, DEFAULT_QUESTION_COUNT);
    if questions.is_empty() {
        debug!("No catalog questions for {domain}/{category}, serving fallback");
        questions = catalog::fallback_questions(domain, category);
    }
    Ok(Json(questions))
}

/// POST /api/chat with `{messages, domain, category}`
async fn post_chat(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> AppResult<impl IntoResponse> {
    let Some(raw_messages) = body.get("messages").and_then(Value::as_array) else {
        return Err(AppError::validation("Missing chat messages"));
    };
    let Some(client) = state.chat_client.as_deref() else {
        return Err(AppError::config("Server misconfiguration: API key missing"));
    };

    let domain = body
        .get("domain")
        .and_then(Value::as_str)
        .unwrap_or("general");
    let category = body
        .get("category")
        .and_then(Value::as_str)
        .unwrap_or("general");
    let transcript = parse_transcript(raw_messages);

    let mut turns = TurnManager::from_transcript(domain, category, transcript);
    let reply = turns.resolve_pending_turn(client, CHAT_TIMEOUT).await;
    Ok(Json(json!({ "reply": reply })))
}

/// POST /api/evaluate with either `{question, answer}` or `{messages, domain}`
async fn post_evaluate(
    State(state): State<Arc<AppState>>,
    Json(body): Json<Value>,
) -> AppResult<Response> {
    let question = body.get("question").and_then(Value::as_str);
    let answer = body.get("answer").and_then(Value::as_str);

    if let (Some(question), Some(answer)) = (question, answer) {
        let client = state
            .eval_client
            .clone()
            .ok_or_else(|| AppError::config("Server misconfiguration: API key missing"))?;
        let evaluation = Evaluator::new(client).evaluate_answer(question, answer).await;
        return Ok(Json(evaluation).into_response());
    }

    let Some(raw_messages) = body.get("messages").and_then(Value::as_array) else {
        return Err(AppError::validation("Missing messages"));
    };
    let client = state
        .eval_client
        .clone()
        .ok_or_else(|| AppError::config("Server misconfiguration: API key missing"))?;
    let domain = body
        .get("domain")
        .and_then(Value::as_str)
        .unwrap_or("general");
    let transcript = parse_transcript(raw_messages);
    let results = Evaluator::new(client)
        .evaluate_transcript(domain, &transcript)
        .await;
    Ok(Json(results).into_response())
}

/// Translate client-supplied message objects into transcript messages.
///
/// Lenient on purpose: any role other than `assistant` counts as the user,
/// and a missing content field becomes an empty string.
fn parse_transcript(raw: &[Value]) -> Vec<Message> {
    raw.iter()
        .map(|m| {
            let content = m.get("content").and_then(Value::as_str).unwrap_or("");
            match m.get("role").and_then(Value::as_str) {
                Some("assistant") => Message::assistant(content),
                _ => Message::user(content),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockmate_llm::MessageRole;

    #[test]
    fn test_parse_transcript_role_mapping() {
        let raw = vec![
            json!({"role": "assistant", "content": "Hello"}),
            json!({"role": "user", "content": "Hi"}),
            json!({"role": "system", "content": "ignored role"}),
            json!({"role": "user"}),
        ];
        let transcript = parse_transcript(&raw);
        assert_eq!(transcript[0].role, MessageRole::Assistant);
        assert_eq!(transcript[1].role, MessageRole::User);
        assert_eq!(transcript[2].role, MessageRole::User);
        assert_eq!(transcript[3].content, "");
    }
}
