//! Mockmate LLM
//!
//! Provider-agnostic completion layer for the mock-interview service:
//! - Gemini (`generateContent`) for interactive chat turns
//! - OpenRouter (chat completions) for answer evaluation
//!
//! Every call is a single attempt guarded by a hard wall-clock timeout;
//! no layer retries.

pub mod gemini;
pub mod openrouter;
pub mod provider;
pub mod types;

// Re-export main types
pub use gemini::GeminiClient;
pub use openrouter::OpenRouterClient;
pub use provider::CompletionClient;
pub use types::*;
