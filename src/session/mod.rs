//! Interview Sessions
//!
//! Session state for both interview modes: the conversational chat session
//! built on the turn manager, and the fixed-question session that walks a
//! prepared list.

pub mod controller;
pub mod turn;

pub use controller::{AnsweredQuestion, ChatSession, InterviewSession, SessionOutcome};
pub use turn::{TurnManager, TurnState};
