//! Mockmate
//!
//! Mock-interview web service: serves interview questions, relays chat turns
//! to a remote interviewer model, and scores candidate answers.
//!
//! Design principle: once a session has begun, no failure below the
//! validation/configuration tier may terminate it. Every failure path has a
//! user-visible substitute so the interview can always proceed to completion.

pub mod catalog;
pub mod config;
pub mod error;
pub mod evaluation;
pub mod prompts;
pub mod routes;
pub mod session;
