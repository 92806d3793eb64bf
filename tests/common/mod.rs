//! Shared test support: a scriptable completion client.
#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use mockmate_llm::{CompletionClient, CompletionError, CompletionResult, Message};

/// What the stub does on each call.
pub enum StubBehavior {
    /// Pop replies in order; an exhausted queue repeats the last reply
    Replies(Mutex<VecDeque<String>>),
    /// Every call reports a timeout
    AlwaysTimeout,
    /// Every call reports an upstream 500
    AlwaysUpstreamError,
}

/// Completion client with scripted behavior and a call counter.
pub struct StubClient {
    behavior: StubBehavior,
    pub calls: AtomicUsize,
}

impl StubClient {
    pub fn replying(replies: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            behavior: StubBehavior::Replies(Mutex::new(
                replies.into_iter().map(Into::into).collect(),
            )),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn timing_out() -> Self {
        Self {
            behavior: StubBehavior::AlwaysTimeout,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn failing() -> Self {
        Self {
            behavior: StubBehavior::AlwaysUpstreamError,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl CompletionClient for StubClient {
    fn name(&self) -> &'static str {
        "stub"
    }

    async fn complete(
        &self,
        _system_prompt: &str,
        _history: &[Message],
        timeout: Duration,
    ) -> CompletionResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.behavior {
            StubBehavior::Replies(queue) => {
                let mut queue = queue.lock().unwrap();
                if queue.len() > 1 {
                    Ok(queue.pop_front().unwrap())
                } else {
                    Ok(queue.front().cloned().unwrap_or_default())
                }
            }
            StubBehavior::AlwaysTimeout => Err(CompletionError::Timeout(timeout)),
            StubBehavior::AlwaysUpstreamError => Err(CompletionError::Upstream {
                status: 500,
                body: "internal".to_string(),
            }),
        }
    }
}
