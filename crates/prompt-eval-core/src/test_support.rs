//! Scripted chat models for unit tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::chat::{ChatModel, ChatReply, ChatRequest};
use crate::error::{EvalError, Result};

/// Replies with canned answers in order and records every request.
///
/// Once the script runs out, every further call fails with an API error.
pub struct ScriptedModel {
    replies: Mutex<VecDeque<Result<ChatReply>>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl ScriptedModel {
    pub fn new<I, S>(answers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let replies = answers
            .into_iter()
            .map(|answer| {
                Ok(ChatReply {
                    answer: answer.into(),
                    input_tokens: 10,
                    output_tokens: 20,
                    stop_reason: Some("end_turn".to_string()),
                })
            })
            .collect();

        Self {
            replies: Mutex::new(replies),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// A model whose every call fails.
    pub fn failing() -> Self {
        Self::new(Vec::<String>::new())
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl ChatModel for ScriptedModel {
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply> {
        self.requests.lock().unwrap().push(request.clone());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| {
                Err(EvalError::Api {
                    status: 503,
                    body: "script exhausted".to_string(),
                })
            })
    }
}
