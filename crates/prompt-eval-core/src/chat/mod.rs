//! Chat model abstraction.
//!
//! Everything that talks to a model goes through [`ChatModel`]: the runner,
//! the judge, dataset generation and the one-shot `ask` command. The only
//! network implementation is [`AnthropicClient`]; tests use scripted models.

pub mod anthropic;
pub mod session;
pub mod sse;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::types::TokenUsage;

pub use anthropic::AnthropicClient;
pub use session::ChatSession;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Per-call settings that sit next to the message history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendOptions {
    pub system: Option<String>,
    pub max_tokens: u32,
    pub stream: bool,
    pub stop_sequences: Vec<String>,
}

impl Default for SendOptions {
    fn default() -> Self {
        Self {
            system: None,
            max_tokens: 100,
            stream: false,
            stop_sequences: Vec::new(),
        }
    }
}

impl SendOptions {
    pub fn new(max_tokens: u32) -> Self {
        Self {
            max_tokens,
            ..Self::default()
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn with_stream(mut self, stream: bool) -> Self {
        self.stream = stream;
        self
    }

    pub fn with_stop_sequences(mut self, stop_sequences: Vec<String>) -> Self {
        self.stop_sequences = stop_sequences;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatRequest {
    pub messages: Vec<Message>,
    pub options: SendOptions,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatReply {
    pub answer: String,
    pub input_tokens: u64,
    pub output_tokens: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stop_reason: Option<String>,
}

impl ChatReply {
    pub fn usage(&self) -> TokenUsage {
        TokenUsage {
            input_tokens: self.input_tokens,
            output_tokens: self.output_tokens,
        }
    }
}

/// A chat completion endpoint.
#[allow(async_fn_in_trait)]
pub trait ChatModel {
    /// Send the whole conversation and return the generated text.
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply>;
}
