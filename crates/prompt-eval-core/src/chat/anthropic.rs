//! Anthropic Messages API client.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use super::sse::{SseDecoder, StreamAccumulator};
use super::{ChatModel, ChatReply, ChatRequest, Message};
use crate::error::{EvalError, Result};

pub const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Receives each text fragment of a streamed reply as it arrives.
pub type DeltaSink = Arc<dyn Fn(&str) + Send + Sync>;

#[derive(Clone)]
pub struct AnthropicClient {
    http: reqwest::Client,
    api_key: String,
    api_base: String,
    model: String,
    on_delta: Option<DeltaSink>,
}

impl fmt::Debug for AnthropicClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AnthropicClient")
            .field("api_base", &self.api_base)
            .field("model", &self.model)
            .field("streaming_sink", &self.on_delta.is_some())
            .finish_non_exhaustive()
    }
}

#[derive(Serialize)]
struct MessagesBody<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: &'a [Message],
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    #[serde(skip_serializing_if = "<[String]>::is_empty")]
    stop_sequences: &'a [String],
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    stream: bool,
}

#[derive(Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
    #[serde(default)]
    usage: ResponseUsage,
    #[serde(default)]
    stop_reason: Option<String>,
}

#[derive(Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Default, Deserialize)]
struct ResponseUsage {
    #[serde(default)]
    input_tokens: u64,
    #[serde(default)]
    output_tokens: u64,
}

impl AnthropicClient {
    /// Create a client for `model`. An empty key is rejected up front.
    pub fn new(
        api_key: impl Into<String>,
        api_base: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(EvalError::MissingApiKey);
        }

        Ok(Self {
            http: reqwest::Client::new(),
            api_key,
            api_base: api_base.into().trim_end_matches('/').to_string(),
            model: model.into(),
            on_delta: None,
        })
    }

    /// Same credentials and endpoint, different model.
    pub fn with_model(&self, model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..self.clone()
        }
    }

    pub fn with_delta_sink(mut self, sink: DeltaSink) -> Self {
        self.on_delta = Some(sink);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn post(&self, request: &ChatRequest) -> Result<reqwest::Response> {
        let options = &request.options;
        let body = MessagesBody {
            model: &self.model,
            max_tokens: options.max_tokens,
            messages: &request.messages,
            system: options.system.as_deref(),
            stop_sequences: &options.stop_sequences,
            stream: options.stream,
        };

        let response = self
            .http
            .post(format!("{}/v1/messages", self.api_base))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(EvalError::Api { status, body });
        }

        Ok(response)
    }

    async fn read_buffered(response: reqwest::Response) -> Result<ChatReply> {
        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(|e| EvalError::InvalidResponse(format!("messages response: {}", e)))?;

        let answer = parsed
            .content
            .into_iter()
            .filter(|block| block.kind == "text")
            .filter_map(|block| block.text)
            .collect::<String>();

        Ok(ChatReply {
            answer,
            input_tokens: parsed.usage.input_tokens,
            output_tokens: parsed.usage.output_tokens,
            stop_reason: parsed.stop_reason,
        })
    }

    async fn read_stream(&self, mut response: reqwest::Response) -> Result<ChatReply> {
        let mut decoder = SseDecoder::new();
        let mut acc = StreamAccumulator::new();

        while let Some(chunk) = response.chunk().await? {
            for payload in decoder.push(&chunk) {
                self.apply_payload(&mut acc, &payload)?;
            }
        }
        if let Some(payload) = decoder.finish() {
            self.apply_payload(&mut acc, &payload)?;
        }

        Ok(acc.finish())
    }

    fn apply_payload(&self, acc: &mut StreamAccumulator, payload: &str) -> Result<()> {
        if let Some(text) = acc.apply(payload)? {
            if let Some(sink) = &self.on_delta {
                sink(&text);
            }
        }
        Ok(())
    }
}

impl ChatModel for AnthropicClient {
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply> {
        let start = Instant::now();
        tracing::debug!(
            model = %self.model,
            messages = request.messages.len(),
            max_tokens = request.options.max_tokens,
            stream = request.options.stream,
            "sending chat request"
        );

        let response = self.post(request).await?;
        let reply = if request.options.stream {
            self.read_stream(response).await?
        } else {
            Self::read_buffered(response).await?
        };

        tracing::debug!(
            model = %self.model,
            input_tokens = reply.input_tokens,
            output_tokens = reply.output_tokens,
            answer_chars = reply.answer.len(),
            elapsed = ?start.elapsed(),
            "chat reply received"
        );
        Ok(reply)
    }
}
