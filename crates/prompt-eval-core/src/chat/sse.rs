//! Incremental decoding of the Messages API event stream.
//!
//! Network chunks do not respect line or UTF-8 boundaries, so bytes are
//! buffered until a full line is available. Only `data:` lines carry
//! payloads; `event:` lines repeat the payload's own `type` and are ignored.

use serde::Deserialize;

use super::ChatReply;
use crate::error::{EvalError, Result};

/// Splits a byte stream into complete SSE `data:` payloads.
#[derive(Debug, Default)]
pub struct SseDecoder {
    buffer: Vec<u8>,
}

impl SseDecoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed a chunk and return the payloads of every line it completed.
    pub fn push(&mut self, chunk: &[u8]) -> Vec<String> {
        self.buffer.extend_from_slice(chunk);

        let mut payloads = Vec::new();
        while let Some(pos) = self.buffer.iter().position(|&b| b == b'\n') {
            let line: Vec<u8> = self.buffer.drain(..=pos).collect();
            if let Some(payload) = data_payload(&line) {
                payloads.push(payload);
            }
        }
        payloads
    }

    /// Flush a final line that was not newline-terminated.
    pub fn finish(&mut self) -> Option<String> {
        let rest = std::mem::take(&mut self.buffer);
        data_payload(&rest)
    }
}

fn data_payload(line: &[u8]) -> Option<String> {
    let line = String::from_utf8_lossy(line);
    let line = line.trim_end_matches(['\r', '\n']);
    line.strip_prefix("data:")
        .map(|data| data.trim_start().to_string())
        .filter(|data| !data.is_empty())
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum StreamEvent {
    MessageStart {
        message: StartMessage,
    },
    ContentBlockDelta {
        delta: BlockDelta,
    },
    MessageDelta {
        #[serde(default)]
        delta: MessageDeltaBody,
        #[serde(default)]
        usage: Option<Usage>,
    },
    Error {
        error: ErrorBody,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Deserialize)]
struct StartMessage {
    #[serde(default)]
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum BlockDelta {
    TextDelta {
        text: String,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Default, Deserialize)]
struct MessageDeltaBody {
    #[serde(default)]
    stop_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    #[serde(default)]
    input_tokens: Option<u64>,
    #[serde(default)]
    output_tokens: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    message: String,
}

/// Folds stream events into a [`ChatReply`].
#[derive(Debug, Default)]
pub struct StreamAccumulator {
    reply: ChatReply,
}

impl StreamAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one `data:` payload. Returns the text fragment it carried, if any.
    ///
    /// Payloads that are not JSON, or events this client does not use
    /// (pings, block start/stop), are skipped.
    pub fn apply(&mut self, payload: &str) -> Result<Option<String>> {
        let event: StreamEvent = match serde_json::from_str(payload) {
            Ok(event) => event,
            Err(e) => {
                tracing::debug!(error = %e, "skipping undecodable stream payload");
                return Ok(None);
            }
        };

        match event {
            StreamEvent::MessageStart { message } => {
                if let Some(tokens) = message.usage.and_then(|u| u.input_tokens) {
                    self.reply.input_tokens = tokens;
                }
                Ok(None)
            }
            StreamEvent::ContentBlockDelta {
                delta: BlockDelta::TextDelta { text },
            } => {
                self.reply.answer.push_str(&text);
                Ok(Some(text))
            }
            StreamEvent::MessageDelta { delta, usage } => {
                if let Some(tokens) = usage.and_then(|u| u.output_tokens) {
                    self.reply.output_tokens = tokens;
                }
                if delta.stop_reason.is_some() {
                    self.reply.stop_reason = delta.stop_reason;
                }
                Ok(None)
            }
            StreamEvent::Error { error } => Err(EvalError::InvalidResponse(format!(
                "stream error ({}): {}",
                error.kind, error.message
            ))),
            StreamEvent::ContentBlockDelta {
                delta: BlockDelta::Other,
            }
            | StreamEvent::Other => Ok(None),
        }
    }

    pub fn finish(self) -> ChatReply {
        self.reply
    }
}
