use super::{ChatModel, ChatReply, ChatRequest, Message, SendOptions};
use crate::error::Result;

/// An in-memory conversation.
///
/// Messages accumulate in order; each successful [`ChatSession::send`]
/// appends the model's answer as an assistant message so the next call
/// continues the same conversation.
#[derive(Debug, Clone, Default)]
pub struct ChatSession {
    messages: Vec<Message>,
}

impl ChatSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user_message(&mut self, text: impl Into<String>) {
        self.messages.push(Message::user(text));
    }

    /// A trailing assistant message acts as a prefill: the model continues it.
    pub fn add_assistant_message(&mut self, text: impl Into<String>) {
        self.messages.push(Message::assistant(text));
    }

    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub async fn send<M: ChatModel>(
        &mut self,
        model: &M,
        user_input: Option<&str>,
        options: SendOptions,
    ) -> Result<ChatReply> {
        if let Some(text) = user_input {
            self.add_user_message(text);
        }

        let request = ChatRequest {
            messages: self.messages.clone(),
            options,
        };
        let reply = model.send(&request).await?;

        self.add_assistant_message(reply.answer.clone());
        Ok(reply)
    }
}
