//! Minimal messaging surface the dispatcher depends on

use async_trait::async_trait;
use teloxide::prelude::*;

use super::commands::Command;
use crate::errors::BotError;

/// Capability to send a plain text message to a chat
#[async_trait]
pub trait MessageSender: Send + Sync {
    async fn send_text(&self, chat_id: ChatId, text: String) -> Result<(), BotError>;
}

#[async_trait]
impl MessageSender for Bot {
    async fn send_text(&self, chat_id: ChatId, text: String) -> Result<(), BotError> {
        self.send_message(chat_id, text).await?;
        Ok(())
    }
}

/// A text message received from a chat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundEvent {
    pub chat_id: ChatId,
    pub text: String,
    /// Set when the text is a `/command`
    pub command: Option<Command>,
    /// Telegram `language_code` of the sender
    pub language_code: Option<String>,
}

impl InboundEvent {
    pub fn new(chat_id: ChatId, text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            chat_id,
            command: Command::parse(&text),
            text,
            language_code: None,
        }
    }

    pub fn with_language(mut self, language_code: Option<String>) -> Self {
        self.language_code = language_code;
        self
    }

    /// Text messages only; other message kinds yield `None`
    pub fn from_message(msg: &Message) -> Option<Self> {
        let text = msg.text()?;
        let language_code = msg
            .from
            .as_ref()
            .and_then(|user| user.language_code.clone());

        Some(Self::new(msg.chat.id, text).with_language(language_code))
    }

    pub fn is_command(&self) -> bool {
        self.command.is_some()
    }

    pub fn language(&self) -> Option<&str> {
        self.language_code.as_deref()
    }
}
