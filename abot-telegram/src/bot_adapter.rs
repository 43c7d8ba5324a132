//! Wraps teloxide::Bot and implements [`abot_core::Bot`]. Production code sends messages
//! via Telegram; tests substitute another Bot impl.

use abot_core::{Bot as CoreBot, Chat, Result};
use async_trait::async_trait;
use teloxide::{prelude::*, types::ChatId};

/// Thin wrapper around teloxide::Bot that implements abot-core's Bot trait.
pub struct TelegramBotAdapter {
    bot: teloxide::Bot,
}

impl TelegramBotAdapter {
    /// Creates an adapter from an existing teloxide Bot.
    pub fn new(bot: teloxide::Bot) -> Self {
        Self { bot }
    }

    /// Returns the underlying teloxide::Bot for direct API use when needed.
    pub fn inner(&self) -> &teloxide::Bot {
        &self.bot
    }
}

#[async_trait]
impl CoreBot for TelegramBotAdapter {
    async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
        self.bot
            .send_message(ChatId(chat.id), text.to_string())
            .await
            .map_err(|e| abot_core::AbotError::Bot(e.to_string()))?;
        Ok(())
    }
}
