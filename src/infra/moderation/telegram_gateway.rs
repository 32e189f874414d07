// Telegram implementation of ChatGateway.
//
// Calls go straight to the Bot API: no retries, failures are returned to
// the caller as TransportError.

use crate::core::moderation::{ChatGateway, ModerationError};
use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{ChatId, MessageId, ReplyParameters, UserId};

pub struct TelegramGateway {
    bot: Bot,
}

impl TelegramGateway {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

fn transport_error(e: teloxide::RequestError) -> ModerationError {
    ModerationError::TransportError(e.to_string())
}

#[async_trait]
impl ChatGateway for TelegramGateway {
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<i32, ModerationError> {
        let sent = self
            .bot
            .send_message(ChatId(chat_id), text)
            .await
            .map_err(transport_error)?;
        Ok(sent.id.0)
    }

    async fn reply_text(
        &self,
        chat_id: i64,
        reply_to: i32,
        text: &str,
    ) -> Result<i32, ModerationError> {
        let sent = self
            .bot
            .send_message(ChatId(chat_id), text)
            .reply_parameters(ReplyParameters::new(MessageId(reply_to)))
            .await
            .map_err(transport_error)?;
        Ok(sent.id.0)
    }

    async fn delete_message(&self, chat_id: i64, message_id: i32) -> Result<(), ModerationError> {
        self.bot
            .delete_message(ChatId(chat_id), MessageId(message_id))
            .await
            .map_err(transport_error)?;
        Ok(())
    }

    async fn ban_member(&self, chat_id: i64, user_id: u64) -> Result<(), ModerationError> {
        self.bot
            .ban_chat_member(ChatId(chat_id), UserId(user_id))
            .await
            .map_err(transport_error)?;
        Ok(())
    }
}
