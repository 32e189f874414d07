// Telegram bot commands.
//
// These don't touch moderation at all; they help admins find the ids they
// need to put into the configuration.

use crate::telegram::Error;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

#[derive(BotCommands, Clone, Debug, PartialEq)]
#[command(rename_rule = "snake_case", description = "Доступные команды:")]
pub enum Command {
    /// Report the id of the current chat
    #[command(description = "показать Chat ID этой группы.")]
    GetChatId,
    /// Report the id of the calling user
    #[command(description = "показать ваш User ID.")]
    GetUserId,
}

pub fn chat_id_text(chat_id: i64) -> String {
    format!("Chat ID этой группы: {}", chat_id)
}

pub fn user_id_text(user_id: u64) -> String {
    format!("Ваш User ID: {}", user_id)
}

pub async fn handle_command(bot: Bot, msg: Message, cmd: Command) -> Result<(), Error> {
    let text = match cmd {
        Command::GetChatId => chat_id_text(msg.chat.id.0),
        Command::GetUserId => match msg.from.as_ref() {
            Some(user) => user_id_text(user.id.0),
            // Channel posts have no sender
            None => return Ok(()),
        },
    };

    bot.send_message(msg.chat.id, text).await?;
    Ok(())
}
