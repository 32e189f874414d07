// Telegram update routing.
//
// **The pattern is the same as for commands:**
// 1. Pull primitive data out of the teloxide Message
// 2. Call the core moderation service
// 3. Log the outcome
//
// Routing:
// - commands -> commands.rs
// - text in a private chat -> approval resolver (admins answering prompts)
// - text in a group -> moderation dispatcher

use crate::core::moderation::{DispatchOutcome, IncomingMessage};
use crate::telegram::commands::{self, Command};
use crate::telegram::{Data, Error};
use std::sync::Arc;
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;

/// Build the dptree handler for all updates the bot cares about.
pub fn schema() -> UpdateHandler<Error> {
    Update::filter_message()
        .branch(
            dptree::entry()
                .filter_command::<Command>()
                .endpoint(commands::handle_command),
        )
        .branch(
            dptree::filter_map(|msg: Message| route_of(&msg))
                .filter_map(|msg: Message| to_incoming(&msg))
                .branch(
                    dptree::filter(|route: Route| route == Route::Resolver)
                        .endpoint(handle_private_text),
                )
                .branch(
                    dptree::filter(|route: Route| route == Route::Dispatcher)
                        .endpoint(handle_group_text),
                ),
        )
}

/// Which part of the moderation flow a text message belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Admin answering a prompt in a private chat.
    Resolver,
    /// Message in the moderated group.
    Dispatcher,
}

/// Commands are never moderated; other chat kinds (channels) are ignored.
pub fn route(text: &str, is_private: bool, is_group: bool) -> Option<Route> {
    if text.starts_with('/') {
        return None;
    }
    if is_private {
        Some(Route::Resolver)
    } else if is_group {
        Some(Route::Dispatcher)
    } else {
        None
    }
}

fn route_of(msg: &Message) -> Option<Route> {
    route(
        msg.text()?,
        msg.chat.is_private(),
        msg.chat.is_group() || msg.chat.is_supergroup(),
    )
}

/// A message posted in the moderated group.
async fn handle_group_text(incoming: IncomingMessage, data: Arc<Data>) -> Result<(), Error> {
    let outcome = data.moderation.handle_incoming(&incoming).await?;

    if outcome == DispatchOutcome::PassedThrough {
        tracing::debug!(
            chat_id = incoming.chat_id,
            sender_id = incoming.sender_id,
            "Admin message passed through"
        );
    }

    Ok(())
}

/// A message sent to the bot directly, normally an admin answering a prompt.
async fn handle_private_text(incoming: IncomingMessage, data: Arc<Data>) -> Result<(), Error> {
    let outcome = data.moderation.handle_admin_reply(&incoming).await?;

    tracing::debug!(
        admin_id = incoming.sender_id,
        ?outcome,
        state = ?outcome.state(),
        "Admin reply handled"
    );

    Ok(())
}

/// Convert a plain text message. Media and messages without a sender are
/// not moderated.
fn to_incoming(msg: &Message) -> Option<IncomingMessage> {
    let text = msg.text()?;
    let user = msg.from.as_ref()?;

    Some(IncomingMessage {
        message_id: msg.id.0,
        chat_id: msg.chat.id.0,
        sender_id: user.id.0,
        sender_display_name: display_name(user.username.as_deref(), &user.first_name),
        text: text.to_string(),
        reply_to: msg.reply_to_message().map(|quoted| quoted.id.0),
    })
}

/// How a user is named in notices: @-less username, else first name.
fn display_name(username: Option<&str>, first_name: &str) -> String {
    match username {
        Some(username) if !username.is_empty() => username.to_string(),
        _ if !first_name.is_empty() => first_name.to_string(),
        _ => "Unknown".to_string(),
    }
}
