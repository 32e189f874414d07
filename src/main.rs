// This is the entry point of the moderation bot.
//
// **Architecture Overview:**
// - `core/` = Business logic (platform-agnostic)
// - `infra/` = Implementations of core traits (stores, Telegram API)
// - `telegram/` = Telegram-specific adapters (commands, update routing)
//
// This file's job is to:
// 1. Load configuration
// 2. Initialize services (dependency injection)
// 3. Set up the Telegram dispatcher

// These attrs point each module declaration at a more descriptive root file
// so we don't end up with several mod.rs files that all look the same.
mod config;
#[path = "core/core_layer.rs"]
mod core;
#[path = "infra/infra_layer.rs"]
mod infra;
#[path = "telegram/telegram_layer.rs"]
mod telegram;

use crate::config::BotConfig;
use crate::core::activity::{ActivitySchedule, SystemClock};
use crate::core::moderation::ModerationService;
use crate::infra::moderation::{InMemoryPendingStore, TelegramGateway};
use crate::telegram::commands::Command;
use crate::telegram::{handlers, Data};
use std::sync::Arc;
use teloxide::error_handlers::LoggingErrorHandler;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging so we can see what's happening
    tracing_subscriber::fmt::init();

    // Load environment variables from .env file (if it exists)
    dotenv::dotenv().ok();

    let config = BotConfig::from_env()?;
    if config.admin_ids.is_empty() {
        tracing::warn!("ADMIN_IDS is empty: held messages will never be reviewed");
    }

    // ========================================================================
    // DEPENDENCY INJECTION
    // ========================================================================
    // This is the "composition root" where we wire everything together.

    let bot = Bot::new(config.telegram_token.clone());

    let moderation = Arc::new(ModerationService::new(
        InMemoryPendingStore::new(),
        TelegramGateway::new(bot.clone()),
        SystemClock,
        ActivitySchedule::evening_quiet_hours(config.timezone),
        config.admin_ids.iter().copied(),
    ));

    let data = Arc::new(Data { moderation });

    // ========================================================================
    // TELEGRAM DISPATCHER SETUP
    // ========================================================================

    if let Err(e) = bot.set_my_commands(Command::bot_commands()).await {
        tracing::warn!("Failed to register bot commands: {}", e);
    }

    tracing::info!(
        admins = config.admin_ids.len(),
        timezone = %config.timezone,
        "Bot is starting up..."
    );

    Dispatcher::builder(bot, handlers::schema())
        .dependencies(dptree::deps![data])
        .error_handler(LoggingErrorHandler::with_custom_text(
            "Error while handling update",
        ))
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    tracing::info!("Bot stopped");
    Ok(())
}
