// Telegram layer - commands and update handlers.

use crate::core::activity::SystemClock;
use crate::core::moderation::ModerationService;
use crate::infra::moderation::{InMemoryPendingStore, TelegramGateway};
use std::sync::Arc;

pub mod commands;
pub mod handlers;

pub type Error = Box<dyn std::error::Error + Send + Sync>;

/// The moderation service as wired up in production.
pub type Moderation = ModerationService<InMemoryPendingStore, TelegramGateway, SystemClock>;

/// Data that's shared across all handlers.
pub struct Data {
    pub moderation: Arc<Moderation>,
}
