// Ports the moderation service talks through.
//
// `PendingStore` holds the messages waiting for a decision.
// `ChatGateway` is the messaging transport.
// Both are implemented in infra; tests provide their own.

use super::moderation_models::{ModerationError, PendingKey, PendingMessage};
use async_trait::async_trait;

// ============================================================================
// STORAGE TRAIT (PORT)
// ============================================================================

/// Process-wide pending-message state.
///
/// Entries are keyed by the original message. Each administrator also has
/// an "awaited" reference (the last prompt they were sent) and a binding
/// from every prompt they received back to its entry, so a reply that
/// quotes an older prompt can still reach it.
#[async_trait]
pub trait PendingStore: Send + Sync {
    /// Add a message awaiting a decision.
    async fn insert(&self, pending: PendingMessage) -> Result<(), ModerationError>;

    async fn get(&self, key: PendingKey) -> Result<Option<PendingMessage>, ModerationError>;

    /// Record the moderation notice posted for a pending message.
    async fn set_notice_id(&self, key: PendingKey, notice_id: i32) -> Result<(), ModerationError>;

    /// Remove an entry along with every awaited reference and prompt
    /// binding that points at it.
    async fn remove(&self, key: PendingKey) -> Result<Option<PendingMessage>, ModerationError>;

    async fn set_awaited(&self, admin_id: u64, key: PendingKey) -> Result<(), ModerationError>;

    async fn awaited(&self, admin_id: u64) -> Result<Option<PendingKey>, ModerationError>;

    async fn clear_awaited(&self, admin_id: u64) -> Result<(), ModerationError>;

    /// Remember that `prompt_id` in `admin_chat_id` asks about `key`.
    async fn bind_prompt(
        &self,
        admin_chat_id: i64,
        prompt_id: i32,
        key: PendingKey,
    ) -> Result<(), ModerationError>;

    async fn prompt_target(
        &self,
        admin_chat_id: i64,
        prompt_id: i32,
    ) -> Result<Option<PendingKey>, ModerationError>;
}

// ============================================================================
// TRANSPORT TRAIT (PORT)
// ============================================================================

/// The subset of the messaging transport that moderation needs.
///
/// Message ids returned here are the ids of the messages the bot sent.
#[async_trait]
pub trait ChatGateway: Send + Sync {
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<i32, ModerationError>;

    async fn reply_text(
        &self,
        chat_id: i64,
        reply_to: i32,
        text: &str,
    ) -> Result<i32, ModerationError>;

    async fn delete_message(&self, chat_id: i64, message_id: i32) -> Result<(), ModerationError>;

    /// Remove a member from a chat and keep them out.
    async fn ban_member(&self, chat_id: i64, user_id: u64) -> Result<(), ModerationError>;
}

/// Telegram private chats share their id with the user.
pub fn private_chat_id(user_id: u64) -> i64 {
    user_id as i64
}
