// Moderation domain models - data structures for the approval pipeline.
//
// These are pure domain types with no Telegram dependencies.
// The Telegram layer converts its updates into these before calling core.

use thiserror::Error;

// ============================================================================
// ERRORS
// ============================================================================

#[derive(Debug, Error)]
pub enum ModerationError {
    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Transport error: {0}")]
    TransportError(String),
}

// ============================================================================
// MESSAGES
// ============================================================================

/// Identifies a message awaiting moderation.
/// Message ids are only unique within a chat, so the chat is part of the key.
#[derive(Hash, Eq, PartialEq, Clone, Copy, Debug)]
pub struct PendingKey {
    pub chat_id: i64,
    pub message_id: i32,
}

/// A user message held back until an administrator decides on it.
#[derive(Debug, Clone, PartialEq)]
pub struct PendingMessage {
    pub key: PendingKey,
    pub sender_id: u64,
    pub sender_display_name: String,
    pub text: String,
    /// The "sent to moderation" notice posted in the origin chat.
    pub moderation_notice_id: Option<i32>,
}

impl PendingMessage {
    pub fn origin_chat_id(&self) -> i64 {
        self.key.chat_id
    }
}

/// An inbound text message, stripped down to what moderation needs.
#[derive(Debug, Clone, PartialEq)]
pub struct IncomingMessage {
    pub message_id: i32,
    pub chat_id: i64,
    pub sender_id: u64,
    pub sender_display_name: String,
    pub text: String,
    /// Id of the message this one quotes, if any.
    pub reply_to: Option<i32>,
}

impl IncomingMessage {
    pub fn key(&self) -> PendingKey {
        PendingKey {
            chat_id: self.chat_id,
            message_id: self.message_id,
        }
    }
}

// ============================================================================
// DECISIONS
// ============================================================================

/// What an administrator decided about a pending message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Approve,
    Reject,
    Ban,
}

impl Decision {
    /// Parse an administrator reply. Case-insensitive, surrounding
    /// whitespace ignored.
    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_lowercase().as_str() {
            "да" => Some(Decision::Approve),
            "нет" => Some(Decision::Reject),
            "забанить" => Some(Decision::Ban),
            _ => None,
        }
    }
}

/// Whether an administrator has something to decide on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionState {
    Idle,
    AwaitingDecision,
}

/// Result of running an incoming group message through the dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub enum DispatchOutcome {
    /// Quiet hours - nothing was done.
    Discarded,
    /// Sender is an admin; the text was republished as-is.
    PassedThrough,
    /// Held for approval and sent to `notified_admins` administrators.
    Queued {
        key: PendingKey,
        notified_admins: usize,
    },
}

/// Result of an administrator reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionOutcome {
    Approved,
    Rejected,
    Banned,
    /// Reply was not a decision; the message is still pending.
    AwaitingDecision,
    /// There was nothing to decide on.
    NoPending,
    /// The replier is not an administrator.
    NotAuthorized,
}

impl ResolutionOutcome {
    /// State the replying administrator is left in.
    pub fn state(&self) -> DecisionState {
        match self {
            ResolutionOutcome::AwaitingDecision => DecisionState::AwaitingDecision,
            _ => DecisionState::Idle,
        }
    }
}

impl From<Decision> for ResolutionOutcome {
    fn from(decision: Decision) -> Self {
        match decision {
            Decision::Approve => ResolutionOutcome::Approved,
            Decision::Reject => ResolutionOutcome::Rejected,
            Decision::Ban => ResolutionOutcome::Banned,
        }
    }
}

// ============================================================================
// USER-FACING TEXT
// ============================================================================

pub const APPROVAL_HINT: &str = "Пожалуйста, ответьте 'Да', 'Нет' или 'Забанить'.";
pub const NO_PENDING_TEXT: &str = "Нет ожидающих сообщений для одобрения.";
pub const NOT_AUTHORIZED_TEXT: &str = "Только администраторы могут принимать решения по модерации.";
pub const REJECTED_TEXT: &str = "Сообщение запрещено.";

pub fn moderation_notice_text(sender: &str, text: &str) -> String {
    format!("Сообщение от {} отправлено на модерацию: {}", sender, text)
}

pub fn admin_prompt_text(sender: &str, text: &str) -> String {
    format!(
        "Сообщение от {}: {}\n\nРазрешить публикацию? (Ответьте 'Да', 'Нет' или 'Забанить')",
        sender, text
    )
}

pub fn approved_text(text: &str) -> String {
    format!("Сообщение разрешено: {}", text)
}

pub fn banned_text(sender: &str) -> String {
    format!("Пользователь {} был забанен.", sender)
}
