// Moderation service - core business logic for the approval pipeline.
//
// This service handles:
// - Quiet-hours gating of incoming group messages
// - Pass-through for administrators
// - Holding everyone else's messages and asking administrators about them
//
// The administrator side of the protocol lives in approval_resolver.rs.
// NO Telegram dependencies here - just pure domain logic over the ports.

use super::moderation_models::{
    admin_prompt_text, moderation_notice_text, DispatchOutcome, IncomingMessage, ModerationError,
    PendingMessage,
};
use super::moderation_ports::{private_chat_id, ChatGateway, PendingStore};
use crate::core::activity::{ActivitySchedule, Clock};
use std::collections::BTreeSet;

// ============================================================================
// CORE SERVICE
// ============================================================================

/// Intercepts group messages and routes administrator decisions.
pub struct ModerationService<S: PendingStore, G: ChatGateway, C: Clock> {
    pub(super) store: S,
    pub(super) gateway: G,
    clock: C,
    schedule: ActivitySchedule,
    // Ordered so admins are always notified in the same order.
    admins: BTreeSet<u64>,
}

impl<S: PendingStore, G: ChatGateway, C: Clock> ModerationService<S, G, C> {
    pub fn new(
        store: S,
        gateway: G,
        clock: C,
        schedule: ActivitySchedule,
        admins: impl IntoIterator<Item = u64>,
    ) -> Self {
        Self {
            store,
            gateway,
            clock,
            schedule,
            admins: admins.into_iter().collect(),
        }
    }

    pub fn is_admin(&self, user_id: u64) -> bool {
        self.admins.contains(&user_id)
    }

    /// Whether messages are being processed right now.
    pub fn is_active(&self) -> bool {
        self.schedule.is_active(&self.clock.now())
    }

    /// Whether `admin_id` currently has a message to decide on.
    #[cfg(test)]
    pub async fn decision_state(
        &self,
        admin_id: u64,
    ) -> Result<super::moderation_models::DecisionState, ModerationError> {
        use super::moderation_models::DecisionState;

        let Some(key) = self.store.awaited(admin_id).await? else {
            return Ok(DecisionState::Idle);
        };

        if self.store.get(key).await?.is_some() {
            Ok(DecisionState::AwaitingDecision)
        } else {
            Ok(DecisionState::Idle)
        }
    }

    /// Handle a text message posted in the moderated group.
    ///
    /// Transport errors are propagated as-is; anything stored before the
    /// failing call stays stored.
    pub async fn handle_incoming(
        &self,
        message: &IncomingMessage,
    ) -> Result<DispatchOutcome, ModerationError> {
        if !self.is_active() {
            tracing::debug!(
                chat_id = message.chat_id,
                message_id = message.message_id,
                "Quiet hours, ignoring message"
            );
            return Ok(DispatchOutcome::Discarded);
        }

        if self.is_admin(message.sender_id) {
            self.gateway
                .send_text(message.chat_id, &message.text)
                .await?;
            return Ok(DispatchOutcome::PassedThrough);
        }

        let key = message.key();
        self.store
            .insert(PendingMessage {
                key,
                sender_id: message.sender_id,
                sender_display_name: message.sender_display_name.clone(),
                text: message.text.clone(),
                moderation_notice_id: None,
            })
            .await?;

        let notice = moderation_notice_text(&message.sender_display_name, &message.text);
        let notice_id = self.gateway.send_text(message.chat_id, &notice).await?;
        self.store.set_notice_id(key, notice_id).await?;

        let prompt = admin_prompt_text(&message.sender_display_name, &message.text);
        let mut notified_admins = 0;
        for &admin_id in &self.admins {
            let admin_chat = private_chat_id(admin_id);
            let prompt_id = self.gateway.send_text(admin_chat, &prompt).await?;
            self.store.bind_prompt(admin_chat, prompt_id, key).await?;
            self.store.set_awaited(admin_id, key).await?;
            notified_admins += 1;
        }

        tracing::info!(
            chat_id = key.chat_id,
            message_id = key.message_id,
            sender_id = message.sender_id,
            notified_admins,
            "Message held for moderation"
        );

        Ok(DispatchOutcome::Queued {
            key,
            notified_admins,
        })
    }
}

// ============================================================================
// TESTS
// ============================================================================
