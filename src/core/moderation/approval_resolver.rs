// Administrator side of the moderation protocol.
//
// An admin answers a prompt in their private chat with "Да", "Нет" or
// "Забанить". The answer applies to the prompt they quoted, or to the last
// prompt they were sent. The first decision wins; the entry is gone for
// every other admin afterwards.

use super::moderation_models::{
    approved_text, banned_text, Decision, IncomingMessage, ModerationError, PendingKey,
    PendingMessage, ResolutionOutcome, APPROVAL_HINT, NOT_AUTHORIZED_TEXT, NO_PENDING_TEXT,
    REJECTED_TEXT,
};
use super::moderation_ports::{ChatGateway, PendingStore};
use super::moderation_service::ModerationService;
use crate::core::activity::Clock;

impl<S: PendingStore, G: ChatGateway, C: Clock> ModerationService<S, G, C> {
    /// Handle a reply from an administrator.
    ///
    /// Quiet hours do not apply here. Only the replier's own chat is
    /// answered unless a decision is reached, in which case the origin
    /// chat gets the result and the moderation notice is deleted.
    pub async fn handle_admin_reply(
        &self,
        reply: &IncomingMessage,
    ) -> Result<ResolutionOutcome, ModerationError> {
        if !self.is_admin(reply.sender_id) {
            tracing::warn!(
                user_id = reply.sender_id,
                "Non-admin tried to answer a moderation prompt"
            );
            self.answer(reply, NOT_AUTHORIZED_TEXT).await?;
            return Ok(ResolutionOutcome::NotAuthorized);
        }

        let Some(target) = self.find_target(reply).await? else {
            self.answer(reply, NO_PENDING_TEXT).await?;
            return Ok(ResolutionOutcome::NoPending);
        };

        let Some(decision) = Decision::parse(&reply.text) else {
            self.answer(reply, APPROVAL_HINT).await?;
            return Ok(ResolutionOutcome::AwaitingDecision);
        };

        // Claim the entry before any side effect. Only one concurrent
        // reply gets it back; the others see it as already resolved.
        let Some(pending) = self.store.remove(target.key).await? else {
            self.answer(reply, NO_PENDING_TEXT).await?;
            return Ok(ResolutionOutcome::NoPending);
        };

        self.apply_decision(decision, &pending, reply.sender_id)
            .await?;

        if let Some(notice_id) = pending.moderation_notice_id {
            self.gateway
                .delete_message(pending.origin_chat_id(), notice_id)
                .await?;
        }

        Ok(decision.into())
    }

    /// The pending message this reply is about, if it still exists.
    async fn find_target(
        &self,
        reply: &IncomingMessage,
    ) -> Result<Option<PendingMessage>, ModerationError> {
        let quoted = match reply.reply_to {
            Some(prompt_id) => self.store.prompt_target(reply.chat_id, prompt_id).await?,
            None => None,
        };

        let key: PendingKey = match quoted {
            Some(key) => key,
            None => match self.store.awaited(reply.sender_id).await? {
                Some(key) => key,
                None => return Ok(None),
            },
        };

        let pending = self.store.get(key).await?;
        if pending.is_none() && quoted.is_none() {
            // Stale reference to an entry another admin already resolved.
            self.store.clear_awaited(reply.sender_id).await?;
        }
        Ok(pending)
    }

    async fn apply_decision(
        &self,
        decision: Decision,
        pending: &PendingMessage,
        admin_id: u64,
    ) -> Result<(), ModerationError> {
        let chat_id = pending.origin_chat_id();

        match decision {
            Decision::Approve => {
                self.gateway
                    .send_text(chat_id, &approved_text(&pending.text))
                    .await?;
                tracing::info!(
                    chat_id,
                    admin_id,
                    sender = %pending.sender_display_name,
                    "Message approved"
                );
            }
            Decision::Reject => {
                self.gateway.send_text(chat_id, REJECTED_TEXT).await?;
                tracing::info!(
                    chat_id,
                    admin_id,
                    sender = %pending.sender_display_name,
                    "Message rejected"
                );
            }
            Decision::Ban => {
                self.gateway.ban_member(chat_id, pending.sender_id).await?;
                self.gateway
                    .send_text(chat_id, &banned_text(&pending.sender_display_name))
                    .await?;
                tracing::info!(
                    chat_id,
                    admin_id,
                    user_id = pending.sender_id,
                    sender = %pending.sender_display_name,
                    "User banned"
                );
            }
        }

        Ok(())
    }

    async fn answer(&self, reply: &IncomingMessage, text: &str) -> Result<(), ModerationError> {
        self.gateway
            .reply_text(reply.chat_id, reply.message_id, text)
            .await?;
        Ok(())
    }
}

// ============================================================================
// TESTS
// ============================================================================
