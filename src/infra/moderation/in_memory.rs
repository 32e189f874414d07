// In-memory implementation of PendingStore.
//
// Nothing here survives a restart: a pending message that was never decided
// on is simply forgotten.

use crate::core::moderation::{ModerationError, PendingKey, PendingMessage, PendingStore};
use async_trait::async_trait;
use dashmap::DashMap;

/// Identifies a prompt the bot sent to an administrator.
#[derive(Hash, Eq, PartialEq, Clone, Copy, Debug)]
struct PromptKey {
    admin_chat_id: i64,
    prompt_id: i32,
}

/// DashMap-backed pending store.
///
/// Different chats can be handled concurrently by the dispatcher, so every
/// map has to be safe to share across tasks.
pub struct InMemoryPendingStore {
    /// Original message -> what we know about it
    pending: DashMap<PendingKey, PendingMessage>,
    /// Admin user id -> message they were last asked about
    awaited: DashMap<u64, PendingKey>,
    /// Prompt sent to an admin -> message it asks about
    prompts: DashMap<PromptKey, PendingKey>,
}

impl InMemoryPendingStore {
    pub fn new() -> Self {
        Self {
            pending: DashMap::new(),
            awaited: DashMap::new(),
            prompts: DashMap::new(),
        }
    }

    /// Number of messages awaiting a decision.
    #[cfg(test)]
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }
}

impl Default for InMemoryPendingStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PendingStore for InMemoryPendingStore {
    async fn insert(&self, pending: PendingMessage) -> Result<(), ModerationError> {
        self.pending.insert(pending.key, pending);
        Ok(())
    }

    async fn get(&self, key: PendingKey) -> Result<Option<PendingMessage>, ModerationError> {
        Ok(self.pending.get(&key).map(|entry| entry.clone()))
    }

    async fn set_notice_id(&self, key: PendingKey, notice_id: i32) -> Result<(), ModerationError> {
        match self.pending.get_mut(&key) {
            Some(mut entry) => {
                entry.moderation_notice_id = Some(notice_id);
                Ok(())
            }
            None => Err(ModerationError::StorageError(format!(
                "no pending message {} in chat {}",
                key.message_id, key.chat_id
            ))),
        }
    }

    async fn remove(&self, key: PendingKey) -> Result<Option<PendingMessage>, ModerationError> {
        let removed = self.pending.remove(&key).map(|(_, msg)| msg);

        self.awaited.retain(|_, awaited| *awaited != key);
        self.prompts.retain(|_, target| *target != key);

        Ok(removed)
    }

    async fn set_awaited(&self, admin_id: u64, key: PendingKey) -> Result<(), ModerationError> {
        self.awaited.insert(admin_id, key);
        Ok(())
    }

    async fn awaited(&self, admin_id: u64) -> Result<Option<PendingKey>, ModerationError> {
        Ok(self.awaited.get(&admin_id).map(|entry| *entry))
    }

    async fn clear_awaited(&self, admin_id: u64) -> Result<(), ModerationError> {
        self.awaited.remove(&admin_id);
        Ok(())
    }

    async fn bind_prompt(
        &self,
        admin_chat_id: i64,
        prompt_id: i32,
        key: PendingKey,
    ) -> Result<(), ModerationError> {
        self.prompts.insert(
            PromptKey {
                admin_chat_id,
                prompt_id,
            },
            key,
        );
        Ok(())
    }

    async fn prompt_target(
        &self,
        admin_chat_id: i64,
        prompt_id: i32,
    ) -> Result<Option<PendingKey>, ModerationError> {
        let prompt = PromptKey {
            admin_chat_id,
            prompt_id,
        };
        Ok(self.prompts.get(&prompt).map(|entry| *entry))
    }
}
