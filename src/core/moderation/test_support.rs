// Shared fixtures for moderation tests: a recording gateway, a fixed clock
// and a few message builders.

use super::moderation_models::{IncomingMessage, ModerationError};
use super::moderation_ports::{private_chat_id, ChatGateway};
use super::moderation_service::ModerationService;
use crate::core::activity::{ActivitySchedule, Clock};
use crate::infra::moderation::InMemoryPendingStore;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::Mutex;

pub const ADMIN: u64 = 1001;
pub const OTHER_ADMIN: u64 = 2002;

/// Monday noon in Moscow.
pub const ACTIVE_TIME: &str = "2024-06-03T12:00:00+03:00";
/// Tuesday 22:00 in Moscow.
pub const QUIET_TIME: &str = "2024-06-04T22:00:00+03:00";

/// First id handed out by `RecordingGateway`.
pub const FIRST_SENT_ID: i32 = 1000;

pub type TestService = ModerationService<InMemoryPendingStore, RecordingGateway, FixedClock>;

#[derive(Debug, Clone, PartialEq)]
pub enum GatewayCall {
    Send {
        chat_id: i64,
        text: String,
    },
    Reply {
        chat_id: i64,
        reply_to: i32,
        text: String,
    },
    Delete {
        chat_id: i64,
        message_id: i32,
    },
    Ban {
        chat_id: i64,
        user_id: u64,
    },
}

/// Gateway that records every call and hands out increasing message ids.
pub struct RecordingGateway {
    calls: Mutex<Vec<GatewayCall>>,
    next_id: AtomicI32,
    fail_sends: AtomicBool,
    yield_each_call: AtomicBool,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self {
            calls: Mutex::new(Vec::new()),
            next_id: AtomicI32::new(FIRST_SENT_ID),
            fail_sends: AtomicBool::new(false),
            yield_each_call: AtomicBool::new(false),
        }
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Return the recorded calls and start over.
    pub fn take_calls(&self) -> Vec<GatewayCall> {
        std::mem::take(&mut *self.calls.lock().unwrap())
    }

    pub fn fail_sends(&self) {
        self.fail_sends.store(true, Ordering::SeqCst);
    }

    /// Hand control back to the runtime at the start of every call, so
    /// concurrent handlers interleave the way they do over the network.
    pub fn yield_each_call(&self) {
        self.yield_each_call.store(true, Ordering::SeqCst);
    }

    async fn pause(&self) {
        if self.yield_each_call.load(Ordering::SeqCst) {
            tokio::task::yield_now().await;
        }
    }

    fn record(&self, call: GatewayCall) {
        self.calls.lock().unwrap().push(call);
    }

    fn next_message_id(&self) -> Result<i32, ModerationError> {
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(ModerationError::TransportError("send failed".to_string()));
        }
        Ok(self.next_id.fetch_add(1, Ordering::SeqCst))
    }
}

#[async_trait]
impl ChatGateway for RecordingGateway {
    async fn send_text(&self, chat_id: i64, text: &str) -> Result<i32, ModerationError> {
        self.pause().await;
        let id = self.next_message_id()?;
        self.record(GatewayCall::Send {
            chat_id,
            text: text.to_string(),
        });
        Ok(id)
    }

    async fn reply_text(
        &self,
        chat_id: i64,
        reply_to: i32,
        text: &str,
    ) -> Result<i32, ModerationError> {
        self.pause().await;
        let id = self.next_message_id()?;
        self.record(GatewayCall::Reply {
            chat_id,
            reply_to,
            text: text.to_string(),
        });
        Ok(id)
    }

    async fn delete_message(&self, chat_id: i64, message_id: i32) -> Result<(), ModerationError> {
        self.pause().await;
        self.record(GatewayCall::Delete {
            chat_id,
            message_id,
        });
        Ok(())
    }

    async fn ban_member(&self, chat_id: i64, user_id: u64) -> Result<(), ModerationError> {
        self.pause().await;
        self.record(GatewayCall::Ban { chat_id, user_id });
        Ok(())
    }
}

pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// A service with two admins whose clock is frozen at `rfc3339`.
pub fn service_at(rfc3339: &str) -> TestService {
    let now = DateTime::parse_from_rfc3339(rfc3339)
        .unwrap()
        .with_timezone(&Utc);

    ModerationService::new(
        InMemoryPendingStore::new(),
        RecordingGateway::new(),
        FixedClock(now),
        ActivitySchedule::default(),
        [ADMIN, OTHER_ADMIN],
    )
}

pub fn group_message(chat_id: i64, message_id: i32, sender_id: u64, text: &str) -> IncomingMessage {
    IncomingMessage {
        message_id,
        chat_id,
        sender_id,
        sender_display_name: format!("user{}", sender_id),
        text: text.to_string(),
        reply_to: None,
    }
}

/// A message sent to the bot in `sender_id`'s private chat.
pub fn private_message(
    sender_id: u64,
    message_id: i32,
    text: &str,
    reply_to: Option<i32>,
) -> IncomingMessage {
    IncomingMessage {
        message_id,
        chat_id: private_chat_id(sender_id),
        sender_id,
        sender_display_name: format!("user{}", sender_id),
        text: text.to_string(),
        reply_to,
    }
}
