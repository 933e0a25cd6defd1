#![allow(dead_code, clippy::unwrap_used)]

use async_trait::async_trait;
use refugee_help_bot::bot::transport::{InlineArticle, Transport};
use refugee_help_bot::error::{BotError, Result};
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicI32, AtomicU64, Ordering};
use std::sync::Mutex;
use teloxide::types::{BotCommand, ChatId, MessageId, UserId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Send {
        chat_id: ChatId,
        text: String,
        reply_to: Option<MessageId>,
    },
    Delete {
        chat_id: ChatId,
        message_id: MessageId,
    },
    Forward {
        from: ChatId,
        to: ChatId,
        message_id: MessageId,
    },
    Answer {
        query_id: String,
        articles: Vec<InlineArticle>,
    },
    Register(Vec<String>),
}

/// In-memory transport that records every call.
#[derive(Default)]
pub struct RecordingTransport {
    calls: Mutex<Vec<Call>>,
    admins: Mutex<HashSet<UserId>>,
    pinned: Mutex<Option<MessageId>>,
    next_id: AtomicI32,
    pub fail_sends: AtomicBool,
    pub fail_deletes: AtomicBool,
    pub fail_admin_lookup: AtomicBool,
    /// Seconds every `send_message` waits before it completes.
    pub send_delay_secs: AtomicU64,
}

impl RecordingTransport {
    pub fn with_admins(admins: &[u64]) -> Self {
        let transport = Self::default();
        transport
            .admins
            .lock()
            .unwrap()
            .extend(admins.iter().map(|id| UserId(*id)));
        transport
    }

    pub fn set_pinned(&self, message_id: Option<MessageId>) {
        *self.pinned.lock().unwrap() = message_id;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.calls.lock().unwrap().clear();
    }

    /// Texts of all sent messages, in order.
    pub fn sent_texts(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Send { text, .. } => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn count_sent(&self, text: &str) -> usize {
        self.sent_texts().iter().filter(|t| t.as_str() == text).count()
    }

    pub fn forwards(&self) -> usize {
        self.calls()
            .iter()
            .filter(|c| matches!(c, Call::Forward { .. }))
            .count()
    }

    pub fn deleted(&self) -> Vec<MessageId> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                Call::Delete { message_id, .. } => Some(message_id),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: Call) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl Transport for RecordingTransport {
    async fn send_message(
        &self,
        chat_id: ChatId,
        text: &str,
        reply_to: Option<MessageId>,
    ) -> Result<MessageId> {
        let delay = self.send_delay_secs.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(std::time::Duration::from_secs(delay)).await;
        }
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(BotError::Transport("send failed".into()));
        }
        self.record(Call::Send {
            chat_id,
            text: text.to_string(),
            reply_to,
        });
        Ok(MessageId(1000 + self.next_id.fetch_add(1, Ordering::SeqCst)))
    }

    async fn delete_message(&self, chat_id: ChatId, message_id: MessageId) -> Result<()> {
        if self.fail_deletes.load(Ordering::SeqCst) {
            return Err(BotError::Transport("message can't be deleted".into()));
        }
        self.record(Call::Delete { chat_id, message_id });
        Ok(())
    }

    async fn forward_message(&self, from: ChatId, to: ChatId, message_id: MessageId) -> Result<()> {
        if self.fail_sends.load(Ordering::SeqCst) {
            return Err(BotError::Transport("forward failed".into()));
        }
        self.record(Call::Forward { from, to, message_id });
        Ok(())
    }

    async fn pinned_message(&self, _chat_id: ChatId) -> Result<Option<MessageId>> {
        Ok(*self.pinned.lock().unwrap())
    }

    async fn chat_administrators(&self, _chat_id: ChatId) -> Result<HashSet<UserId>> {
        if self.fail_admin_lookup.load(Ordering::SeqCst) {
            return Err(BotError::Transport("getChatAdministrators failed".into()));
        }
        Ok(self.admins.lock().unwrap().clone())
    }

    async fn answer_inline_query(&self, query_id: &str, articles: Vec<InlineArticle>) -> Result<()> {
        self.record(Call::Answer {
            query_id: query_id.to_string(),
            articles,
        });
        Ok(())
    }

    async fn register_commands(&self, commands: Vec<BotCommand>) -> Result<()> {
        self.record(Call::Register(
            commands.into_iter().map(|c| c.command).collect(),
        ));
        Ok(())
    }
}
