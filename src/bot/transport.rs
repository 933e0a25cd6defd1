//! Messaging transport seam.
//!
//! The router and the reminder scheduler only see [`Transport`]. Production
//! wires in [`TelegramTransport`]; tests use an in-memory recorder.

use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashSet;
use teloxide::prelude::*;
use teloxide::types::{
    BotCommand, ChatId, InlineQueryResult, InlineQueryResultArticle, InputMessageContent,
    InputMessageContentText, MessageId, ParseMode, UserId,
};
use url::Url;

/// One inline answer entry. `body` is MarkdownV2.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlineArticle {
    pub id: String,
    pub title: String,
    pub body: String,
    pub thumb_url: String,
}

/// The parts of an inbound chat message the router acts on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IncomingMessage {
    pub chat_id: ChatId,
    pub message_id: MessageId,
    pub sender: Option<UserId>,
    pub reply_to: Option<MessageId>,
}

impl IncomingMessage {
    pub fn from_message(msg: &Message) -> Self {
        Self {
            chat_id: msg.chat.id,
            message_id: msg.id,
            sender: msg.from().map(|u| u.id),
            reply_to: msg.reply_to_message().map(|m| m.id),
        }
    }
}

#[async_trait]
pub trait Transport: Send + Sync {
    async fn send_message(
        &self,
        chat_id: ChatId,
        text: &str,
        reply_to: Option<MessageId>,
    ) -> Result<MessageId>;

    async fn delete_message(&self, chat_id: ChatId, message_id: MessageId) -> Result<()>;

    async fn forward_message(&self, from: ChatId, to: ChatId, message_id: MessageId) -> Result<()>;

    async fn pinned_message(&self, chat_id: ChatId) -> Result<Option<MessageId>>;

    async fn chat_administrators(&self, chat_id: ChatId) -> Result<HashSet<UserId>>;

    async fn answer_inline_query(&self, query_id: &str, articles: Vec<InlineArticle>) -> Result<()>;

    async fn register_commands(&self, commands: Vec<BotCommand>) -> Result<()>;
}

#[derive(Clone)]
pub struct TelegramTransport {
    bot: Bot,
}

impl TelegramTransport {
    pub fn new(bot: Bot) -> Self {
        Self { bot }
    }
}

#[async_trait]
impl Transport for TelegramTransport {
    async fn send_message(
        &self,
        chat_id: ChatId,
        text: &str,
        reply_to: Option<MessageId>,
    ) -> Result<MessageId> {
        let mut request = self.bot.send_message(chat_id, text);
        if let Some(parent) = reply_to {
            request = request.reply_to_message_id(parent);
        }
        let sent = request.await?;
        Ok(sent.id)
    }

    async fn delete_message(&self, chat_id: ChatId, message_id: MessageId) -> Result<()> {
        self.bot.delete_message(chat_id, message_id).await?;
        Ok(())
    }

    async fn forward_message(&self, from: ChatId, to: ChatId, message_id: MessageId) -> Result<()> {
        self.bot.forward_message(to, from, message_id).await?;
        Ok(())
    }

    async fn pinned_message(&self, chat_id: ChatId) -> Result<Option<MessageId>> {
        let chat = self.bot.get_chat(chat_id).await?;
        Ok(chat.pinned_message.map(|m| m.id))
    }

    async fn chat_administrators(&self, chat_id: ChatId) -> Result<HashSet<UserId>> {
        let admins = self.bot.get_chat_administrators(chat_id).await?;
        Ok(admins.into_iter().map(|member| member.user.id).collect())
    }

    async fn answer_inline_query(&self, query_id: &str, articles: Vec<InlineArticle>) -> Result<()> {
        let results: Vec<InlineQueryResult> = articles
            .into_iter()
            .map(|a| {
                let content = InputMessageContent::Text(
                    InputMessageContentText::new(a.body).parse_mode(ParseMode::MarkdownV2),
                );
                let mut article = InlineQueryResultArticle::new(a.id, a.title, content);
                match Url::parse(&a.thumb_url) {
                    Ok(url) => article = article.thumb_url(url),
                    Err(e) => tracing::warn!("Ignoring invalid thumbnail url '{}': {}", a.thumb_url, e),
                }
                InlineQueryResult::Article(article)
            })
            .collect();

        self.bot.answer_inline_query(query_id, results).await?;
        Ok(())
    }

    async fn register_commands(&self, commands: Vec<BotCommand>) -> Result<()> {
        self.bot.set_my_commands(commands).await?;
        Ok(())
    }
}
