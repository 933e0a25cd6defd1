use crate::bot::auth::restricted;
use crate::bot::commands::{guide, reminders, Command};
use crate::bot::reply::reply_to_message;
use crate::bot::transport::{InlineArticle, IncomingMessage, Transport};
use crate::content::Guidebook;
use crate::error::Result;
use crate::services::reminder::ReminderScheduler;
use crate::services::search::KnowledgeSearch;
use crate::utils::logging::{log_command_error, log_command_start, log_inline_query, log_transport_error};
use crate::utils::markdown::escape_markdown;
use std::sync::Arc;

/// An inbound update, already classified by kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Inbound {
    Command(IncomingMessage, Command),
    Membership(IncomingMessage),
    InlineQuery { id: String, query: String },
    Other,
}

/// Dispatches classified updates to the scheduler, the search engine and the
/// static reply tables.
pub struct CommandRouter {
    transport: Arc<dyn Transport>,
    scheduler: Arc<ReminderScheduler>,
    search: KnowledgeSearch,
    guidebook: Arc<Guidebook>,
    thumb_url: String,
}

impl CommandRouter {
    pub fn new(
        transport: Arc<dyn Transport>,
        scheduler: Arc<ReminderScheduler>,
        search: KnowledgeSearch,
        guidebook: Arc<Guidebook>,
        thumb_url: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            scheduler,
            search,
            guidebook,
            thumb_url: thumb_url.into(),
        }
    }

    /// Handles one update. Transport failures end here: they are logged and
    /// the update is dropped.
    pub async fn route(&self, inbound: Inbound) {
        match inbound {
            Inbound::Command(msg, cmd) => {
                let name = cmd.name();
                if let Err(e) = self.handle_command(&msg, cmd).await {
                    log_command_error(name, msg.sender, msg.chat_id, &e.to_string());
                }
            }
            Inbound::Membership(msg) => {
                if let Err(e) = self.handle_membership(&msg).await {
                    log_transport_error("delete membership notice", msg.chat_id, &e.to_string());
                }
            }
            Inbound::InlineQuery { id, query } => {
                if let Err(e) = self.handle_inline_query(&id, &query).await {
                    tracing::error!("TRANSPORT_ERROR: answer inline query {} failed: {}", id, e);
                }
            }
            Inbound::Other => {}
        }
    }

    pub async fn handle_command(&self, msg: &IncomingMessage, cmd: Command) -> Result<()> {
        log_command_start(cmd.name(), msg.sender, msg.chat_id, None);
        let transport = self.transport.as_ref();

        if cmd.is_restricted() {
            return restricted(transport, msg, cmd.name(), || async {
                match cmd {
                    Command::Start => reminders::handle_start(transport, &self.scheduler, msg).await,
                    Command::Stop => reminders::handle_stop(transport, &self.scheduler, msg).await,
                    _ => Ok(()),
                }
            })
            .await;
        }

        match guide::reply_for(&self.guidebook, &cmd) {
            Some(text) => reply_to_message(transport, msg, &text).await,
            None => Ok(()),
        }
    }

    /// Join and leave notices are removed to keep the chat history clean.
    pub async fn handle_membership(&self, msg: &IncomingMessage) -> Result<()> {
        self.transport.delete_message(msg.chat_id, msg.message_id).await
    }

    pub async fn handle_inline_query(&self, query_id: &str, query: &str) -> Result<()> {
        let articles = self.inline_articles(query);
        log_inline_query(query, articles.len());
        self.transport.answer_inline_query(query_id, articles).await
    }

    pub fn inline_articles(&self, query: &str) -> Vec<InlineArticle> {
        self.search
            .search(query)
            .into_iter()
            .map(|hit| InlineArticle {
                id: hit.article.id.clone(),
                title: hit.article.title.clone(),
                body: format!(
                    "*{}*\n\n{}",
                    escape_markdown(&hit.article.title),
                    escape_markdown(&hit.article.body)
                ),
                thumb_url: self.thumb_url.clone(),
            })
            .collect()
    }
}

