use super::HandlerError;
use crate::bot::commands::Command;
use crate::bot::router::{CommandRouter, Inbound};
use crate::bot::transport::IncomingMessage;
use std::sync::Arc;
use teloxide::prelude::*;

pub async fn command_handler(
    msg: Message,
    cmd: Command,
    router: Arc<CommandRouter>,
) -> Result<(), HandlerError> {
    router
        .route(Inbound::Command(IncomingMessage::from_message(&msg), cmd))
        .await;
    Ok(())
}

pub async fn membership_handler(msg: Message, router: Arc<CommandRouter>) -> Result<(), HandlerError> {
    tracing::debug!("Removing membership notice {} in chat {}", msg.id.0, msg.chat.id.0);
    router
        .route(Inbound::Membership(IncomingMessage::from_message(&msg)))
        .await;
    Ok(())
}

pub fn is_membership_notice(msg: &Message) -> bool {
    msg.new_chat_members().is_some() || msg.left_chat_member().is_some()
}
