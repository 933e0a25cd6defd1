use crate::bot::transport::{IncomingMessage, Transport};
use crate::error::{BotError, Result};
use crate::utils::logging::log_auth_denied;
use std::future::Future;

/// Checks that the sender of `msg` is an administrator of its chat.
pub async fn authorize(transport: &dyn Transport, msg: &IncomingMessage) -> Result<()> {
    let denied = || BotError::AuthorizationDenied {
        chat_id: msg.chat_id.0,
        user_id: msg.sender.map_or(0, |u| u.0),
    };

    let user = msg.sender.ok_or_else(denied)?;
    let admins = transport.chat_administrators(msg.chat_id).await?;

    if admins.contains(&user) {
        Ok(())
    } else {
        Err(denied())
    }
}

/// Runs `handler` only for chat administrators.
///
/// Non-admins are rejected silently: the attempt is logged, nothing is sent
/// and `Ok(())` is returned, so regular members cannot probe for admin-only
/// commands.
pub async fn restricted<F, Fut>(
    transport: &dyn Transport,
    msg: &IncomingMessage,
    command: &str,
    handler: F,
) -> Result<()>
where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<()>>,
{
    match authorize(transport, msg).await {
        Ok(()) => {
            tracing::info!("Restricted command {} permitted in chat {}", command, msg.chat_id.0);
            handler().await
        }
        Err(BotError::AuthorizationDenied { .. }) => {
            log_auth_denied(command, msg.sender, msg.chat_id);
            Ok(())
        }
        Err(e) => Err(e),
    }
}
