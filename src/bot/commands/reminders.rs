use crate::bot::reply::delete_command;
use crate::bot::transport::{IncomingMessage, Transport};
use crate::error::Result;
use crate::services::reminder::ReminderScheduler;
use crate::utils::logging::log_command_success;

/// `/start`: creates, resumes or acknowledges the chat's reminder, then
/// removes the command message. Callers gate it to chat administrators.
pub async fn handle_start(
    transport: &dyn Transport,
    scheduler: &ReminderScheduler,
    msg: &IncomingMessage,
) -> Result<()> {
    let outcome = scheduler.start(msg.chat_id).await;
    delete_command(transport, msg).await;
    log_command_success("start", msg.sender, msg.chat_id, Some(&format!("{outcome:?}")));
    Ok(())
}

/// `/stop`: pauses an active reminder; a no-op otherwise.
pub async fn handle_stop(
    transport: &dyn Transport,
    scheduler: &ReminderScheduler,
    msg: &IncomingMessage,
) -> Result<()> {
    let outcome = scheduler.stop(msg.chat_id).await;
    delete_command(transport, msg).await;
    log_command_success("stop", msg.sender, msg.chat_id, Some(&format!("{outcome:?}")));
    Ok(())
}
