use crate::bot::transport::{IncomingMessage, Transport};
use crate::error::Result;
use crate::utils::logging::log_transport_error;

/// Answers a command and removes the command message.
///
/// When the command was itself a reply, the answer is attached to the same
/// parent message, so `/legal` sent in reply to a question answers that
/// question.
pub async fn reply_to_message(transport: &dyn Transport, msg: &IncomingMessage, text: &str) -> Result<()> {
    transport.send_message(msg.chat_id, text, msg.reply_to).await?;
    delete_command(transport, msg).await;
    Ok(())
}

/// Deletes the triggering message. Fails quietly when the bot lacks rights.
pub async fn delete_command(transport: &dyn Transport, msg: &IncomingMessage) {
    if let Err(e) = transport.delete_message(msg.chat_id, msg.message_id).await {
        log_transport_error("delete command message", msg.chat_id, &e.to_string());
    }
}
