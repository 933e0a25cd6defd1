use teloxide::types::{ChatId, UserId};
use tracing::{debug, error, info, warn};

fn user_label(user: Option<UserId>) -> String {
    user.map_or_else(|| "unknown".to_string(), |u| u.0.to_string())
}

/// Logs command start with consistent format
pub fn log_command_start(command: &str, user: Option<UserId>, chat_id: ChatId, details: Option<&str>) {
    match details {
        Some(d) => info!(
            "CMD_START: {} by {} in chat {} - {}",
            command, user_label(user), chat_id.0, d
        ),
        None => info!(
            "CMD_START: {} by {} in chat {}",
            command, user_label(user), chat_id.0
        ),
    }
}

/// Logs command completion with consistent format
pub fn log_command_success(command: &str, user: Option<UserId>, chat_id: ChatId, details: Option<&str>) {
    match details {
        Some(d) => info!(
            "CMD_SUCCESS: {} by {} in chat {} - {}",
            command, user_label(user), chat_id.0, d
        ),
        None => info!(
            "CMD_SUCCESS: {} by {} in chat {}",
            command, user_label(user), chat_id.0
        ),
    }
}

/// Logs command errors with consistent format
pub fn log_command_error(command: &str, user: Option<UserId>, chat_id: ChatId, error: &str) {
    error!(
        "CMD_ERROR: {} by {} in chat {} - {}",
        command, user_label(user), chat_id.0, error
    );
}

/// Logs a rejected restricted command. Never surfaced to the chat.
pub fn log_auth_denied(command: &str, user: Option<UserId>, chat_id: ChatId) {
    warn!(
        "AUTH_DENIED: non-admin {} attempted restricted {} in chat {}",
        user_label(user), command, chat_id.0
    );
}

/// Logs a failed transport call that was abandoned
pub fn log_transport_error(operation: &str, chat_id: ChatId, error: &str) {
    error!("TRANSPORT_ERROR: {} in chat {} failed: {}", operation, chat_id.0, error);
}

/// Logs reminder scheduler activity
pub fn log_reminder_event(event: &str, chat_id: ChatId, details: Option<&str>) {
    match details {
        Some(d) => info!("REMINDER: {} in chat {} - {}", event, chat_id.0, d),
        None => info!("REMINDER: {} in chat {}", event, chat_id.0),
    }
}

/// Logs inline search requests
pub fn log_inline_query(query: &str, hits: usize) {
    debug!("INLINE: '{}' -> {} results", query, hits);
}

/// Logs system events with consistent format
pub fn log_system_event(event: &str, details: Option<&str>) {
    match details {
        Some(d) => info!("SYSTEM: {} - {}", event, d),
        None => info!("SYSTEM: {}", event),
    }
}
