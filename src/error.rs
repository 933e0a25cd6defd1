/// Errors produced by the bot core.
///
/// Only `Configuration` and `Content` are fatal, and only at boot. Everything
/// that happens after the dispatcher is running is logged and swallowed at the
/// boundary closest to the transport call.
#[derive(Debug, thiserror::Error)]
pub enum BotError {
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("content error: {0}")]
    Content(String),

    #[error("authorization denied for user {user_id} in chat {chat_id}")]
    AuthorizationDenied { chat_id: i64, user_id: u64 },

    #[error("transport error: {0}")]
    Transport(String),
}

impl From<teloxide::RequestError> for BotError {
    fn from(err: teloxide::RequestError) -> Self {
        BotError::Transport(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, BotError>;
