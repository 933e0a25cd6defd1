use crate::error::{BotError, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_REMINDER_MESSAGE: &str = "I WILL POST PINNED MESSAGE HERE";
const DEFAULT_REMINDER_INTERVAL_SECS: u64 = 30 * 60;
const DEFAULT_THUMB_URL: &str =
    "https://upload.wikimedia.org/wikipedia/commons/thumb/4/49/Flag_of_Ukraine.svg/2560px-Flag_of_Ukraine.svg.png";
const DEFAULT_GUIDEBOOK_PATH: &str = "./content/guidebook.json";

/// How updates reach the bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    Polling,
    Webhook,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub telegram_bot_token: String,
    pub app_name: Option<String>,
    pub mode: UpdateMode,
    pub webhook_port: u16,
    pub http_port: u16,
    pub reminder_message: String,
    pub reminder_interval: Duration,
    pub thumb_url: String,
    pub guidebook_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let token = env::var("TELEGRAM_BOT_TOKEN")
            .map_err(|_| config_error("TELEGRAM_BOT_TOKEN must be set"))?;

        if token.trim().is_empty() {
            return Err(config_error("TELEGRAM_BOT_TOKEN must be set"));
        }

        let app_name = non_empty_var("APP_NAME");

        // APP_NAME=TESTING has always meant "run locally with polling".
        let mode = if app_name.as_deref() == Some("TESTING") {
            UpdateMode::Polling
        } else {
            match non_empty_var("BOT_MODE").map(|m| m.trim().to_lowercase()).as_deref() {
                None | Some("polling") => UpdateMode::Polling,
                Some("webhook") => UpdateMode::Webhook,
                Some(_) => return Err(config_error("BOT_MODE must be 'polling' or 'webhook'")),
            }
        };

        if mode == UpdateMode::Webhook && app_name.is_none() {
            return Err(config_error("APP_NAME must be set in webhook mode"));
        }

        let webhook_port = parse_port("PORT", 5000)?;
        let http_port = parse_port("HTTP_PORT", 3000)?;

        let reminder_message = non_empty_var("REMINDER_MESSAGE")
            .unwrap_or_else(|| DEFAULT_REMINDER_MESSAGE.to_string());

        let interval_secs = match non_empty_var("REMINDER_INTERVAL") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .map_err(|_| config_error("Invalid REMINDER_INTERVAL"))?,
            None => DEFAULT_REMINDER_INTERVAL_SECS,
        };
        if interval_secs == 0 {
            return Err(config_error("REMINDER_INTERVAL must be greater than zero"));
        }

        let thumb_url = non_empty_var("THUMB_URL").unwrap_or_else(|| DEFAULT_THUMB_URL.to_string());
        let guidebook_path = non_empty_var("GUIDEBOOK_PATH")
            .unwrap_or_else(|| DEFAULT_GUIDEBOOK_PATH.to_string())
            .into();

        Ok(Config {
            telegram_bot_token: token,
            app_name,
            mode,
            webhook_port,
            http_port,
            reminder_message,
            reminder_interval: Duration::from_secs(interval_secs),
            thumb_url,
            guidebook_path,
        })
    }

    /// Public webhook address, `https://{APP_NAME}.herokuapp.com/{token}`.
    pub fn webhook_url(&self) -> Option<String> {
        self.app_name
            .as_ref()
            .map(|app| format!("https://{}.herokuapp.com/{}", app, self.telegram_bot_token))
    }
}

fn config_error(msg: &str) -> BotError {
    BotError::Configuration(msg.to_string())
}

fn non_empty_var(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_port(key: &str, default: u16) -> Result<u16> {
    match non_empty_var(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| BotError::Configuration(format!("Invalid {key}"))),
        None => Ok(default),
    }
}
