//! Minimal framework config: token, API URL, log path, app name, chat allow-list.
//! Loaded from environment variables: BOT_TOKEN, TELEGRAM_API_URL, LOG_FILE, APP_NAME,
//! ALLOWED_CHAT_IDS (comma-separated numeric chat ids).

use anyhow::Result;
use std::env;

/// Telegram bot framework config (Telegram connectivity, logging, and dispatch scoping).
pub struct TelegramConfig {
    pub bot_token: String,
    pub telegram_api_url: Option<String>,
    pub log_file: Option<String>,
    /// Application name used as the first part of every session key.
    pub app_name: String,
    /// When non-empty, updates from chats outside this list are silently dropped.
    pub allowed_chat_ids: Vec<i64>,
}

impl TelegramConfig {
    /// Loads from env: BOT_TOKEN required; TELEGRAM_API_URL, LOG_FILE, APP_NAME,
    /// ALLOWED_CHAT_IDS optional.
    pub fn from_env() -> Result<Self> {
        let bot_token = env::var("BOT_TOKEN").map_err(|_| anyhow::anyhow!("BOT_TOKEN not set"))?;
        let telegram_api_url = env::var("TELEGRAM_API_URL")
            .or_else(|_| env::var("TELOXIDE_API_URL"))
            .ok();
        let log_file = env::var("LOG_FILE").ok();
        let app_name = env::var("APP_NAME").unwrap_or_else(|_| "TelegramBot".to_string());
        let allowed_chat_ids = match env::var("ALLOWED_CHAT_IDS") {
            Ok(raw) => parse_allowed_chat_ids(&raw)?,
            Err(_) => Vec::new(),
        };
        Ok(Self {
            bot_token,
            telegram_api_url,
            log_file,
            app_name,
            allowed_chat_ids,
        })
    }

    /// Constructs with the given token; everything else defaults.
    pub fn with_token(bot_token: String) -> Self {
        Self {
            bot_token,
            telegram_api_url: None,
            log_file: None,
            app_name: "TelegramBot".to_string(),
            allowed_chat_ids: Vec::new(),
        }
    }
}

/// Parses a comma-separated chat id list. Empty entries are skipped; a non-numeric entry
/// is a config error rather than a silently ignored chat.
pub fn parse_allowed_chat_ids(raw: &str) -> Result<Vec<i64>> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>()
                .map_err(|_| anyhow::anyhow!("Invalid chat id in ALLOWED_CHAT_IDS: {}", s))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_token() {
        let config = TelegramConfig::with_token("test_token".to_string());
        assert_eq!(config.bot_token, "test_token");
        assert!(config.telegram_api_url.is_none());
        assert!(config.log_file.is_none());
        assert_eq!(config.app_name, "TelegramBot");
        assert!(config.allowed_chat_ids.is_empty());
    }

    #[test]
    fn test_parse_allowed_chat_ids() {
        assert_eq!(parse_allowed_chat_ids("").unwrap(), Vec::<i64>::new());
        assert_eq!(parse_allowed_chat_ids("42").unwrap(), vec![42]);
        assert_eq!(
            parse_allowed_chat_ids(" 42, -100123 ,7 ").unwrap(),
            vec![42, -100123, 7]
        );
        assert!(parse_allowed_chat_ids("42,abc").is_err());
    }
}
