//! # abot-telegram
//!
//! Telegram layer: adapters from teloxide types to core types, the [`abot_core::Bot`]
//! implementation, env-driven config, and the polling bootstrap with the `/get_chat_id`
//! diagnostic command. Handles only Telegram connectivity; agent wiring comes from the
//! caller's factory.

mod adapters;
mod bootstrap;
mod bot_adapter;
mod config;

pub use adapters::{TelegramMessageWrapper, TelegramUserWrapper};
pub use bootstrap::{chat_id_reply, run_agent_bot};
pub use bot_adapter::TelegramBotAdapter;
pub use config::TelegramConfig;
