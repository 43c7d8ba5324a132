//! Polling bootstrap: builds the teloxide Bot, wires the dispatcher against text-only
//! non-command updates plus the `/get_chat_id` diagnostic command, and blocks on the
//! polling loop until process termination.

use std::sync::Arc;

use abot_core::{init_tracing, ToCoreMessage};
use agent_runtime::{AgentDispatcher, AgentFactory, DeliveryStyle, DispatcherConfig};
use anyhow::{Context, Result};
use teloxide::dptree;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;
use tracing::{error, info, instrument};

use crate::adapters::TelegramMessageWrapper;
use crate::bot_adapter::TelegramBotAdapter;
use crate::config::TelegramConfig;

#[derive(BotCommands, Clone)]
#[command(rename_rule = "snake_case", description = "Diagnostic commands:")]
enum Command {
    #[command(description = "echo your chat id back")]
    GetChatId,
}

/// Reply body for the `/get_chat_id` diagnostic command.
pub fn chat_id_reply(chat_id: i64) -> String {
    format!("Your chat ID is: {}", chat_id)
}

/// Main entry: init logging, build the teloxide Bot and the agent dispatcher, then run
/// the polling loop to exit. The factory is called lazily, once per distinct chat id, on
/// the first inbound message from that chat.
#[instrument(skip(config, factory))]
pub async fn run_agent_bot(
    config: TelegramConfig,
    factory: Arc<dyn AgentFactory>,
    delivery_style: DeliveryStyle,
) -> Result<()> {
    init_tracing(config.log_file.as_deref())?;

    let mut bot = teloxide::Bot::new(config.bot_token.clone());
    if let Some(api_url) = &config.telegram_api_url {
        let url = reqwest::Url::parse(api_url)
            .with_context(|| format!("Invalid TELEGRAM_API_URL: {}", api_url))?;
        bot = bot.set_api_url(url);
    }

    if let Ok(me) = bot.get_me().await {
        if let Some(username) = &me.user.username {
            info!(username = %username, "Bot identity resolved");
        }
    }

    let dispatcher = Arc::new(AgentDispatcher::new(
        Arc::new(TelegramBotAdapter::new(bot.clone())),
        factory,
        DispatcherConfig {
            app_name: config.app_name.clone(),
            allowed_chat_ids: config.allowed_chat_ids.clone(),
            delivery_style,
        },
    ));

    info!(
        app_name = %config.app_name,
        allowed_chat_ids = ?config.allowed_chat_ids,
        "Bot started successfully"
    );

    let handler = Update::filter_message()
        .branch(
            dptree::entry()
                .filter_command::<Command>()
                .endpoint(handle_command),
        )
        .branch(dptree::endpoint(handle_message));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![dispatcher])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}

/// Handles the `/get_chat_id` diagnostic command.
async fn handle_command(
    bot: Bot,
    msg: teloxide::types::Message,
    cmd: Command,
) -> ResponseResult<()> {
    match cmd {
        Command::GetChatId => {
            info!(chat_id = msg.chat.id.0, "step: get_chat_id requested");
            bot.send_message(msg.chat.id, chat_id_reply(msg.chat.id.0))
                .await?;
        }
    }
    Ok(())
}

/// Handles text-only, non-command updates: converts to core Message and dispatches in a
/// spawned task so the polling loop returns immediately.
async fn handle_message(
    dispatcher: Arc<AgentDispatcher>,
    msg: teloxide::types::Message,
) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    // Unknown commands fall through the command branch; ignore them here.
    if text.starts_with('/') {
        return Ok(());
    }

    let core_msg = TelegramMessageWrapper(&msg).to_core();
    info!(
        user_id = core_msg.user.id,
        chat_id = core_msg.chat.id,
        message_content = %core_msg.content,
        "Received message"
    );

    tokio::spawn(async move {
        if let Err(e) = dispatcher.dispatch(&core_msg).await {
            error!(
                error = %e,
                user_id = core_msg.user.id,
                chat_id = core_msg.chat.id,
                "Dispatch failed"
            );
        }
    });

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Test: diagnostic reply for chat 99 is exactly "Your chat ID is: 99".**
    #[test]
    fn test_chat_id_reply() {
        assert_eq!(chat_id_reply(99), "Your chat ID is: 99");
        assert_eq!(chat_id_reply(-100123), "Your chat ID is: -100123");
    }
}
