//! Inbound dispatcher: allow-list filter, session/runner resolution, submit, drain.
//!
//! All state is injected at construction; there are no process-level globals. The
//! dispatcher's own return carries no payload; user-visible output happens out-of-band
//! through delivery-tool sends made by the agent during its turn.

use std::sync::Arc;

use abot_core::{Bot, Message, Result};
use futures::StreamExt;
use tracing::{debug, info};

use crate::agent::AgentFactory;
use crate::delivery::{DeliveryStyle, DeliveryTool};
use crate::runner::RunnerRegistry;
use crate::session::SessionStore;

/// Dispatcher knobs supplied by the caller at startup.
pub struct DispatcherConfig {
    /// Application name used as the first part of every session key.
    pub app_name: String,
    /// When non-empty, updates from chats outside this list are silently dropped.
    pub allowed_chat_ids: Vec<i64>,
    /// Which delivery-tool variant agents of this bot receive.
    pub delivery_style: DeliveryStyle,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            app_name: "TelegramBot".to_string(),
            allowed_chat_ids: Vec::new(),
            delivery_style: DeliveryStyle::ErrorReporting,
        }
    }
}

/// Receives inbound text updates and drives one agent turn per update.
pub struct AgentDispatcher {
    bot: Arc<dyn Bot>,
    factory: Arc<dyn AgentFactory>,
    sessions: Arc<SessionStore>,
    runners: RunnerRegistry,
    allowed_chat_ids: Vec<i64>,
    delivery_style: DeliveryStyle,
    app_name: String,
}

impl AgentDispatcher {
    pub fn new(
        bot: Arc<dyn Bot>,
        factory: Arc<dyn AgentFactory>,
        config: DispatcherConfig,
    ) -> Self {
        let sessions = Arc::new(SessionStore::new());
        let runners = RunnerRegistry::new(config.app_name.clone(), sessions.clone());
        Self {
            bot,
            factory,
            sessions,
            runners,
            allowed_chat_ids: config.allowed_chat_ids,
            delivery_style: config.delivery_style,
            app_name: config.app_name,
        }
    }

    /// Session store shared with the runners (exposed for tests and diagnostics).
    pub fn sessions(&self) -> &SessionStore {
        &self.sessions
    }

    /// Number of runners created so far (exposed for tests and diagnostics).
    pub async fn runner_count(&self) -> usize {
        self.runners.len().await
    }

    /// Handles one inbound text update. Errors from session/factory/runner resolution
    /// propagate to the transport layer; delivery failures never reach here (the tool
    /// absorbs them).
    pub async fn dispatch(&self, message: &Message) -> Result<()> {
        let chat_id = message.chat.id;

        if !self.allowed_chat_ids.is_empty() && !self.allowed_chat_ids.contains(&chat_id) {
            debug!(chat_id = chat_id, "step: chat not in allow-list, dropping update");
            return Ok(());
        }

        let key = chat_id.to_string();
        let session = self.sessions.get_or_create(&self.app_name, &key, &key).await;

        let tool = DeliveryTool::new(self.bot.clone(), message.chat.clone(), self.delivery_style);
        let runner = self
            .runners
            .get_or_create(chat_id, self.factory.as_ref(), tool)
            .await?;

        info!(
            user_id = message.user.id,
            chat_id = chat_id,
            agent = %runner.agent_name(),
            message_content = %message.content,
            "step: submitting message to runner"
        );

        let mut events = runner.run(&key, &key, &message.content).await?;
        while let Some(event) = events.next().await {
            let event = event?;
            debug!(
                chat_id = chat_id,
                author = %event.author,
                is_final = event.is_final_response(),
                "step: agent event"
            );
            if event.is_final_response() && event.has_content() {
                info!(chat_id = chat_id, "step: final response reached");
                session.record(event).await;
                break;
            }
        }

        Ok(())
    }
}
