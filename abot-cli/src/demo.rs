//! Demo agent: echoes the user's text back through the delivery tool.
//!
//! Stands in for a real agent backend so the factory contract can be exercised end to
//! end without any model wiring. Real callers supply their own [`AgentFactory`].

use std::sync::Arc;

use abot_core::Result;
use agent_runtime::{Agent, AgentEvent, DeliveryTool, EventStream, Session};
use async_trait::async_trait;
use futures::StreamExt;
use tracing::debug;

/// Echo agent bound to one chat's delivery tool.
pub struct EchoAgent {
    tool: DeliveryTool,
}

impl EchoAgent {
    pub fn new(tool: DeliveryTool) -> Self {
        Self { tool }
    }
}

#[async_trait]
impl Agent for EchoAgent {
    fn name(&self) -> &str {
        "echo_agent"
    }

    async fn run(&self, _session: Arc<Session>, message: &str) -> Result<EventStream> {
        let reply = format!("Echo: {}", message);
        let status = self.tool.send(&reply).await;
        debug!(chat_id = self.tool.chat_id(), status = %status, "Echo delivered");

        let event = AgentEvent::agent_final("echo_agent", Some(reply));
        Ok(futures::stream::iter(vec![Ok(event)]).boxed())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use abot_core::{Bot, Chat};
    use agent_runtime::{DeliveryStyle, SessionStore};
    use std::sync::Mutex;

    struct RecordingBot {
        sent: Mutex<Vec<(i64, String)>>,
    }

    #[async_trait]
    impl Bot for RecordingBot {
        async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
            self.sent.lock().unwrap().push((chat.id, text.to_string()));
            Ok(())
        }
    }

    /// **Test: echo agent sends "Echo: <text>" via the tool and yields one final event.**
    #[tokio::test]
    async fn test_echo_agent_sends_and_finishes() {
        let bot = Arc::new(RecordingBot {
            sent: Mutex::new(Vec::new()),
        });
        let tool = DeliveryTool::new(
            bot.clone(),
            Chat {
                id: 7,
                chat_type: "private".to_string(),
            },
            DeliveryStyle::ErrorReporting,
        );
        let agent = EchoAgent::new(tool);
        let store = SessionStore::new();
        let session = store.get_or_create("TelegramBot", "7", "7").await;

        let mut events = agent.run(session, "hello").await.unwrap();
        let event = events.next().await.unwrap().unwrap();

        assert!(event.is_final_response());
        assert_eq!(event.content.as_deref(), Some("Echo: hello"));
        assert!(events.next().await.is_none());
        assert_eq!(
            *bot.sent.lock().unwrap(),
            vec![(7, "Echo: hello".to_string())]
        );
    }
}
