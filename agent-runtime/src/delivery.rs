//! Chat-bound delivery tool handed to agents.
//!
//! The tool is the agent's only sanctioned way to push text to the user. Sending never
//! fails from the agent's point of view: transport errors are caught, logged, and
//! reported back in-band as a status string, so the agent can decide whether to retry or
//! change strategy. The infrastructure itself performs no retry.

use std::sync::Arc;

use abot_core::{Bot, Chat};
use tracing::{error, info};

/// Status string returned by [`DeliveryStyle::ErrorReporting`] on success.
const MSG_SENT: &str = "Message sent.";
/// Status string returned by [`DeliveryStyle::FixedAck`] regardless of transport outcome.
const FIXED_ACK: &str = "DONE, message was sent to a user";

/// The two delivery-tool behaviors. They share one contract shape (text in, status string
/// out) but differ observably in what the agent is told, so they stay distinct.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryStyle {
    /// Returns a success marker or a string embedding the transport error.
    ErrorReporting,
    /// Returns a fixed confirmation sentence, ignoring transport errors (they are only logged).
    FixedAck,
}

/// A send capability bound to one chat at creation time.
#[derive(Clone)]
pub struct DeliveryTool {
    bot: Arc<dyn Bot>,
    chat: Chat,
    style: DeliveryStyle,
}

impl DeliveryTool {
    pub fn new(bot: Arc<dyn Bot>, chat: Chat, style: DeliveryStyle) -> Self {
        Self { bot, chat, style }
    }

    /// The chat this tool delivers to.
    pub fn chat_id(&self) -> i64 {
        self.chat.id
    }

    /// Usage text exposed to the agent alongside the tool.
    pub fn description(&self) -> &'static str {
        match self.style {
            DeliveryStyle::ErrorReporting => {
                "Use this tool ONLY to send a message text back to the user in the current \
                 chat. This can be used for asking clarifying questions, providing \
                 intermediate updates, or delivering the final answer."
            }
            DeliveryStyle::FixedAck => {
                "This is the function that MUST be used in order to send the final answer \
                 back to the user. The user will NOT see the message unless it is also sent \
                 with this function."
            }
        }
    }

    /// Delivers `text` to the bound chat and returns the style's status string.
    pub async fn send(&self, text: &str) -> String {
        info!(
            chat_id = self.chat.id,
            message_content = %text,
            "step: agent requested message delivery"
        );
        match self.bot.send_message(&self.chat, text).await {
            Ok(()) => match self.style {
                DeliveryStyle::ErrorReporting => MSG_SENT.to_string(),
                DeliveryStyle::FixedAck => FIXED_ACK.to_string(),
            },
            Err(e) => {
                error!(chat_id = self.chat.id, error = %e, "Failed to send message via tool");
                match self.style {
                    DeliveryStyle::ErrorReporting => format!("Error sending message: {}", e),
                    DeliveryStyle::FixedAck => FIXED_ACK.to_string(),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use abot_core::{AbotError, Message, Result};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct RecordingBot {
        sent: Mutex<Vec<(i64, String)>>,
        fail: bool,
    }

    impl RecordingBot {
        fn new(fail: bool) -> Self {
            Self {
                sent: Mutex::new(Vec::new()),
                fail,
            }
        }
    }

    #[async_trait]
    impl Bot for RecordingBot {
        async fn send_message(&self, chat: &Chat, text: &str) -> Result<()> {
            if self.fail {
                return Err(AbotError::Bot("network unreachable".to_string()));
            }
            self.sent.lock().unwrap().push((chat.id, text.to_string()));
            Ok(())
        }

        async fn reply_to(&self, message: &Message, text: &str) -> Result<()> {
            self.send_message(&message.chat, text).await
        }
    }

    fn chat(id: i64) -> Chat {
        Chat {
            id,
            chat_type: "private".to_string(),
        }
    }

    /// **Test: error-reporting tool returns the success marker and the bot sees the text.**
    #[tokio::test]
    async fn test_error_reporting_success_marker() {
        let bot = Arc::new(RecordingBot::new(false));
        let tool = DeliveryTool::new(bot.clone(), chat(7), DeliveryStyle::ErrorReporting);

        let status = tool.send("hello").await;

        assert_eq!(status, "Message sent.");
        assert_eq!(
            *bot.sent.lock().unwrap(),
            vec![(7, "hello".to_string())]
        );
    }

    /// **Test: error-reporting tool embeds the transport error instead of failing.**
    #[tokio::test]
    async fn test_error_reporting_embeds_error() {
        let bot = Arc::new(RecordingBot::new(true));
        let tool = DeliveryTool::new(bot, chat(7), DeliveryStyle::ErrorReporting);

        let status = tool.send("hello").await;

        assert!(status.starts_with("Error sending message:"));
        assert!(status.contains("network unreachable"));
    }

    /// **Test: fixed-ack tool returns the same sentence on success and on failure.**
    #[tokio::test]
    async fn test_fixed_ack_ignores_transport_outcome() {
        let ok_bot = Arc::new(RecordingBot::new(false));
        let ok_tool = DeliveryTool::new(ok_bot, chat(7), DeliveryStyle::FixedAck);
        assert_eq!(ok_tool.send("hi").await, "DONE, message was sent to a user");

        let bad_bot = Arc::new(RecordingBot::new(true));
        let bad_tool = DeliveryTool::new(bad_bot, chat(7), DeliveryStyle::FixedAck);
        assert_eq!(bad_tool.send("hi").await, "DONE, message was sent to a user");
    }

    /// **Test: the two styles expose different usage descriptions.**
    #[test]
    fn test_descriptions_differ_by_style() {
        let bot = Arc::new(RecordingBot::new(false));
        let reporting = DeliveryTool::new(bot.clone(), chat(1), DeliveryStyle::ErrorReporting);
        let fixed = DeliveryTool::new(bot, chat(1), DeliveryStyle::FixedAck);

        assert_ne!(reporting.description(), fixed.description());
    }
}
