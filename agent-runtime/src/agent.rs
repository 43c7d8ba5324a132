//! Agent and factory contracts.
//!
//! The adapter treats agents as black boxes: a turn takes the session and the new user
//! text and yields a lazy, finite, non-restartable sequence of events. The factory is the
//! caller's hook for wiring models, instructions, and tools; the adapter only hands it a
//! chat-bound [`DeliveryTool`] and the chat's user id.

use std::sync::Arc;

use abot_core::Result;
use async_trait::async_trait;
use futures::stream::BoxStream;

use crate::delivery::DeliveryTool;
use crate::event::AgentEvent;
use crate::session::Session;

/// Events of one agent turn. Pull-based; the consumer may stop early and drop the rest.
pub type EventStream = BoxStream<'static, Result<AgentEvent>>;

/// One conversational agent. Implementations own all reasoning; the runtime only submits
/// the user's text and consumes the resulting events.
#[async_trait]
pub trait Agent: Send + Sync {
    /// Name used as the author of this agent's events.
    fn name(&self) -> &str;

    /// Runs one turn against the given session.
    async fn run(&self, session: Arc<Session>, message: &str) -> Result<EventStream>;
}

/// Builds an agent for one chat. Called exactly once per distinct chat id, lazily, on the
/// first inbound message from that chat.
pub trait AgentFactory: Send + Sync {
    fn create(&self, tool: DeliveryTool, user_id: i64) -> Result<Arc<dyn Agent>>;
}

/// Plain closures are factories too, e.g. `|tool, _user_id| Arc::new(MyAgent::new(tool)) as _`.
impl<F> AgentFactory for F
where
    F: Fn(DeliveryTool, i64) -> Arc<dyn Agent> + Send + Sync,
{
    fn create(&self, tool: DeliveryTool, user_id: i64) -> Result<Arc<dyn Agent>> {
        Ok(self(tool, user_id))
    }
}
