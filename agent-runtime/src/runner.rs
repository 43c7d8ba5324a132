//! Runner: drives one agent's turns against the shared session store.
//!
//! One runner exists per chat id, created lazily by the registry through the
//! caller-supplied factory and never replaced afterwards. If the factory's behavior must
//! change, the process restarts.

use std::collections::HashMap;
use std::sync::Arc;

use abot_core::Result;
use tokio::sync::Mutex;
use tracing::info;

use crate::agent::{Agent, AgentFactory, EventStream};
use crate::delivery::DeliveryTool;
use crate::event::AgentEvent;
use crate::session::SessionStore;

/// Execution engine for one agent: resolves the session, records the user turn, and
/// delegates to the agent for the event sequence.
pub struct Runner {
    agent: Arc<dyn Agent>,
    app_name: String,
    sessions: Arc<SessionStore>,
}

impl Runner {
    pub fn new(agent: Arc<dyn Agent>, app_name: impl Into<String>, sessions: Arc<SessionStore>) -> Self {
        Self {
            agent,
            app_name: app_name.into(),
            sessions,
        }
    }

    pub fn agent_name(&self) -> &str {
        self.agent.name()
    }

    /// Submits one user turn scoped to the given user id and session id. The returned
    /// stream is lazy and non-restartable; the caller may stop consuming it early.
    pub async fn run(&self, user_id: &str, session_id: &str, text: &str) -> Result<EventStream> {
        let session = self
            .sessions
            .get_or_create(&self.app_name, user_id, session_id)
            .await;
        session.record(AgentEvent::user(text)).await;
        self.agent.run(session, text).await
    }
}

/// Process-wide runner registry keyed by chat id. The lock is held across the factory
/// call, so the factory runs at most once per chat even under concurrent dispatch.
pub struct RunnerRegistry {
    app_name: String,
    sessions: Arc<SessionStore>,
    runners: Mutex<HashMap<i64, Arc<Runner>>>,
}

impl RunnerRegistry {
    pub fn new(app_name: impl Into<String>, sessions: Arc<SessionStore>) -> Self {
        Self {
            app_name: app_name.into(),
            sessions,
            runners: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the runner for the chat, invoking `factory.create(tool, chat_id)` on first
    /// contact. Entries are never removed or refreshed.
    pub async fn get_or_create(
        &self,
        chat_id: i64,
        factory: &dyn AgentFactory,
        tool: DeliveryTool,
    ) -> Result<Arc<Runner>> {
        let mut runners = self.runners.lock().await;
        if let Some(runner) = runners.get(&chat_id) {
            return Ok(runner.clone());
        }

        let agent = factory.create(tool, chat_id)?;
        info!(
            chat_id = chat_id,
            agent = %agent.name(),
            "step: agent created for chat"
        );
        let runner = Arc::new(Runner::new(
            agent,
            self.app_name.clone(),
            self.sessions.clone(),
        ));
        runners.insert(chat_id, runner.clone());
        Ok(runner)
    }

    /// Number of runners currently held.
    pub async fn len(&self) -> usize {
        self.runners.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
