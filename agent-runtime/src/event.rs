//! Agent events: the units a runner yields during one turn.
//!
//! The dispatcher only ever asks two questions of an event: is it final, and does it
//! carry non-empty content. Everything else is opaque payload for the agent's own use.

use serde::{Deserialize, Serialize};

/// One event produced during an agent turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentEvent {
    /// Who produced the event ("user" for the inbound turn, otherwise the agent name).
    pub author: String,
    /// Text payload, if any.
    pub content: Option<String>,
    /// Marks the turn's terminal event.
    pub is_final: bool,
}

impl AgentEvent {
    /// The inbound user turn, as recorded into session history.
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            author: "user".to_string(),
            content: Some(text.into()),
            is_final: false,
        }
    }

    /// An intermediate (non-final) event from the agent.
    pub fn agent_update(author: impl Into<String>, content: Option<String>) -> Self {
        Self {
            author: author.into(),
            content,
            is_final: false,
        }
    }

    /// The terminal event of a turn.
    pub fn agent_final(author: impl Into<String>, content: Option<String>) -> Self {
        Self {
            author: author.into(),
            content,
            is_final: true,
        }
    }

    /// True when this event terminates the agent's turn.
    pub fn is_final_response(&self) -> bool {
        self.is_final
    }

    /// True when the event carries non-empty text.
    pub fn has_content(&self) -> bool {
        self.content.as_deref().is_some_and(|c| !c.is_empty())
    }
}
