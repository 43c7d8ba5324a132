//! # agent-runtime
//!
//! Connects a chat transport to a pluggable conversational agent: one session and one
//! runner per chat id, created lazily on first contact. The [`AgentDispatcher`] receives
//! inbound messages, resolves both, submits the text to the runner, and drains the
//! resulting event stream until the first final event with content. Outbound text flows
//! through the [`DeliveryTool`] the agent is given at construction, not through the
//! dispatcher's return value.

pub mod agent;
pub mod delivery;
pub mod dispatch;
pub mod event;
pub mod runner;
pub mod session;

pub use agent::{Agent, AgentFactory, EventStream};
pub use delivery::{DeliveryStyle, DeliveryTool};
pub use dispatch::{AgentDispatcher, DispatcherConfig};
pub use event::AgentEvent;
pub use runner::{Runner, RunnerRegistry};
pub use session::{Session, SessionStore};
