//! # abot-core
//!
//! Core types and traits for the agent bot: [`Bot`], message and user types, errors,
//! and tracing initialization. Transport-agnostic; used by agent-runtime and abot-telegram.

pub mod bot;
pub mod error;
pub mod logger;
pub mod types;

pub use bot::Bot;
pub use error::{AbotError, Result};
pub use logger::init_tracing;
pub use types::{Chat, Message, MessageDirection, ToCoreMessage, ToCoreUser, User};
