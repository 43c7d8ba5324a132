//! Conversation sessions keyed by (app_name, user_id, session_id).
//!
//! Sessions are created lazily on first contact and live until process exit. There is no
//! eviction and no expiry; the adapter's contract is strictly "one logical conversation
//! context per chat, created on demand".

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tracing::debug;

use crate::event::AgentEvent;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct SessionKey {
    app_name: String,
    user_id: String,
    session_id: String,
}

/// One conversation's state: identity plus the event history the runner records into it.
pub struct Session {
    app_name: String,
    user_id: String,
    session_id: String,
    created_at: DateTime<Utc>,
    history: Mutex<Vec<AgentEvent>>,
}

impl Session {
    fn new(app_name: &str, user_id: &str, session_id: &str) -> Self {
        Self {
            app_name: app_name.to_string(),
            user_id: user_id.to_string(),
            session_id: session_id.to_string(),
            created_at: Utc::now(),
            history: Mutex::new(Vec::new()),
        }
    }

    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Appends an event to the session history.
    pub async fn record(&self, event: AgentEvent) {
        self.history.lock().await.push(event);
    }

    /// Returns a snapshot of the session history (oldest first).
    pub async fn history(&self) -> Vec<AgentEvent> {
        self.history.lock().await.clone()
    }
}

/// Process-wide session store. Lookup and insert happen under one lock, so concurrent
/// get-or-create for the same key resolves to a single session.
pub struct SessionStore {
    sessions: Mutex<HashMap<SessionKey, Arc<Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the session for the key if it exists.
    pub async fn get(
        &self,
        app_name: &str,
        user_id: &str,
        session_id: &str,
    ) -> Option<Arc<Session>> {
        let key = SessionKey {
            app_name: app_name.to_string(),
            user_id: user_id.to_string(),
            session_id: session_id.to_string(),
        };
        self.sessions.lock().await.get(&key).cloned()
    }

    /// Returns the session for the key, creating it on first contact.
    pub async fn get_or_create(
        &self,
        app_name: &str,
        user_id: &str,
        session_id: &str,
    ) -> Arc<Session> {
        let key = SessionKey {
            app_name: app_name.to_string(),
            user_id: user_id.to_string(),
            session_id: session_id.to_string(),
        };
        let mut sessions = self.sessions.lock().await;
        match sessions.get(&key) {
            Some(session) => session.clone(),
            None => {
                debug!(
                    app_name = %app_name,
                    user_id = %user_id,
                    session_id = %session_id,
                    "step: creating session"
                );
                let session = Arc::new(Session::new(app_name, user_id, session_id));
                sessions.insert(key, session.clone());
                session
            }
        }
    }

    /// Number of sessions currently held.
    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// **Test: get_or_create returns the same session for the same key.**
    #[tokio::test]
    async fn test_get_or_create_reuses_session() {
        let store = SessionStore::new();
        let first = store.get_or_create("TelegramBot", "7", "7").await;
        let second = store.get_or_create("TelegramBot", "7", "7").await;

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(store.len().await, 1);
    }

    /// **Test: a session carries the identity it was created with.**
    #[tokio::test]
    async fn test_session_identity() {
        let store = SessionStore::new();
        let before = Utc::now();
        let session = store.get_or_create("TelegramBot", "7", "7").await;

        assert_eq!(session.app_name(), "TelegramBot");
        assert_eq!(session.user_id(), "7");
        assert_eq!(session.session_id(), "7");
        assert!(session.created_at() >= before);
        assert!(session.created_at() <= Utc::now());
    }

    /// **Test: distinct session ids produce distinct sessions.**
    #[tokio::test]
    async fn test_distinct_keys_distinct_sessions() {
        let store = SessionStore::new();
        store.get_or_create("TelegramBot", "7", "7").await;
        store.get_or_create("TelegramBot", "8", "8").await;

        assert_eq!(store.len().await, 2);
        assert!(store.get("TelegramBot", "9", "9").await.is_none());
    }

    /// **Test: recorded events come back in insertion order.**
    #[tokio::test]
    async fn test_history_records_in_order() {
        let store = SessionStore::new();
        let session = store.get_or_create("TelegramBot", "7", "7").await;

        session.record(AgentEvent::user("hello")).await;
        session
            .record(AgentEvent::agent_final("demo", Some("hi".to_string())))
            .await;

        let history = session.history().await;
        assert_eq!(history.len(), 2);
        assert_eq!(history[0].author, "user");
        assert!(history[1].is_final_response());
    }
}
