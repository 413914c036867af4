use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use log::{info, warn};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

// Process-wide registry of interview sessions currently in flight.
lazy_static! {
    static ref ACTIVE_SESSIONS: Arc<Mutex<HashMap<String, SessionHandle>>> =
        Arc::new(Mutex::new(HashMap::new()));
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionStatus {
    Created,
    Active,
    Completed,
    Abandoned,
}

#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SessionHandle {
    pub session_id: String,
    pub topic_id: String,
    pub status: SessionStatus,
    pub started_at: DateTime<Utc>,
}

pub fn register_session(session_id: &str, topic_id: &str) -> SessionHandle {
    let handle = SessionHandle {
        session_id: session_id.to_string(),
        topic_id: topic_id.to_string(),
        status: SessionStatus::Active,
        started_at: Utc::now(),
    };
    let mut sessions = ACTIVE_SESSIONS.lock();
    sessions.insert(session_id.to_string(), handle.clone());
    info!("Session {} registered for topic {}", session_id, topic_id);
    handle
}

pub fn get_session(session_id: &str) -> Option<SessionHandle> {
    ACTIVE_SESSIONS.lock().get(session_id).cloned()
}

pub fn complete_session(session_id: &str) {
    let mut sessions = ACTIVE_SESSIONS.lock();
    match sessions.remove(session_id) {
        Some(_) => info!("Session {} completed and unregistered", session_id),
        None => warn!("Session {} was not in the active registry", session_id),
    }
}

pub fn abandon_session(session_id: &str) -> bool {
    let removed = ACTIVE_SESSIONS.lock().remove(session_id).is_some();
    if removed {
        info!("Session {} abandoned", session_id);
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_lookup_complete_cycle() {
        let handle = register_session("sess-registry-1", "backend");
        assert_eq!(handle.status, SessionStatus::Active);

        let found = get_session("sess-registry-1").expect("registered session");
        assert_eq!(found.topic_id, "backend");

        complete_session("sess-registry-1");
        assert!(get_session("sess-registry-1").is_none());
    }

    #[test]
    fn abandoning_unknown_session_is_a_noop() {
        assert!(!abandon_session("sess-registry-never-existed"));
    }
}
