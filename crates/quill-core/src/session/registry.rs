//! Live sessions shared between concurrent callers.

use std::{
    collections::HashMap,
    sync::{
        atomic::{AtomicU64, Ordering},
        Arc,
    },
};

use tokio::sync::Mutex;

use super::{SessionId, WizardSession};

/// A session behind an async mutex, as handed to the processing driver.
pub type SharedSession = Arc<Mutex<WizardSession>>;

/// Id allocator and lookup table for sessions hosted by a long-running
/// process.
#[derive(Debug, Default)]
pub struct SessionRegistry {
    next_id: AtomicU64,
    sessions: Mutex<HashMap<SessionId, SharedSession>>,
}

impl SessionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a fresh session id.
    pub fn allocate_id(&self) -> SessionId {
        SessionId(self.next_id.fetch_add(1, Ordering::Relaxed) + 1)
    }

    /// Store a session under its own id.
    pub async fn insert(&self, session: WizardSession) -> SharedSession {
        let id = session.id();
        let shared = Arc::new(Mutex::new(session));
        self.sessions.lock().await.insert(id, Arc::clone(&shared));
        shared
    }

    pub async fn get(&self, id: SessionId) -> Option<SharedSession> {
        self.sessions.lock().await.get(&id).cloned()
    }

    /// Remove a session. Any run still holding it is cancelled once the
    /// last handle is dropped.
    pub async fn remove(&self, id: SessionId) -> Option<SharedSession> {
        self.sessions.lock().await.remove(&id)
    }
}
