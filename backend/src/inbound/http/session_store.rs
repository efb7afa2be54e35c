//! Server-side session storage.
//!
//! The session cookie only carries an opaque, encrypted key. The state it
//! points at, including a visitor's serialised [`ListBook`], stays in process
//! memory, so the number of lists and todos a visitor keeps is not bounded by
//! cookie size. Entries expire with the session TTL and expired entries are
//! pruned whenever a session is written.
//!
//! [`ListBook`]: crate::domain::ListBook

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Instant;

use actix_session::storage::{
    LoadError, SaveError, SessionKey, SessionStore, UpdateError, generate_session_key,
};
use actix_web::cookie::time::Duration;
use anyhow::anyhow;

type SessionState = HashMap<String, String>;

struct Entry {
    state: SessionState,
    expires_at: Instant,
}

impl Entry {
    fn new(state: SessionState, ttl: &Duration) -> Self {
        Self {
            state,
            expires_at: expiry(ttl),
        }
    }

    fn is_live(&self, now: Instant) -> bool {
        self.expires_at > now
    }
}

/// A TTL that cannot be represented expires immediately.
fn expiry(ttl: &Duration) -> Instant {
    let now = Instant::now();
    std::time::Duration::try_from(*ttl)
        .ok()
        .and_then(|ttl| now.checked_add(ttl))
        .unwrap_or(now)
}

/// In-memory [`SessionStore`] shared by every worker.
///
/// Cloning is cheap; clones share the same sessions.
///
/// # Examples
/// ```
/// use actix_session::SessionMiddleware;
/// use actix_web::cookie::Key;
/// use todo_lists::inbound::http::session_store::MemorySessionStore;
///
/// let store = MemorySessionStore::new();
/// let _session = SessionMiddleware::new(store.clone(), Key::generate());
/// ```
#[derive(Clone, Default)]
pub struct MemorySessionStore {
    sessions: Arc<Mutex<HashMap<String, Entry>>>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, HashMap<String, Entry>>, anyhow::Error> {
        self.sessions
            .lock()
            .map_err(|_| anyhow!("session store lock poisoned"))
    }

    fn insert(&self, state: SessionState, ttl: &Duration) -> Result<SessionKey, anyhow::Error> {
        let session_key = generate_session_key();
        let mut sessions = self.lock()?;
        let now = Instant::now();
        sessions.retain(|_, entry| entry.is_live(now));
        sessions.insert(session_key.as_ref().to_owned(), Entry::new(state, ttl));
        Ok(session_key)
    }
}

impl SessionStore for MemorySessionStore {
    async fn load(&self, session_key: &SessionKey) -> Result<Option<SessionState>, LoadError> {
        let mut sessions = self.lock().map_err(LoadError::Other)?;
        let now = Instant::now();
        let state = sessions
            .get(session_key.as_ref())
            .filter(|entry| entry.is_live(now))
            .map(|entry| entry.state.clone());
        if state.is_none() {
            sessions.remove(session_key.as_ref());
        }
        Ok(state)
    }

    async fn save(
        &self,
        session_state: SessionState,
        ttl: &Duration,
    ) -> Result<SessionKey, SaveError> {
        self.insert(session_state, ttl).map_err(SaveError::Other)
    }

    /// Replace the state under `session_key`. A key that has expired or was
    /// never issued gets a fresh key instead.
    async fn update(
        &self,
        session_key: SessionKey,
        session_state: SessionState,
        ttl: &Duration,
    ) -> Result<SessionKey, UpdateError> {
        {
            let mut sessions = self.lock().map_err(UpdateError::Other)?;
            let now = Instant::now();
            if let Some(entry) = sessions
                .get_mut(session_key.as_ref())
                .filter(|entry| entry.is_live(now))
            {
                *entry = Entry::new(session_state, ttl);
                return Ok(session_key);
            }
        }
        self.insert(session_state, ttl).map_err(UpdateError::Other)
    }

    async fn update_ttl(
        &self,
        session_key: &SessionKey,
        ttl: &Duration,
    ) -> Result<(), anyhow::Error> {
        let mut sessions = self.lock()?;
        if let Some(entry) = sessions.get_mut(session_key.as_ref()) {
            entry.expires_at = expiry(ttl);
        }
        Ok(())
    }

    async fn delete(&self, session_key: &SessionKey) -> Result<(), anyhow::Error> {
        self.lock()?.remove(session_key.as_ref());
        Ok(())
    }
}
