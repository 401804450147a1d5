//! Sessions and one-shot flash messages.
//!
//! There is no process-wide mutable singleton here: handlers receive a
//! [`SessionStore`] as part of the application state and address it with
//! the [`SessionId`] resolved from the request's cookie. The store is an
//! in-memory map behind a mutex, bounded by an inactivity TTL.
//!
//! Flash contract: a message set under a key before a redirect is
//! returned by the next `flash_take` for that key and gone afterwards.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use uuid::Uuid;

/// Identifier for one browser session, carried in a cookie.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionId(String);

impl SessionId {
    fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Parse a session id received from a cookie.
    ///
    /// Returns `None` for anything that is not a UUID; a garbage cookie
    /// is treated the same as no cookie.
    #[must_use]
    pub fn parse(value: &str) -> Option<Self> {
        Uuid::parse_str(value.trim())
            .ok()
            .map(|u| Self(u.to_string()))
    }

    /// The cookie-safe string form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug)]
struct SessionEntry {
    last_seen: Instant,
    flash: HashMap<String, Vec<String>>,
}

impl SessionEntry {
    fn fresh(now: Instant) -> Self {
        Self {
            last_seen: now,
            flash: HashMap::new(),
        }
    }
}

/// In-memory session store with lazy expiry.
///
/// Cheap to clone; all clones share the same map.
#[derive(Debug, Clone)]
pub struct SessionStore {
    inner: Arc<Mutex<HashMap<SessionId, SessionEntry>>>,
    ttl: Duration,
}

impl SessionStore {
    /// Create a store whose sessions expire after `ttl` of inactivity.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
            ttl,
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<SessionId, SessionEntry>> {
        // A poisoned lock only means another thread panicked mid-access;
        // the map itself is still usable.
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }

    /// Resolve the session for a request.
    ///
    /// Touches and returns the existing session when it is still live;
    /// otherwise (no cookie, unknown id, expired entry) starts a new one.
    /// Expired entries are dropped on the way through.
    pub fn resolve(&self, existing: Option<SessionId>) -> SessionId {
        let now = Instant::now();
        let mut sessions = self.lock();
        sessions.retain(|_, entry| now.duration_since(entry.last_seen) <= self.ttl);

        if let Some(id) = existing {
            if let Some(entry) = sessions.get_mut(&id) {
                entry.last_seen = now;
                return id;
            }
        }

        let id = SessionId::generate();
        sessions.insert(id.clone(), SessionEntry::fresh(now));
        id
    }

    /// Append a flash message under `key` for the given session.
    ///
    /// Unknown session ids are revived rather than dropped silently: the
    /// message still has to survive the upcoming redirect.
    pub fn flash_set(&self, id: &SessionId, key: &str, message: impl Into<String>) {
        let mut sessions = self.lock();
        let entry = sessions
            .entry(id.clone())
            .or_insert_with(|| SessionEntry::fresh(Instant::now()));
        entry
            .flash
            .entry(key.to_string())
            .or_default()
            .push(message.into());
    }

    /// Return and clear all flash messages under `key`.
    #[must_use]
    pub fn flash_take(&self, id: &SessionId, key: &str) -> Vec<String> {
        let mut sessions = self.lock();
        sessions
            .get_mut(id)
            .and_then(|entry| entry.flash.remove(key))
            .unwrap_or_default()
    }

    /// Number of live sessions, for tests and diagnostics.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lock().len()
    }

    /// Whether no sessions are live.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
