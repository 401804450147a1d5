//! Shared application state handed to every request handler.

use std::sync::Arc;

use kontak_core::{ContactStore, SessionStore};

/// State cloned into each handler invocation.
///
/// The store is held behind the [`ContactStore`] trait so handlers stay
/// testable against an in-memory database; the session store replaces
/// the process-wide flash singleton with an explicit collaborator.
#[derive(Clone)]
pub struct AppState {
    /// Contact persistence, opened once at process start
    pub store: Arc<dyn ContactStore>,
    /// Sessions and flash messages, keyed by cookie
    pub sessions: SessionStore,
    /// When set, lookups of a missing contact answer 404 instead of
    /// rendering with an absent record
    pub strict_not_found: bool,
}
