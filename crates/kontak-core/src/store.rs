//! Repository trait for contact persistence.
//!
//! # Repository Pattern
//!
//! Handlers and the validation layer depend on [`ContactStore`], never on
//! a concrete backend. This keeps the business rules testable against an
//! in-memory database and leaves the storage engine swappable.
//!
//! # Contract Notes
//!
//! - `insert` only checks required fields; **name uniqueness is the
//!   caller's responsibility** (the validation layer runs the uniqueness
//!   check before any write). Two concurrent submissions with the same
//!   name can therefore both succeed; that race is documented behavior.
//! - `update_by_id` and `delete_by_name` treat a missing record as an
//!   ordinary outcome (`None` / `false`), not an error.

use async_trait::async_trait;
use thiserror::Error;

use crate::contact::{Contact, ContactDraft, ContactId};

/// Errors from store operations.
///
/// - **`MissingField`**: a required field was empty on insert
/// - **`Storage`**: underlying database failure; propagates to the
///   hosting runtime's error response, never handled inline
#[derive(Debug, Error)]
pub enum StoreError {
    /// Required field missing on insert
    #[error("missing required field: {field}")]
    MissingField {
        /// The field that was empty
        field: &'static str,
    },

    /// Underlying database failure
    #[error("storage error: {0}")]
    Storage(#[from] sqlx::Error),
}

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Persistence abstraction over the contact collection.
#[async_trait]
pub trait ContactStore: Send + Sync {
    /// All contacts in insertion order.
    async fn find_all(&self) -> StoreResult<Vec<Contact>>;

    /// Lookup by unique name. `None` when no contact matches.
    async fn find_by_name(&self, nama: &str) -> StoreResult<Option<Contact>>;

    /// Insert a new contact, assigning its id.
    ///
    /// # Errors
    ///
    /// Returns `MissingField` when `nama` or `nohp` is empty. Does not
    /// enforce name uniqueness.
    async fn insert(&self, draft: &ContactDraft) -> StoreResult<Contact>;

    /// Overwrite name/phone/email of the contact with the given id.
    ///
    /// Returns the updated record, or `None` when the id does not exist
    /// (a no-op, not an error).
    async fn update_by_id(&self, id: &ContactId, fields: &ContactDraft)
        -> StoreResult<Option<Contact>>;

    /// Delete by name. `true` iff a record was removed.
    async fn delete_by_name(&self, nama: &str) -> StoreResult<bool>;
}
