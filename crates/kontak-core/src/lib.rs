//! # Kontak Core
//!
//! Domain layer for the Kontak contact-management application,
//! independent of the HTTP surface.
//!
//! ## Module Structure
//!
//! - [`contact`] - The `Contact` record, its id newtype, and the
//!   unvalidated `ContactDraft` form submission
//! - [`store`] - The `ContactStore` repository trait and error taxonomy
//! - [`sqlite`] - `SQLx`-backed store implementation with an embedded
//!   schema
//! - [`validation`] - Synchronous format validators plus the
//!   asynchronous name-uniqueness check; failures are collected, not
//!   short-circuited
//! - [`session`] - Session store with inactivity expiry and the
//!   one-shot flash message queue
//!
//! ## Design Principles
//!
//! - **Parse at boundaries**: ids and drafts are validated where they
//!   enter; domain code never re-checks
//! - **Traits at the seams**: handlers depend on `ContactStore`, which
//!   keeps them testable against an in-memory database
//! - **Expected failures are values**: validation errors are an ordered
//!   `Vec<FieldError>` handed back to the form, never a panic

#![forbid(unsafe_code)]

pub mod contact;
pub mod session;
pub mod sqlite;
pub mod store;
pub mod validation;

pub use contact::{Contact, ContactDraft, ContactId, ContactIdError};
pub use session::{SessionId, SessionStore};
pub use sqlite::SqliteContactStore;
pub use store::{ContactStore, StoreError, StoreResult};
pub use validation::{
    validate_email, validate_phone_id, validate_submission, FieldError, SubmissionMode,
};
