//! Contact domain types.
//!
//! # Parse-at-Boundaries Pattern
//!
//! [`ContactId`] validates its input on construction: a contact id is
//! always a well-formed UUID string, assigned by the store on insert and
//! immutable thereafter. Code downstream of the boundary never has to
//! re-check it.
//!
//! [`ContactDraft`] is the untrusted side of the boundary: the raw form
//! submission as received, whitespace-trimmed but otherwise unchecked.
//! The validation layer consumes a draft; the store turns an accepted
//! draft into a [`Contact`].

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Error for contact id validation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ContactIdError {
    /// Id is empty or whitespace-only
    #[error("contact id cannot be empty")]
    Empty,

    /// Id is not a well-formed UUID
    #[error("contact id is not a valid UUID: {value}")]
    InvalidFormat {
        /// The value that failed validation
        value: String,
    },
}

/// Opaque unique identifier for a contact.
///
/// Assigned by the store on insert; stable across renames and edits.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContactId(String);

impl ContactId {
    /// Generate a fresh id.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Parse an id received from the outside (form body, database row).
    ///
    /// # Errors
    ///
    /// Returns `ContactIdError::Empty` for empty input and
    /// `ContactIdError::InvalidFormat` when the value is not a UUID.
    pub fn parse(value: &str) -> Result<Self, ContactIdError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(ContactIdError::Empty);
        }
        Uuid::parse_str(trimmed)
            .map(|u| Self(u.to_string()))
            .map_err(|_| ContactIdError::InvalidFormat {
                value: trimmed.to_string(),
            })
    }

    /// Access the underlying string form.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContactId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// A persisted contact record.
///
/// Field names follow the wire format of the application (`nama`,
/// `nohp`, `email`); `email` is the only optional field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contact {
    /// Store-assigned identifier
    pub id: ContactId,
    /// Contact name, unique across the collection
    pub nama: String,
    /// Indonesian mobile number
    pub nohp: String,
    /// Email address, absent when the form left it blank
    pub email: Option<String>,
}

/// An unvalidated contact submission.
///
/// Produced from a form body; whitespace is trimmed and a blank email
/// becomes `None` so "optional" means one thing everywhere.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactDraft {
    pub nama: String,
    pub nohp: String,
    pub email: Option<String>,
}

impl ContactDraft {
    /// Build a draft from raw form fields.
    #[must_use]
    pub fn new(nama: &str, nohp: &str, email: &str) -> Self {
        let email = email.trim();
        Self {
            nama: nama.trim().to_string(),
            nohp: nohp.trim().to_string(),
            email: if email.is_empty() {
                None
            } else {
                Some(email.to_string())
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_ids_are_valid_and_unique() {
        let a = ContactId::generate();
        let b = ContactId::generate();
        assert_ne!(a, b);
        assert!(ContactId::parse(a.as_str()).is_ok());
    }

    #[test]
    fn parse_rejects_empty_and_garbage() {
        assert_eq!(ContactId::parse("  "), Err(ContactIdError::Empty));
        assert!(matches!(
            ContactId::parse("not-a-uuid"),
            Err(ContactIdError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn draft_trims_and_normalizes_blank_email() {
        let draft = ContactDraft::new(" Rudi ", " 081234567890 ", "   ");
        assert_eq!(draft.nama, "Rudi");
        assert_eq!(draft.nohp, "081234567890");
        assert_eq!(draft.email, None);

        let with_email = ContactDraft::new("Rudi", "081234567890", "rudi@x.com");
        assert_eq!(with_email.email.as_deref(), Some("rudi@x.com"));
    }
}
