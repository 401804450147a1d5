//! Form validation for contact submissions.
//!
//! Two kinds of validators, matching the submission workflow:
//!
//! - **Synchronous format validators**: the required-name check, email
//!   address grammar, and the Indonesian mobile-number pattern. Pure
//!   functions over `&str`.
//! - **Asynchronous uniqueness validator**: queries the store for a
//!   contact already holding the submitted name. On edit, a self-rename
//!   (`nama == old_nama`) is allowed; only a rename onto a *different*
//!   existing record is rejected.
//!
//! All validators for one submission run to completion; failures are
//! collected in order (nama, email, nohp) rather than short-circuited,
//! so the form can show every problem at once.
//!
//! The uniqueness check-then-write sequence is not atomic. Two
//! concurrent submissions with the same name can both pass; this race
//! is accepted, not fixed.

use std::sync::OnceLock;

use regex::Regex;

use crate::contact::ContactDraft;
use crate::store::{ContactStore, StoreResult};

/// Rejection message for an empty name.
pub const MSG_REQUIRED_NAME: &str = "Nama is Required!";
/// Rejection message for a duplicate name.
pub const MSG_DUPLICATE_NAME: &str = "Nama contact sudah digunakan!";
/// Rejection message for a malformed email address.
pub const MSG_INVALID_EMAIL: &str = "Email is Invalid!";
/// Rejection message for a malformed phone number on the add form.
pub const MSG_INVALID_PHONE: &str = "No Handphone is Invalid!";
/// Rejection message for a malformed phone number on the edit form.
pub const MSG_INVALID_PHONE_EDIT: &str = "No Hp is Invalid!";

/// A single field-level validation failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    /// The offending form field (`nama`, `email`, `nohp`)
    pub field: &'static str,
    /// Human-readable message shown inline on the form
    pub message: String,
}

impl FieldError {
    fn new(field: &'static str, message: &str) -> Self {
        Self {
            field,
            message: message.to_string(),
        }
    }
}

/// How the uniqueness validator treats the submitted name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionMode {
    /// New contact: any existing holder of the name is a conflict.
    Add,
    /// Edit of an existing contact: only a rename onto another record
    /// conflicts; keeping the old name is fine.
    Edit {
        /// The record's name before this submission
        old_nama: String,
    },
}

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Deliberately permissive: local part, one '@', dotted domain.
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"))
}

fn phone_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Indonesian mobile: +62/62 or a leading 0, operator prefix 8x,
    // then 7-10 subscriber digits (10-13 digits in national form).
    RE.get_or_init(|| Regex::new(r"^(\+62|62|0)8[1-9][0-9]{7,10}$").expect("phone pattern is valid"))
}

/// Whether `value` is a syntactically valid email address.
#[must_use]
pub fn validate_email(value: &str) -> bool {
    email_re().is_match(value)
}

/// Whether `value` is a plausible Indonesian mobile number.
#[must_use]
pub fn validate_phone_id(value: &str) -> bool {
    phone_re().is_match(value)
}

/// Run every validator for one submission against the store.
///
/// Returns the ordered list of failures; an empty list means the
/// submission is accepted. Store lookups can fail, hence the outer
/// `StoreResult`.
///
/// # Errors
///
/// Returns `StoreError::Storage` when the uniqueness lookup fails.
pub async fn validate_submission(
    store: &dyn ContactStore,
    draft: &ContactDraft,
    mode: &SubmissionMode,
) -> StoreResult<Vec<FieldError>> {
    let mut errors = Vec::new();

    // An empty name is a form error, never a store error: it must
    // re-render the form, not surface as a failed insert.
    if draft.nama.is_empty() {
        errors.push(FieldError::new("nama", MSG_REQUIRED_NAME));
    } else {
        let renaming = match mode {
            SubmissionMode::Add => true,
            SubmissionMode::Edit { old_nama } => draft.nama != *old_nama,
        };
        if renaming && store.find_by_name(&draft.nama).await?.is_some() {
            errors.push(FieldError::new("nama", MSG_DUPLICATE_NAME));
        }
    }

    if let Some(email) = &draft.email {
        if !validate_email(email) {
            errors.push(FieldError::new("email", MSG_INVALID_EMAIL));
        }
    }

    if !validate_phone_id(&draft.nohp) {
        let message = match mode {
            SubmissionMode::Add => MSG_INVALID_PHONE,
            SubmissionMode::Edit { .. } => MSG_INVALID_PHONE_EDIT,
        };
        errors.push(FieldError::new("nohp", message));
    }

    Ok(errors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sqlite::SqliteContactStore;

    // =========================================================================
    // Format validators
    // =========================================================================

    #[test]
    fn valid_emails() {
        assert!(validate_email("rudi@x.com"));
        assert!(validate_email("a.b+c@mail.example.org"));
    }

    #[test]
    fn invalid_emails() {
        assert!(!validate_email(""));
        assert!(!validate_email("rudi"));
        assert!(!validate_email("rudi@x"));
        assert!(!validate_email("rudi@@x.com"));
        assert!(!validate_email("ru di@x.com"));
    }

    #[test]
    fn valid_indonesian_mobile_numbers() {
        assert!(validate_phone_id("081234567890"));
        assert!(validate_phone_id("0812345678"));
        assert!(validate_phone_id("+6281234567890"));
        assert!(validate_phone_id("6281234567890"));
    }

    /// GIVEN: Phone numbers outside the Indonesian mobile shape
    /// WHEN: Validating
    /// THEN: Validation fails
    #[test]
    fn invalid_indonesian_mobile_numbers() {
        // Too long
        assert!(!validate_phone_id("0812345678901234"));
        // Too short
        assert!(!validate_phone_id("08123456"));
        // Not a mobile prefix
        assert!(!validate_phone_id("021234567890"));
        // Letters
        assert!(!validate_phone_id("08123abc7890"));
        assert!(!validate_phone_id(""));
    }

    // =========================================================================
    // Submission validation against the store
    // =========================================================================

    async fn seeded_store() -> SqliteContactStore {
        let store = SqliteContactStore::open_in_memory()
            .await
            .expect("in-memory store");
        store
            .insert(&ContactDraft::new("Rudi", "081234567890", "rudi@x.com"))
            .await
            .expect("seed insert");
        store
    }

    #[tokio::test]
    async fn add_with_duplicate_name_is_rejected() {
        let store = seeded_store().await;
        let draft = ContactDraft::new("Rudi", "081234567891", "");
        let errors = validate_submission(&store, &draft, &SubmissionMode::Add)
            .await
            .expect("validation ran");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "nama");
        assert_eq!(errors[0].message, MSG_DUPLICATE_NAME);
    }

    #[tokio::test]
    async fn self_rename_is_allowed() {
        let store = seeded_store().await;
        let draft = ContactDraft::new("Rudi", "081234567890", "new@x.com");
        let mode = SubmissionMode::Edit {
            old_nama: "Rudi".to_string(),
        };
        let errors = validate_submission(&store, &draft, &mode)
            .await
            .expect("validation ran");
        assert!(errors.is_empty());
    }

    #[tokio::test]
    async fn rename_onto_existing_record_is_rejected() {
        let store = seeded_store().await;
        store
            .insert(&ContactDraft::new("Sari", "081234567891", ""))
            .await
            .expect("second insert");
        let draft = ContactDraft::new("Rudi", "081234567891", "");
        let mode = SubmissionMode::Edit {
            old_nama: "Sari".to_string(),
        };
        let errors = validate_submission(&store, &draft, &mode)
            .await
            .expect("validation ran");
        assert_eq!(errors[0].field, "nama");
    }

    #[tokio::test]
    async fn failures_are_collected_not_short_circuited() {
        let store = seeded_store().await;
        // Duplicate name, bad email, bad phone: all three reported, in order.
        let draft = ContactDraft::new("Rudi", "12345", "not-an-email");
        let errors = validate_submission(&store, &draft, &SubmissionMode::Add)
            .await
            .expect("validation ran");
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["nama", "email", "nohp"]);
    }

    #[tokio::test]
    async fn empty_name_is_a_field_error() {
        // Must never reach the store's required-field check; the form
        // re-renders instead of the request failing outright.
        let store = seeded_store().await;
        let draft = ContactDraft::new("", "081234567890", "");
        let errors = validate_submission(&store, &draft, &SubmissionMode::Add)
            .await
            .expect("validation ran");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "nama");
        assert_eq!(errors[0].message, MSG_REQUIRED_NAME);
    }

    #[tokio::test]
    async fn edit_mode_uses_its_own_phone_message() {
        let store = seeded_store().await;
        let draft = ContactDraft::new("Rudi", "12345", "");
        let mode = SubmissionMode::Edit {
            old_nama: "Rudi".to_string(),
        };
        let errors = validate_submission(&store, &draft, &mode)
            .await
            .expect("validation ran");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].message, MSG_INVALID_PHONE_EDIT);

        let add_errors = validate_submission(&store, &draft, &SubmissionMode::Add)
            .await
            .expect("validation ran");
        assert!(add_errors.iter().any(|e| e.message == MSG_INVALID_PHONE));
    }

    #[tokio::test]
    async fn absent_email_is_not_validated() {
        let store = seeded_store().await;
        let draft = ContactDraft::new("Sari", "081234567891", "");
        let errors = validate_submission(&store, &draft, &SubmissionMode::Add)
            .await
            .expect("validation ran");
        assert!(errors.is_empty());
    }
}
