//! Contact store contract tests against the SQLite implementation.
//!
//! Every test runs on a private in-memory database; nothing touches the
//! filesystem.

#![forbid(unsafe_code)]

use kontak_core::{ContactDraft, ContactStore, SqliteContactStore, StoreError};

async fn store() -> SqliteContactStore {
    SqliteContactStore::open_in_memory()
        .await
        .expect("in-memory store opens")
}

fn draft(nama: &str, nohp: &str, email: &str) -> ContactDraft {
    ContactDraft::new(nama, nohp, email)
}

#[tokio::test]
async fn insert_assigns_id_and_roundtrips() {
    let store = store().await;
    let inserted = store
        .insert(&draft("Rudi", "081234567890", "rudi@x.com"))
        .await
        .expect("insert");

    let found = store
        .find_by_name("Rudi")
        .await
        .expect("lookup")
        .expect("present");
    assert_eq!(found, inserted);
    assert_eq!(found.email.as_deref(), Some("rudi@x.com"));
}

#[tokio::test]
async fn insert_requires_nama_and_nohp() {
    let store = store().await;
    assert!(matches!(
        store.insert(&draft("", "081234567890", "")).await,
        Err(StoreError::MissingField { field: "nama" })
    ));
    assert!(matches!(
        store.insert(&draft("Rudi", "", "")).await,
        Err(StoreError::MissingField { field: "nohp" })
    ));
}

#[tokio::test]
async fn blank_email_is_stored_as_absent() {
    let store = store().await;
    store
        .insert(&draft("Sari", "081234567891", ""))
        .await
        .expect("insert");
    let found = store
        .find_by_name("Sari")
        .await
        .expect("lookup")
        .expect("present");
    assert_eq!(found.email, None);
}

#[tokio::test]
async fn find_all_preserves_insertion_order() {
    let store = store().await;
    for (nama, nohp) in [
        ("Rudi", "081234567890"),
        ("Sari", "081234567891"),
        ("Adli", "081234567892"),
    ] {
        store.insert(&draft(nama, nohp, "")).await.expect("insert");
    }
    let all = store.find_all().await.expect("find_all");
    let names: Vec<_> = all.iter().map(|c| c.nama.as_str()).collect();
    assert_eq!(names, vec!["Rudi", "Sari", "Adli"]);
}

#[tokio::test]
async fn update_by_id_overwrites_fields_and_keeps_id() {
    let store = store().await;
    let rudi = store
        .insert(&draft("Rudi", "081234567890", "rudi@x.com"))
        .await
        .expect("insert");

    let updated = store
        .update_by_id(&rudi.id, &draft("Rudi", "081299999999", "baru@x.com"))
        .await
        .expect("update")
        .expect("id exists");
    assert_eq!(updated.id, rudi.id);
    assert_eq!(updated.nohp, "081299999999");

    let found = store
        .find_by_name("Rudi")
        .await
        .expect("lookup")
        .expect("present");
    assert_eq!(found.email.as_deref(), Some("baru@x.com"));
}

#[tokio::test]
async fn update_of_unknown_id_is_a_noop() {
    let store = store().await;
    let ghost = kontak_core::ContactId::generate();
    let result = store
        .update_by_id(&ghost, &draft("Rudi", "081234567890", ""))
        .await
        .expect("update runs");
    assert!(result.is_none());
    assert!(store.find_all().await.expect("find_all").is_empty());
}

#[tokio::test]
async fn delete_by_name_is_idempotent() {
    let store = store().await;
    store
        .insert(&draft("Rudi", "081234567890", ""))
        .await
        .expect("insert");

    assert!(store.delete_by_name("Rudi").await.expect("first delete"));
    // Second delete: nothing matched, still not an error.
    assert!(!store.delete_by_name("Rudi").await.expect("second delete"));
    assert!(store.find_all().await.expect("find_all").is_empty());
}

#[tokio::test]
async fn store_does_not_enforce_name_uniqueness() {
    // Uniqueness is the validation layer's job; the store accepts
    // duplicates so the documented race stays observable.
    let store = store().await;
    store
        .insert(&draft("Rudi", "081234567890", ""))
        .await
        .expect("first insert");
    store
        .insert(&draft("Rudi", "081234567891", ""))
        .await
        .expect("duplicate insert");
    assert_eq!(store.find_all().await.expect("find_all").len(), 2);
}
