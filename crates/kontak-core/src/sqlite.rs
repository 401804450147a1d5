//! SQLite-backed contact store using `SQLx`.
//!
//! This module provides async persistence with:
//! - Connection pooling (no `Arc<Mutex<>>`)
//! - A simple embedded schema (no migration files)
//! - Zero unwraps, zero panics
//!
//! The pool is opened once at process start and cloned into every
//! request handler; `SqliteContactStore` is `Clone` for exactly that.

use async_trait::async_trait;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use crate::contact::{Contact, ContactDraft, ContactId};
use crate::store::{ContactStore, StoreError, StoreResult};

/// Database schema as SQL string - executed once on open.
///
/// `nama` is deliberately NOT declared UNIQUE: the uniqueness invariant
/// lives in the validation layer, matching the store contract.
const SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS contacts (
    id TEXT PRIMARY KEY,
    nama TEXT NOT NULL,
    nohp TEXT NOT NULL,
    email TEXT
);

CREATE INDEX IF NOT EXISTS idx_contacts_nama ON contacts(nama);
";

#[derive(Debug, sqlx::FromRow)]
struct ContactRow {
    id: String,
    nama: String,
    nohp: String,
    email: Option<String>,
}

impl ContactRow {
    fn into_contact(self) -> StoreResult<Contact> {
        let id = ContactId::parse(&self.id).map_err(|_| {
            StoreError::Storage(sqlx::Error::Decode(
                format!("contacts.id is not a UUID: {}", self.id).into(),
            ))
        })?;
        Ok(Contact {
            id,
            nama: self.nama,
            nohp: self.nohp,
            email: self.email,
        })
    }
}

/// Contact store over a pooled SQLite connection.
#[derive(Clone)]
pub struct SqliteContactStore {
    pool: SqlitePool,
}

impl SqliteContactStore {
    /// Open (or create) the database behind a connection string such as
    /// `sqlite://kontak.db?mode=rwc` and initialize the schema.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Storage` when the database cannot be opened
    /// or the schema cannot be applied.
    pub async fn open(url: &str) -> StoreResult<Self> {
        let pool = SqlitePoolOptions::new().connect(url).await?;
        Self::from_pool(pool).await
    }

    /// Open a private in-memory database, used by tests.
    ///
    /// Capped to a single connection: every pooled connection to
    /// `sqlite::memory:` would otherwise see its own empty database.
    pub async fn open_in_memory() -> StoreResult<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        Self::from_pool(pool).await
    }

    async fn from_pool(pool: SqlitePool) -> StoreResult<Self> {
        sqlx::query(SCHEMA).execute(&pool).await?;
        Ok(Self { pool })
    }

    /// Access the underlying connection pool.
    #[must_use]
    pub const fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl ContactStore for SqliteContactStore {
    async fn find_all(&self) -> StoreResult<Vec<Contact>> {
        let rows: Vec<ContactRow> =
            sqlx::query_as("SELECT id, nama, nohp, email FROM contacts ORDER BY rowid")
                .fetch_all(&self.pool)
                .await?;
        rows.into_iter().map(ContactRow::into_contact).collect()
    }

    async fn find_by_name(&self, nama: &str) -> StoreResult<Option<Contact>> {
        let row: Option<ContactRow> =
            sqlx::query_as("SELECT id, nama, nohp, email FROM contacts WHERE nama = ?1")
                .bind(nama)
                .fetch_optional(&self.pool)
                .await?;
        row.map(ContactRow::into_contact).transpose()
    }

    async fn insert(&self, draft: &ContactDraft) -> StoreResult<Contact> {
        if draft.nama.is_empty() {
            return Err(StoreError::MissingField { field: "nama" });
        }
        if draft.nohp.is_empty() {
            return Err(StoreError::MissingField { field: "nohp" });
        }

        let contact = Contact {
            id: ContactId::generate(),
            nama: draft.nama.clone(),
            nohp: draft.nohp.clone(),
            email: draft.email.clone(),
        };
        sqlx::query("INSERT INTO contacts (id, nama, nohp, email) VALUES (?1, ?2, ?3, ?4)")
            .bind(contact.id.as_str())
            .bind(&contact.nama)
            .bind(&contact.nohp)
            .bind(contact.email.as_deref())
            .execute(&self.pool)
            .await?;

        tracing::debug!(id = %contact.id, nama = %contact.nama, "contact inserted");
        Ok(contact)
    }

    async fn update_by_id(
        &self,
        id: &ContactId,
        fields: &ContactDraft,
    ) -> StoreResult<Option<Contact>> {
        let result = sqlx::query("UPDATE contacts SET nama = ?1, nohp = ?2, email = ?3 WHERE id = ?4")
            .bind(&fields.nama)
            .bind(&fields.nohp)
            .bind(fields.email.as_deref())
            .bind(id.as_str())
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        Ok(Some(Contact {
            id: id.clone(),
            nama: fields.nama.clone(),
            nohp: fields.nohp.clone(),
            email: fields.email.clone(),
        }))
    }

    async fn delete_by_name(&self, nama: &str) -> StoreResult<bool> {
        let result = sqlx::query("DELETE FROM contacts WHERE nama = ?1")
            .bind(nama)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
