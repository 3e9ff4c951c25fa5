//! Key-value blob store contracts and implementations.
//!
//! # Responsibility
//! - Provide the local "named blob" storage the note adapter writes into.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - `write` overwrites any prior value under the same key.
//! - `read` of an unknown key is `Ok(None)`, not an error.

use crate::db::DbError;
use rusqlite::{params, Connection, OptionalExtension};
use std::cell::RefCell;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type BlobResult<T> = Result<T, BlobStoreError>;

/// Storage-level failure of a blob read or write.
#[derive(Debug)]
pub enum BlobStoreError {
    Db(DbError),
    /// Backend refused the operation (quota, read-only medium, ...).
    Unavailable(String),
    MissingRequiredTable(&'static str),
}

impl Display for BlobStoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Unavailable(reason) => write!(f, "blob store unavailable: {reason}"),
            Self::MissingRequiredTable(table) => {
                write!(f, "blob store table `{table}` is missing; run migrations first")
            }
        }
    }
}

impl Error for BlobStoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::Unavailable(_) | Self::MissingRequiredTable(_) => None,
        }
    }
}

impl From<DbError> for BlobStoreError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for BlobStoreError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Named string blob storage.
pub trait BlobStore {
    /// Returns the blob stored under `key`, if any.
    fn read(&self, key: &str) -> BlobResult<Option<String>>;
    /// Replaces the blob stored under `key`.
    fn write(&self, key: &str, value: &str) -> BlobResult<()>;
}

impl<B: BlobStore + ?Sized> BlobStore for &B {
    fn read(&self, key: &str) -> BlobResult<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> BlobResult<()> {
        (**self).write(key, value)
    }
}

impl<B: BlobStore + ?Sized> BlobStore for Box<B> {
    fn read(&self, key: &str) -> BlobResult<Option<String>> {
        (**self).read(key)
    }

    fn write(&self, key: &str, value: &str) -> BlobResult<()> {
        (**self).write(key, value)
    }
}

/// SQLite-backed blob store over the migrated `blobs` table.
pub struct SqliteBlobStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBlobStore<'conn> {
    /// Constructs a store from a migrated connection.
    ///
    /// # Errors
    /// - `MissingRequiredTable` when the connection was not opened through
    ///   `open_db`/`open_db_in_memory`.
    pub fn try_new(conn: &'conn Connection) -> BlobResult<Self> {
        let exists: i64 = conn.query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = 'blobs'
            );",
            [],
            |row| row.get(0),
        )?;
        if exists != 1 {
            return Err(BlobStoreError::MissingRequiredTable("blobs"));
        }
        Ok(Self { conn })
    }
}

impl BlobStore for SqliteBlobStore<'_> {
    fn read(&self, key: &str) -> BlobResult<Option<String>> {
        let value = self
            .conn
            .query_row("SELECT value FROM blobs WHERE key = ?1;", [key], |row| {
                row.get::<_, String>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn write(&self, key: &str, value: &str) -> BlobResult<()> {
        self.conn.execute(
            "INSERT INTO blobs (key, value, updated_at)
             VALUES (?1, ?2, strftime('%s', 'now') * 1000)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }
}

/// Process-local blob store; contents vanish with the value.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: RefCell<HashMap<String, String>>,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl BlobStore for MemoryBlobStore {
    fn read(&self, key: &str) -> BlobResult<Option<String>> {
        Ok(self.blobs.borrow().get(key).cloned())
    }

    fn write(&self, key: &str, value: &str) -> BlobResult<()> {
        self.blobs
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::{BlobStore, BlobStoreError, MemoryBlobStore, SqliteBlobStore};
    use crate::db::open_db_in_memory;
    use rusqlite::Connection;

    #[test]
    fn sqlite_store_overwrites_previous_value() {
        let conn = open_db_in_memory().expect("in-memory db should open");
        let store = SqliteBlobStore::try_new(&conn).expect("blobs table should exist");

        assert_eq!(store.read("k").expect("read"), None);
        store.write("k", "first").expect("first write");
        store.write("k", "second").expect("second write");
        assert_eq!(store.read("k").expect("read").as_deref(), Some("second"));
    }

    #[test]
    fn sqlite_store_requires_migrated_connection() {
        let conn = Connection::open_in_memory().expect("raw connection");
        let err = SqliteBlobStore::try_new(&conn)
            .err()
            .expect("unmigrated connection must be rejected");
        assert!(matches!(err, BlobStoreError::MissingRequiredTable("blobs")));
    }

    #[test]
    fn memory_store_keeps_keys_apart() {
        let store = MemoryBlobStore::new();
        store.write("a", "1").expect("write a");
        store.write("b", "2").expect("write b");
        assert_eq!(store.read("a").expect("read a").as_deref(), Some("1"));
        assert_eq!(store.read("b").expect("read b").as_deref(), Some("2"));
        assert_eq!(store.read("c").expect("read c"), None);
    }
}
