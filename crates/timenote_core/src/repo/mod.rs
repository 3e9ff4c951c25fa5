//! Persistence layer: named blob storage plus the note adapter on top.
//!
//! # Responsibility
//! - Define the key-value blob seam (`BlobStore`) and its backends.
//! - Isolate JSON encoding and SQLite details from the note store.
//!
//! # Invariants
//! - Persistence failures are never fatal to callers of `NotePersistence`.

pub mod blob_store;
pub mod note_persistence;
