//! Core domain logic for TimeNote.
//! This crate is the single source of truth for note invariants.

pub mod config;
pub mod db;
pub mod export;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use config::{AppConfig, ConfigError};
pub use export::{export_entries, export_line, write_export, ExportEntry};
pub use logging::{default_log_level, init_logging, logging_status, LogLevel, LoggingError};
pub use model::note::{format_hours, Note, NoteId, NoteValidationError, MAX_NOTE_ID};
pub use model::time_of_day::{TimeOfDay, TimeParseError};
pub use repo::blob_store::{
    BlobResult, BlobStore, BlobStoreError, MemoryBlobStore, SqliteBlobStore,
};
pub use repo::note_persistence::{
    BlobNotePersistence, NoPersistence, NotePersistence, PersistResult, PersistenceError,
    DEFAULT_STORAGE_KEY,
};
pub use service::form::{
    validate_draft, Draft, DraftField, DraftMode, FormController, FormError, ValidDraft,
};
pub use service::note_store::{NoteStore, StoreError, StoreResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
