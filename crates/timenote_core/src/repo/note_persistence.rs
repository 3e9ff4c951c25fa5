//! Note persistence adapter over a named blob.
//!
//! # Responsibility
//! - Serialize the full note collection into one JSON array blob.
//! - Restore the collection at startup, dropping entries that cannot be used.
//!
//! # Invariants
//! - `load`/`save` never fail the caller; failures are logged and absorbed.
//! - Loaded collections satisfy every `Note` invariant and are sorted by
//!   start time.
//! - Note text never appears in log output.

use crate::model::note::{Note, NoteId, MAX_NOTE_ID};
use crate::repo::blob_store::{BlobStore, BlobStoreError};
use log::{debug, error, warn};
use serde_json::Value;
use std::collections::HashSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Blob key used by the current note shape.
///
/// Changing the persisted shape requires picking a new key.
pub const DEFAULT_STORAGE_KEY: &str = "timenotes_v3";

pub type PersistResult<T> = Result<T, PersistenceError>;

/// Persistence failure taxonomy.
#[derive(Debug)]
pub enum PersistenceError {
    /// Blob could not be read from the backing store.
    ReadFailure(BlobStoreError),
    /// Blob exists but is not a JSON array.
    Unparsable(serde_json::Error),
    /// Blob could not be written to the backing store.
    WriteFailure(BlobStoreError),
    /// Collection could not be serialized.
    Encode(serde_json::Error),
}

impl Display for PersistenceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ReadFailure(err) => write!(f, "failed to read notes: {err}"),
            Self::Unparsable(err) => write!(f, "stored notes are not a JSON array: {err}"),
            Self::WriteFailure(err) => write!(f, "failed to write notes: {err}"),
            Self::Encode(err) => write!(f, "failed to encode notes: {err}"),
        }
    }
}

impl Error for PersistenceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::ReadFailure(err) | Self::WriteFailure(err) => Some(err),
            Self::Unparsable(err) | Self::Encode(err) => Some(err),
        }
    }
}

impl PersistenceError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::ReadFailure(_) => "read_failed",
            Self::Unparsable(_) => "blob_unparsable",
            Self::WriteFailure(_) => "write_failed",
            Self::Encode(_) => "encode_failed",
        }
    }
}

/// Best-effort persistence collaborator injected into `NoteStore`.
pub trait NotePersistence {
    /// Restores the last saved collection, or an empty one.
    fn load(&self) -> Vec<Note>;
    /// Overwrites the saved collection.
    fn save(&self, notes: &[Note]);
}

/// Persistence that keeps nothing; every load starts empty.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoPersistence;

impl NotePersistence for NoPersistence {
    fn load(&self) -> Vec<Note> {
        Vec::new()
    }

    fn save(&self, _notes: &[Note]) {}
}

/// JSON-array-in-a-blob adapter.
pub struct BlobNotePersistence<B: BlobStore> {
    blobs: B,
    key: String,
}

impl<B: BlobStore> BlobNotePersistence<B> {
    /// Creates an adapter using `DEFAULT_STORAGE_KEY`.
    pub fn new(blobs: B) -> Self {
        Self::with_key(blobs, DEFAULT_STORAGE_KEY)
    }

    pub fn with_key(blobs: B, key: impl Into<String>) -> Self {
        Self {
            blobs,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Loads notes, surfacing storage-level failures to the caller.
    ///
    /// Individual entries that fail to decode or violate note invariants are
    /// dropped and logged; only blob-level problems are errors.
    pub fn try_load(&self) -> PersistResult<Vec<Note>> {
        let Some(raw) = self
            .blobs
            .read(&self.key)
            .map_err(PersistenceError::ReadFailure)?
        else {
            debug!(
                "event=notes_load module=repo status=empty key={}",
                self.key
            );
            return Ok(Vec::new());
        };

        let entries: Vec<Value> =
            serde_json::from_str(&raw).map_err(PersistenceError::Unparsable)?;
        let total = entries.len();
        let notes = decode_entries(entries);
        if notes.len() != total {
            warn!(
                "event=notes_load module=repo status=partial key={} kept={} dropped={}",
                self.key,
                notes.len(),
                total - notes.len()
            );
        }
        Ok(notes)
    }

    /// Serializes and writes the full collection.
    pub fn try_save(&self, notes: &[Note]) -> PersistResult<()> {
        let encoded = serde_json::to_string(notes).map_err(PersistenceError::Encode)?;
        self.blobs
            .write(&self.key, &encoded)
            .map_err(PersistenceError::WriteFailure)
    }
}

impl<B: BlobStore> NotePersistence for BlobNotePersistence<B> {
    fn load(&self) -> Vec<Note> {
        match self.try_load() {
            Ok(notes) => {
                debug!(
                    "event=notes_load module=repo status=ok key={} count={}",
                    self.key,
                    notes.len()
                );
                notes
            }
            Err(err) => {
                warn!(
                    "event=notes_load module=repo status=error key={} error_code={} error={}",
                    self.key,
                    err.error_code(),
                    err
                );
                Vec::new()
            }
        }
    }

    fn save(&self, notes: &[Note]) {
        match self.try_save(notes) {
            Ok(()) => debug!(
                "event=notes_save module=repo status=ok key={} count={}",
                self.key,
                notes.len()
            ),
            Err(err) => error!(
                "event=notes_save module=repo status=error key={} count={} error_code={} error={}",
                self.key,
                notes.len(),
                err.error_code(),
                err
            ),
        }
    }
}

fn decode_entries(entries: Vec<Value>) -> Vec<Note> {
    let mut seen: HashSet<NoteId> = HashSet::new();
    let mut notes = Vec::with_capacity(entries.len());

    for (index, entry) in entries.into_iter().enumerate() {
        let note: Note = match serde_json::from_value(entry) {
            Ok(note) => note,
            Err(err) => {
                warn!("event=note_decode module=repo status=dropped index={index} error={err}");
                continue;
            }
        };
        if let Err(err) = note.validate() {
            warn!(
                "event=note_decode module=repo status=dropped index={index} id={} error={err}",
                note.id
            );
            continue;
        }
        if note.id > MAX_NOTE_ID {
            warn!(
                "event=note_decode module=repo status=dropped index={index} id={} error=id_out_of_range",
                note.id
            );
            continue;
        }
        if !seen.insert(note.id) {
            warn!(
                "event=note_decode module=repo status=dropped index={index} id={} error=duplicate_id",
                note.id
            );
            continue;
        }
        notes.push(note);
    }

    notes.sort_by_key(|note| note.start_time);
    notes
}
