//! Command-line surface of the `timenote` binary.
//!
//! # Responsibility
//! - Declare global flags and one-shot subcommands.
//!
//! # Invariants
//! - Every flag overrides its `TIMENOTE_*` environment counterpart.
//! - Times and text are passed through raw; the note form validates them.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use timenote_core::NoteId;

#[derive(Debug, Parser)]
#[command(name = "timenote", version, about = "Record what you did between two times of day")]
pub struct Cli {
    /// SQLite file holding the notes blob (overrides TIMENOTE_DB_PATH).
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Blob key the notes are stored under (overrides TIMENOTE_STORAGE_KEY).
    #[arg(long, global = true)]
    pub key: Option<String>,

    /// trace|debug|info|warn|error (overrides TIMENOTE_LOG_LEVEL).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Absolute directory for rolling log files (overrides TIMENOTE_LOG_DIR).
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Record a new note.
    Add {
        #[arg(long)]
        start: String,
        #[arg(long)]
        end: String,
        #[arg(long)]
        text: String,
    },
    /// Replace fields of an existing note; omitted fields keep their value.
    Edit {
        id: NoteId,
        #[arg(long)]
        start: Option<String>,
        #[arg(long)]
        end: Option<String>,
        #[arg(long)]
        text: Option<String>,
    },
    /// Delete one note.
    Rm { id: NoteId },
    /// Delete every note.
    Clear,
    /// Print all notes in start-time order (default).
    List,
    /// Write one text file per note into a directory.
    Export {
        #[arg(long)]
        dir: PathBuf,
    },
    /// Interactive session driving the note form.
    Session,
}
