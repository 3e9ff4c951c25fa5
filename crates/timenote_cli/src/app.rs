//! One-shot command execution against an open note store.

use crate::cli::Command;
use crate::render::{note_row, write_notes};
use crate::session::run_session;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::io::{self, BufRead, Write};
use timenote_core::{write_export, FormController, FormError, NoteId, NotePersistence, NoteStore};

#[derive(Debug)]
pub enum AppError {
    Form(FormError),
    NoteNotFound(NoteId),
    Export(io::Error),
    Io(io::Error),
}

impl Display for AppError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Form(err) => write!(f, "{err}"),
            Self::NoteNotFound(id) => write!(f, "no note with id {id}"),
            Self::Export(err) => write!(f, "export failed: {err}"),
            Self::Io(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AppError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Form(err) => Some(err),
            Self::Export(err) | Self::Io(err) => Some(err),
            Self::NoteNotFound(_) => None,
        }
    }
}

impl From<FormError> for AppError {
    fn from(value: FormError) -> Self {
        Self::Form(value)
    }
}

impl From<io::Error> for AppError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// Runs one command; `Session` reads further commands from `input`.
pub fn execute<P: NotePersistence>(
    command: Command,
    store: &mut NoteStore<P>,
    input: impl BufRead,
    out: &mut impl Write,
) -> Result<(), AppError> {
    match command {
        Command::Add { start, end, text } => {
            let mut form = FormController::new();
            form.set_start_time(start);
            form.set_end_time(end);
            form.set_text(text);
            let note = form.submit(store)?;
            writeln!(out, "added {}", note_row(&note))?;
        }
        Command::Edit {
            id,
            start,
            end,
            text,
        } => {
            let note = store.get(id).cloned().ok_or(AppError::NoteNotFound(id))?;
            let mut form = FormController::new();
            form.begin_edit(&note);
            if let Some(start) = start {
                form.set_start_time(start);
            }
            if let Some(end) = end {
                form.set_end_time(end);
            }
            if let Some(text) = text {
                form.set_text(text);
            }
            let updated = form.submit(store)?;
            writeln!(out, "updated {}", note_row(&updated))?;
        }
        Command::Rm { id } => {
            if !store.remove(id) {
                return Err(AppError::NoteNotFound(id));
            }
            writeln!(out, "removed {id}")?;
        }
        Command::Clear => {
            let count = store.len();
            store.clear();
            writeln!(out, "cleared {count} note(s)")?;
        }
        Command::List => write_notes(out, store.list())?,
        Command::Export { dir } => {
            let written = write_export(store.list(), &dir).map_err(AppError::Export)?;
            writeln!(out, "exported {} note(s) to {}", written.len(), dir.display())?;
        }
        Command::Session => run_session(input, out, store)?,
    }
    Ok(())
}
