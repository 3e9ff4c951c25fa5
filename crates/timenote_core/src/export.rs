//! Plain-text export of the note list.
//!
//! # Responsibility
//! - Project notes into `"<start> - <end> <duration>h <text>"` lines.
//! - Write one file per note into a target directory.
//!
//! # Invariants
//! - Export is read-only with respect to the note store.
//! - File names are unique per note (`timenote-<HHMM>-<id>.txt`).

use crate::model::note::Note;
use log::{error, info};
use std::path::{Path, PathBuf};

/// One exported note: target file name plus its single line of content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExportEntry {
    pub file_name: String,
    pub line: String,
}

/// Formats a single note as an export line.
pub fn export_line(note: &Note) -> String {
    format!(
        "{} - {} {}h {}",
        note.start_time,
        note.end_time,
        note.duration_label(),
        note.text
    )
}

/// Builds one export entry per note, preserving list order.
pub fn export_entries(notes: &[Note]) -> Vec<ExportEntry> {
    notes
        .iter()
        .map(|note| ExportEntry {
            file_name: format!(
                "timenote-{:02}{:02}-{}.txt",
                note.start_time.hour(),
                note.start_time.minute(),
                note.id
            ),
            line: export_line(note),
        })
        .collect()
}

/// Writes every entry into `dir`, creating it when missing.
///
/// Returns the written paths in list order.
pub fn write_export(notes: &[Note], dir: impl AsRef<Path>) -> std::io::Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    std::fs::create_dir_all(dir)?;

    let mut written = Vec::with_capacity(notes.len());
    for entry in export_entries(notes) {
        let path = dir.join(&entry.file_name);
        if let Err(err) = std::fs::write(&path, format!("{}\n", entry.line)) {
            error!(
                "event=export_write module=export status=error file={} error={}",
                entry.file_name, err
            );
            return Err(err);
        }
        written.push(path);
    }

    info!(
        "event=export_write module=export status=ok count={}",
        written.len()
    );
    Ok(written)
}
