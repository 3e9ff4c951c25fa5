//! Terminal rendering of notes and drafts.

use std::io::{self, Write};
use timenote_core::{Draft, DraftMode, Note};

pub fn note_row(note: &Note) -> String {
    format!(
        "{:>13}  {} - {}  {:>6}h  {}",
        note.id,
        note.start_time,
        note.end_time,
        note.duration_label(),
        note.text
    )
}

pub fn write_notes(out: &mut impl Write, notes: &[Note]) -> io::Result<()> {
    if notes.is_empty() {
        return writeln!(out, "No notes yet.");
    }
    for note in notes {
        writeln!(out, "{}", note_row(note))?;
    }
    Ok(())
}

pub fn write_draft(out: &mut impl Write, draft: &Draft) -> io::Result<()> {
    let mode = match draft.mode {
        DraftMode::Idle => "new note".to_string(),
        DraftMode::Editing(id) => format!("editing {id}"),
    };
    writeln!(
        out,
        "[{mode}] start={:?} end={:?} text={:?}",
        draft.start_time, draft.end_time, draft.text
    )
}

#[cfg(test)]
mod tests {
    use super::{note_row, write_notes};
    use timenote_core::{Note, TimeOfDay};

    #[test]
    fn row_shows_times_duration_and_text() {
        let note = Note::new(
            3,
            TimeOfDay::parse("09:00").unwrap(),
            TimeOfDay::parse("10:30").unwrap(),
            "write spec",
        );
        let row = note_row(&note);
        assert!(row.contains("09:00 - 10:30"));
        assert!(row.contains("1.5h"));
        assert!(row.ends_with("write spec"));
    }

    #[test]
    fn empty_list_prints_placeholder() {
        let mut out = Vec::new();
        write_notes(&mut out, &[]).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "No notes yet.\n");
    }
}
