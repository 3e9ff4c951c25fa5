//! Interactive line-oriented session over the note form.
//!
//! Every recoverable error is printed and the loop keeps reading; only
//! `quit` or end of input ends the session.

use crate::render::{note_row, write_draft, write_notes};
use std::io::{self, BufRead, Write};
use timenote_core::{write_export, FormController, NoteId, NotePersistence, NoteStore};

const HELP: &str = "\
commands:
  start HH:MM     set the draft start time
  end HH:MM       set the draft end time
  text TEXT       set the draft text
  draft           show the current draft
  submit          save the draft (new note or edit)
  edit ID         load a note into the draft
  cancel          discard the draft
  rm ID           delete a note
  clear           delete every note
  list            show all notes
  export DIR      write one file per note into DIR
  help            show this help
  quit            leave the session";

#[derive(Debug, Clone, PartialEq, Eq)]
enum SessionCommand {
    Start(String),
    End(String),
    Text(String),
    Draft,
    Submit,
    Edit(NoteId),
    Cancel,
    Remove(NoteId),
    Clear,
    List,
    Export(String),
    Help,
    Quit,
}

impl SessionCommand {
    fn parse(line: &str) -> Result<Option<Self>, String> {
        let line = line.trim_end_matches(['\r', '\n']);
        let trimmed = line.trim_start();
        if trimmed.is_empty() {
            return Ok(None);
        }
        let (word, rest) = match trimmed.char_indices().find(|(_, c)| c.is_whitespace()) {
            Some((at, separator)) => (&trimmed[..at], &trimmed[at + separator.len_utf8()..]),
            None => (trimmed, ""),
        };

        let command = match word {
            "start" => Self::Start(rest.trim().to_string()),
            "end" => Self::End(rest.trim().to_string()),
            // text is kept as typed; only the separator is consumed
            "text" => Self::Text(rest.to_string()),
            "draft" => Self::Draft,
            "submit" => Self::Submit,
            "edit" => Self::Edit(parse_id(rest)?),
            "cancel" => Self::Cancel,
            "rm" => Self::Remove(parse_id(rest)?),
            "clear" => Self::Clear,
            "list" => Self::List,
            "export" if !rest.trim().is_empty() => Self::Export(rest.trim().to_string()),
            "export" => return Err("usage: export DIR".to_string()),
            "help" => Self::Help,
            "quit" | "exit" => Self::Quit,
            other => return Err(format!("unknown command `{other}`; type `help`")),
        };
        Ok(Some(command))
    }
}

fn parse_id(value: &str) -> Result<NoteId, String> {
    value
        .trim()
        .parse()
        .map_err(|_| format!("`{}` is not a note id", value.trim()))
}

/// Reads commands from `input` until `quit` or end of input.
pub fn run_session<P: NotePersistence>(
    input: impl BufRead,
    out: &mut impl Write,
    store: &mut NoteStore<P>,
) -> io::Result<()> {
    let mut form = FormController::new();
    writeln!(out, "timenote session; type `help` for commands")?;

    for line in input.lines() {
        let line = line?;
        let command = match SessionCommand::parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                writeln!(out, "error: {message}")?;
                continue;
            }
        };
        if command == SessionCommand::Quit {
            break;
        }
        apply(command, &mut form, store, out)?;
    }
    Ok(())
}

fn apply<P: NotePersistence>(
    command: SessionCommand,
    form: &mut FormController,
    store: &mut NoteStore<P>,
    out: &mut impl Write,
) -> io::Result<()> {
    match command {
        SessionCommand::Start(value) => form.set_start_time(value),
        SessionCommand::End(value) => form.set_end_time(value),
        SessionCommand::Text(value) => form.set_text(value),
        SessionCommand::Draft => write_draft(out, form.draft())?,
        SessionCommand::Submit => match form.submit(store) {
            Ok(note) => writeln!(out, "saved {}", note_row(&note))?,
            Err(err) => writeln!(out, "error: {err}")?,
        },
        SessionCommand::Edit(id) => match store.get(id) {
            Some(note) => {
                form.begin_edit(note);
                write_draft(out, form.draft())?;
            }
            None => writeln!(out, "error: no note with id {id}")?,
        },
        SessionCommand::Cancel => {
            form.cancel_edit();
            writeln!(out, "draft cleared")?;
        }
        SessionCommand::Remove(id) => {
            if store.remove(id) {
                writeln!(out, "removed {id}")?;
            } else {
                writeln!(out, "error: no note with id {id}")?;
            }
        }
        SessionCommand::Clear => {
            store.clear();
            writeln!(out, "all notes cleared")?;
        }
        SessionCommand::List => write_notes(out, store.list())?,
        SessionCommand::Export(dir) => match write_export(store.list(), &dir) {
            Ok(written) => writeln!(out, "exported {} note(s) to {dir}", written.len())?,
            Err(err) => writeln!(out, "error: export failed: {err}")?,
        },
        SessionCommand::Help => writeln!(out, "{HELP}")?,
        SessionCommand::Quit => {}
    }
    Ok(())
}
