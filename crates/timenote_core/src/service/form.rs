//! Form controller: transient draft input and its validation.
//!
//! # Responsibility
//! - Hold raw user input between keystrokes and submit.
//! - Validate a draft into typed note fields before the store sees it.
//! - Route submit to create or update based on the draft mode.
//!
//! # Invariants
//! - A failed submit leaves both the draft and the store untouched.
//! - A successful submit or a cancel resets the draft to empty + `Idle`.
//! - `begin_edit`/`cancel_edit` never touch the store.

use crate::model::note::{Note, NoteId};
use crate::model::time_of_day::{TimeOfDay, TimeParseError};
use crate::repo::note_persistence::NotePersistence;
use crate::service::note_store::{NoteStore, StoreError};
use log::{debug, info};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Draft input fields, used to point at the offending one in errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    StartTime,
    EndTime,
    Text,
}

impl DraftField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::StartTime => "start time",
            Self::EndTime => "end time",
            Self::Text => "text",
        }
    }
}

/// User-correctable submit failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// A required field is empty (text is checked after trimming).
    MissingField(DraftField),
    /// A time field is not a zero-padded `HH:MM` value.
    InvalidTime { field: DraftField, value: String },
    /// End time is not after start time.
    InvalidRange { start: TimeOfDay, end: TimeOfDay },
    /// The note being edited no longer exists.
    NoteNotFound(NoteId),
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(f, "please fill in the {}", field.as_str()),
            Self::InvalidTime { field, value } => write!(
                f,
                "{} `{value}` must be a 24-hour HH:MM value",
                field.as_str()
            ),
            Self::InvalidRange { start, end } => {
                write!(f, "end time ({end}) must be after start time ({start})")
            }
            Self::NoteNotFound(id) => write!(f, "note {id} no longer exists"),
        }
    }
}

impl Error for FormError {}

impl From<StoreError> for FormError {
    fn from(value: StoreError) -> Self {
        match value {
            StoreError::NotFound(id) => Self::NoteNotFound(id),
        }
    }
}

/// Whether submit creates a new note or replaces an existing one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DraftMode {
    #[default]
    Idle,
    Editing(NoteId),
}

/// Raw, unvalidated form input.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Draft {
    pub start_time: String,
    pub end_time: String,
    pub text: String,
    pub mode: DraftMode,
}

impl Draft {
    pub fn is_empty(&self) -> bool {
        self.start_time.is_empty()
            && self.end_time.is_empty()
            && self.text.is_empty()
            && self.mode == DraftMode::Idle
    }
}

/// Typed note fields produced by a successful validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidDraft {
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub text: String,
}

/// Validates draft fields in order: missing, malformed, range.
///
/// Text is checked trimmed but returned as entered.
pub fn validate_draft(draft: &Draft) -> Result<ValidDraft, FormError> {
    if draft.start_time.trim().is_empty() {
        return Err(FormError::MissingField(DraftField::StartTime));
    }
    if draft.end_time.trim().is_empty() {
        return Err(FormError::MissingField(DraftField::EndTime));
    }
    if draft.text.trim().is_empty() {
        return Err(FormError::MissingField(DraftField::Text));
    }

    let start_time = parse_field(DraftField::StartTime, &draft.start_time)?;
    let end_time = parse_field(DraftField::EndTime, &draft.end_time)?;
    if start_time >= end_time {
        return Err(FormError::InvalidRange {
            start: start_time,
            end: end_time,
        });
    }

    Ok(ValidDraft {
        start_time,
        end_time,
        text: draft.text.clone(),
    })
}

fn parse_field(field: DraftField, value: &str) -> Result<TimeOfDay, FormError> {
    TimeOfDay::parse(value).map_err(|err| match err {
        TimeParseError::Empty => FormError::MissingField(field),
        TimeParseError::Malformed(value) => FormError::InvalidTime { field, value },
    })
}

/// Draft holder driving create/update on a `NoteStore`.
#[derive(Debug, Default)]
pub struct FormController {
    draft: Draft,
}

impl FormController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn draft(&self) -> &Draft {
        &self.draft
    }

    pub fn set_start_time(&mut self, value: impl Into<String>) {
        self.draft.start_time = value.into();
    }

    pub fn set_end_time(&mut self, value: impl Into<String>) {
        self.draft.end_time = value.into();
    }

    pub fn set_text(&mut self, value: impl Into<String>) {
        self.draft.text = value.into();
    }

    /// Loads `note` into the draft and switches to `Editing(note.id)`.
    pub fn begin_edit(&mut self, note: &Note) {
        self.draft = Draft {
            start_time: note.start_time.to_string(),
            end_time: note.end_time.to_string(),
            text: note.text.clone(),
            mode: DraftMode::Editing(note.id),
        };
        debug!("event=form_edit module=service status=start id={}", note.id);
    }

    /// Discards the draft, whatever its mode.
    pub fn cancel_edit(&mut self) {
        self.draft = Draft::default();
        debug!("event=form_edit module=service status=cancelled");
    }

    /// Validates the draft and applies it to `store`.
    ///
    /// `Idle` creates a note; `Editing(id)` replaces note `id`.
    pub fn submit<P: NotePersistence>(
        &mut self,
        store: &mut NoteStore<P>,
    ) -> Result<Note, FormError> {
        let valid = match validate_draft(&self.draft) {
            Ok(valid) => valid,
            Err(err) => {
                info!("event=form_submit module=service status=rejected reason={err}");
                return Err(err);
            }
        };

        let note = match self.draft.mode {
            DraftMode::Idle => Self::create(store, valid),
            DraftMode::Editing(id) => Self::update(store, id, valid)?,
        };
        self.draft = Draft::default();
        Ok(note)
    }

    fn create<P: NotePersistence>(store: &mut NoteStore<P>, valid: ValidDraft) -> Note {
        store.add(valid.start_time, valid.end_time, valid.text)
    }

    fn update<P: NotePersistence>(
        store: &mut NoteStore<P>,
        id: NoteId,
        valid: ValidDraft,
    ) -> Result<Note, FormError> {
        Ok(store.update(id, valid.start_time, valid.end_time, valid.text)?)
    }
}
