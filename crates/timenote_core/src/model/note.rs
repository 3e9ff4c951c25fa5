//! Note domain model.
//!
//! # Responsibility
//! - Define the persisted activity record and its wire shape.
//! - Derive the activity duration from the two time fields.
//!
//! # Invariants
//! - `start_time < end_time`; a note never crosses midnight.
//! - `text` is non-empty after trimming but stored exactly as entered.
//! - `id` is assigned once by the store and never reassigned.

use crate::model::time_of_day::TimeOfDay;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Numeric note identifier, serialized as a JSON number.
pub type NoteId = u64;

/// Largest id accepted from storage; keeps ids exact as JSON numbers.
pub const MAX_NOTE_ID: NoteId = (1 << 53) - 1;

/// Invariant violations detected on a fully-typed note.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteValidationError {
    EmptyText,
    InvalidRange { start: TimeOfDay, end: TimeOfDay },
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyText => write!(f, "note text cannot be empty"),
            Self::InvalidRange { start, end } => {
                write!(f, "end time ({end}) must be after start time ({start})")
            }
        }
    }
}

impl Error for NoteValidationError {}

/// One recorded activity between two times of the same day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: NoteId,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
    pub text: String,
}

impl Note {
    /// Creates a note without checking invariants.
    ///
    /// Callers are expected to have validated the inputs already; see
    /// `FormController` for the user-facing path.
    pub fn new(
        id: NoteId,
        start_time: TimeOfDay,
        end_time: TimeOfDay,
        text: impl Into<String>,
    ) -> Self {
        Self {
            id,
            start_time,
            end_time,
            text: text.into(),
        }
    }

    /// Checks the record-level invariants.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if self.text.trim().is_empty() {
            return Err(NoteValidationError::EmptyText);
        }
        if self.start_time >= self.end_time {
            return Err(NoteValidationError::InvalidRange {
                start: self.start_time,
                end: self.end_time,
            });
        }
        Ok(())
    }

    /// Whole minutes between start and end.
    ///
    /// Saturates to zero for notes that violate the range invariant.
    pub fn duration_minutes(&self) -> u16 {
        self.end_time
            .minutes()
            .saturating_sub(self.start_time.minutes())
    }

    /// Duration in fractional hours, e.g. `09:00`-`10:30` is `1.5`.
    pub fn duration_hours(&self) -> f64 {
        f64::from(self.duration_minutes()) / 60.0
    }

    /// Duration rounded to two decimals with trailing zeros dropped.
    pub fn duration_label(&self) -> String {
        format_hours(self.duration_minutes())
    }
}

/// Formats a minute count as hours rounded to two decimals.
///
/// Trailing zeros are dropped: `90 -> "1.5"`, `60 -> "1"`, `20 -> "0.33"`.
pub fn format_hours(minutes: u16) -> String {
    // hundredths of an hour, rounded half up; `minutes * 5 / 3` never lands on .5
    let hundredths = (u32::from(minutes) * 10 + 3) / 6;
    let whole = hundredths / 100;
    let fraction = hundredths % 100;

    if fraction == 0 {
        whole.to_string()
    } else if fraction % 10 == 0 {
        format!("{whole}.{}", fraction / 10)
    } else {
        format!("{whole}.{fraction:02}")
    }
}
