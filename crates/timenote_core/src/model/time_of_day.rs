//! Wall-clock time-of-day value type.
//!
//! # Responsibility
//! - Parse the external zero-padded `HH:MM` form into minutes since midnight.
//! - Format back to the identical external representation.
//!
//! # Invariants
//! - Stored minutes are always in `0..=1439`.
//! - `Ord` on the value equals chronological order, which equals string order
//!   of the formatted `HH:MM` form.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

static HH_MM_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([01][0-9]|2[0-3]):([0-5][0-9])$").expect("valid HH:MM regex"));

const MINUTES_PER_HOUR: u16 = 60;
const MINUTES_PER_DAY: u16 = 24 * MINUTES_PER_HOUR;

/// Rejected time-of-day input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeParseError {
    /// Input is empty after trimming.
    Empty,
    /// Input is not a zero-padded 24-hour `HH:MM` value.
    Malformed(String),
}

impl Display for TimeParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "time value is empty"),
            Self::Malformed(value) => {
                write!(f, "time `{value}` must be a 24-hour HH:MM value (00:00-23:59)")
            }
        }
    }
}

impl Error for TimeParseError {}

/// Time of day with minute precision.
///
/// Serialized as the `HH:MM` string used by the persisted blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// Builds a value from hour and minute components.
    ///
    /// Returns `None` when either component is out of range.
    pub fn from_hm(hour: u8, minute: u8) -> Option<Self> {
        let minutes = u16::from(hour) * MINUTES_PER_HOUR + u16::from(minute);
        if hour < 24 && minute < 60 {
            Some(Self(minutes))
        } else {
            None
        }
    }

    /// Builds a value from minutes since midnight.
    pub fn from_minutes(minutes: u16) -> Option<Self> {
        (minutes < MINUTES_PER_DAY).then_some(Self(minutes))
    }

    /// Parses the strict external `HH:MM` form.
    ///
    /// Surrounding whitespace is tolerated; `9:00`, `24:00` and `12:60` are not.
    pub fn parse(value: &str) -> Result<Self, TimeParseError> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Err(TimeParseError::Empty);
        }

        let caps = HH_MM_RE
            .captures(trimmed)
            .ok_or_else(|| TimeParseError::Malformed(trimmed.to_string()))?;
        let hour: u8 = caps[1]
            .parse()
            .map_err(|_| TimeParseError::Malformed(trimmed.to_string()))?;
        let minute: u8 = caps[2]
            .parse()
            .map_err(|_| TimeParseError::Malformed(trimmed.to_string()))?;

        Self::from_hm(hour, minute).ok_or_else(|| TimeParseError::Malformed(trimmed.to_string()))
    }

    /// Total minutes since midnight.
    pub fn minutes(self) -> u16 {
        self.0
    }

    pub fn hour(self) -> u8 {
        (self.0 / MINUTES_PER_HOUR) as u8
    }

    pub fn minute(self) -> u8 {
        (self.0 % MINUTES_PER_HOUR) as u8
    }
}

impl Display for TimeOfDay {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for TimeOfDay {
    type Err = TimeParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = TimeParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}
