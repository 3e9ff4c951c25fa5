//! Domain model for recorded activity notes.
//!
//! # Responsibility
//! - Define the canonical note record and its time-of-day value type.
//! - Keep the persisted wire shape (`id`, `startTime`, `endTime`, `text`) here.
//!
//! # Invariants
//! - Time values are parsed once at the boundary and formatted only on output.

pub mod note;
pub mod time_of_day;
