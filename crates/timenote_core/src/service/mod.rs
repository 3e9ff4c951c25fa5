//! Core use-case services.
//!
//! # Responsibility
//! - Own the session note collection (`NoteStore`).
//! - Validate user drafts before they reach the store (`FormController`).
//! - Keep presentation layers decoupled from persistence details.

pub mod form;
pub mod note_store;
