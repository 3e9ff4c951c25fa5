//! In-memory note store with write-through persistence.
//!
//! # Responsibility
//! - Own the session's note collection and hand out read-only views.
//! - Assign note ids and keep the collection ordered by start time.
//! - Push every mutation through the injected persistence collaborator.
//!
//! # Invariants
//! - `list()` is non-decreasing by `start_time`; ties keep insertion order.
//! - Ids are unique and strictly increase in creation order.
//! - The store does not re-validate inputs; `FormController` does that.
//! - The in-memory collection stays authoritative when a save is lost.

use crate::model::note::{Note, NoteId};
use crate::model::time_of_day::TimeOfDay;
use crate::repo::note_persistence::NotePersistence;
use log::info;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    NotFound(NoteId),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "note not found: {id}"),
        }
    }
}

impl Error for StoreError {}

/// Sorted note collection backed by a persistence collaborator.
pub struct NoteStore<P: NotePersistence> {
    persistence: P,
    notes: Vec<Note>,
    last_issued_id: NoteId,
}

impl<P: NotePersistence> NoteStore<P> {
    /// Builds the store from whatever the persistence collaborator restores.
    pub fn open(persistence: P) -> Self {
        let mut notes = persistence.load();
        notes.sort_by_key(|note| note.start_time);
        let last_issued_id = notes.iter().map(|note| note.id).max().unwrap_or(0);
        info!(
            "event=store_open module=service status=ok count={}",
            notes.len()
        );
        Self {
            persistence,
            notes,
            last_issued_id,
        }
    }

    /// Inserts a new note and returns it.
    pub fn add(
        &mut self,
        start_time: TimeOfDay,
        end_time: TimeOfDay,
        text: impl Into<String>,
    ) -> Note {
        let note = Note::new(self.next_id(), start_time, end_time, text);
        self.notes.push(note.clone());
        self.sort();
        self.persist("add", note.id);
        note
    }

    /// Replaces every field of note `id` except the id itself.
    ///
    /// # Errors
    /// - `NotFound` when no note has `id`; nothing is mutated or saved.
    pub fn update(
        &mut self,
        id: NoteId,
        start_time: TimeOfDay,
        end_time: TimeOfDay,
        text: impl Into<String>,
    ) -> StoreResult<Note> {
        let note = self
            .notes
            .iter_mut()
            .find(|note| note.id == id)
            .ok_or(StoreError::NotFound(id))?;
        note.start_time = start_time;
        note.end_time = end_time;
        note.text = text.into();
        let updated = note.clone();

        self.sort();
        self.persist("update", id);
        Ok(updated)
    }

    /// Deletes note `id`. Returns whether a note was removed.
    pub fn remove(&mut self, id: NoteId) -> bool {
        let before = self.notes.len();
        self.notes.retain(|note| note.id != id);
        if self.notes.len() == before {
            return false;
        }
        self.persist("remove", id);
        true
    }

    /// Drops every note.
    pub fn clear(&mut self) {
        let dropped = self.notes.len();
        self.notes.clear();
        self.persistence.save(&self.notes);
        info!("event=store_clear module=service status=ok dropped={dropped}");
    }

    /// Current collection in start-time order.
    pub fn list(&self) -> &[Note] {
        &self.notes
    }

    pub fn get(&self, id: NoteId) -> Option<&Note> {
        self.notes.iter().find(|note| note.id == id)
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn persistence(&self) -> &P {
        &self.persistence
    }

    fn next_id(&mut self) -> NoteId {
        let id = epoch_millis().max(self.last_issued_id.saturating_add(1));
        self.last_issued_id = id;
        id
    }

    fn sort(&mut self) {
        // stable: equal start times keep their current relative order
        self.notes.sort_by_key(|note| note.start_time);
    }

    fn persist(&self, op: &'static str, id: NoteId) {
        self.persistence.save(&self.notes);
        info!(
            "event=store_{op} module=service status=ok id={id} count={}",
            self.notes.len()
        );
    }
}

fn epoch_millis() -> NoteId {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as NoteId)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::NoteStore;
    use crate::model::note::Note;
    use crate::model::time_of_day::TimeOfDay;
    use crate::repo::note_persistence::{NoPersistence, NotePersistence};

    struct Preloaded(Vec<Note>);

    impl NotePersistence for Preloaded {
        fn load(&self) -> Vec<Note> {
            self.0.clone()
        }

        fn save(&self, _notes: &[Note]) {}
    }

    fn time(value: &str) -> TimeOfDay {
        TimeOfDay::parse(value).expect("test time should parse")
    }

    #[test]
    fn ids_increase_even_within_the_same_millisecond() {
        let mut store = NoteStore::open(NoPersistence);
        let ids = (0..50)
            .map(|_| store.add(time("09:00"), time("10:00"), "x").id)
            .collect::<Vec<_>>();
        assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
    }

    #[test]
    fn equal_start_times_keep_insertion_order() {
        let mut store = NoteStore::open(NoPersistence);
        let first = store.add(time("09:00"), time("09:30"), "first");
        let second = store.add(time("09:00"), time("10:00"), "second");
        let early = store.add(time("08:00"), time("08:15"), "early");

        let ids = store.list().iter().map(|note| note.id).collect::<Vec<_>>();
        assert_eq!(ids, vec![early.id, first.id, second.id]);
    }

    #[test]
    fn id_generation_saturates_instead_of_overflowing() {
        let loaded = Note::new(u64::MAX, time("09:00"), time("10:00"), "x");
        let mut store = NoteStore::open(Preloaded(vec![loaded]));

        store.add(time("11:00"), time("12:00"), "y");
        assert_eq!(store.len(), 2);
    }
}
