use timenote_core::{
    BlobNotePersistence, BlobResult, BlobStore, BlobStoreError, MemoryBlobStore, NoPersistence,
    Note, NotePersistence, NoteStore, StoreError, TimeOfDay, DEFAULT_STORAGE_KEY, MAX_NOTE_ID,
};

fn time(value: &str) -> TimeOfDay {
    TimeOfDay::parse(value).unwrap()
}

fn texts(notes: &[Note]) -> Vec<&str> {
    notes.iter().map(|note| note.text.as_str()).collect()
}

/// Accepts reads, rejects every write.
struct QuotaExceededStore;

impl BlobStore for QuotaExceededStore {
    fn read(&self, _key: &str) -> BlobResult<Option<String>> {
        Ok(None)
    }

    fn write(&self, _key: &str, _value: &str) -> BlobResult<()> {
        Err(BlobStoreError::Unavailable("quota exceeded".to_string()))
    }
}

#[test]
fn add_inserts_exactly_one_note_with_given_fields() {
    let mut store = NoteStore::open(NoPersistence);
    let note = store.add(time("09:00"), time("10:00"), "write spec");

    assert_eq!(store.len(), 1);
    assert_eq!(note.start_time, time("09:00"));
    assert_eq!(note.end_time, time("10:00"));
    assert_eq!(note.text, "write spec");
    assert_eq!(store.list(), &[note]);
}

#[test]
fn list_is_sorted_by_start_time_after_add() {
    let mut store = NoteStore::open(NoPersistence);
    store.add(time("09:00"), time("10:00"), "write spec");
    store.add(time("08:00"), time("08:30"), "coffee");

    assert_eq!(texts(store.list()), vec!["coffee", "write spec"]);
}

#[test]
fn update_replaces_fields_keeps_id_and_resorts() {
    let mut store = NoteStore::open(NoPersistence);
    let early = store.add(time("08:00"), time("09:00"), "standup");
    store.add(time("10:00"), time("11:00"), "review");

    let updated = store
        .update(early.id, time("12:00"), time("12:30"), "lunch")
        .unwrap();

    assert_eq!(updated.id, early.id);
    assert_eq!(updated.text, "lunch");
    assert_eq!(texts(store.list()), vec!["review", "lunch"]);
    assert_eq!(store.get(early.id), Some(&updated));
}

#[test]
fn update_unknown_id_reports_not_found_without_mutation() {
    let blobs = MemoryBlobStore::new();
    let mut store = NoteStore::open(BlobNotePersistence::new(&blobs));
    store.add(time("08:00"), time("09:00"), "standup");
    let saved_before = blobs.read("timenotes_v3").unwrap();
    let listed_before = store.list().to_vec();

    let err = store
        .update(42, time("12:00"), time("13:00"), "ghost")
        .unwrap_err();

    assert_eq!(err, StoreError::NotFound(42));
    assert_eq!(store.list(), listed_before.as_slice());
    assert_eq!(blobs.read("timenotes_v3").unwrap(), saved_before);
}

#[test]
fn remove_deletes_note_and_is_idempotent() {
    let mut store = NoteStore::open(NoPersistence);
    let coffee = store.add(time("08:00"), time("08:30"), "coffee");
    store.add(time("09:00"), time("10:00"), "write spec");

    assert!(store.remove(coffee.id));
    assert!(store.list().iter().all(|note| note.id != coffee.id));

    let after_first = store.list().to_vec();
    assert!(!store.remove(coffee.id));
    assert_eq!(store.list(), after_first.as_slice());
}

#[test]
fn clear_always_yields_empty_list() {
    let mut store = NoteStore::open(NoPersistence);
    store.clear();
    assert!(store.is_empty());

    for hour in 1..6 {
        let start = TimeOfDay::from_hm(hour, 0).unwrap();
        let end = TimeOfDay::from_hm(hour, 45).unwrap();
        store.add(start, end, format!("task {hour}"));
    }
    store.clear();
    assert!(store.list().is_empty());
}

#[test]
fn every_mutation_is_written_through() {
    let blobs = MemoryBlobStore::new();
    let mut store = NoteStore::open(BlobNotePersistence::new(&blobs));
    let reload = || BlobNotePersistence::new(&blobs).load();

    let coffee = store.add(time("08:00"), time("08:30"), "coffee");
    assert_eq!(reload(), store.list());

    store
        .update(coffee.id, time("08:00"), time("08:45"), "long coffee")
        .unwrap();
    assert_eq!(reload(), store.list());

    store.add(time("09:00"), time("10:00"), "write spec");
    store.remove(coffee.id);
    assert_eq!(texts(&reload()), vec!["write spec"]);

    store.clear();
    assert!(reload().is_empty());
}

#[test]
fn reopened_store_continues_after_persisted_ids() {
    let blobs = MemoryBlobStore::new();
    let first_id = {
        let mut store = NoteStore::open(BlobNotePersistence::new(&blobs));
        store.add(time("08:00"), time("08:30"), "coffee").id
    };

    let mut reopened = NoteStore::open(BlobNotePersistence::new(&blobs));
    assert_eq!(reopened.len(), 1);
    let second = reopened.add(time("09:00"), time("09:30"), "mail");
    assert!(second.id > first_id);
}

#[test]
fn lost_writes_keep_in_memory_store_authoritative() {
    let mut store = NoteStore::open(BlobNotePersistence::new(QuotaExceededStore));
    let coffee = store.add(time("08:00"), time("08:30"), "coffee");
    store.add(time("09:00"), time("10:00"), "write spec");
    store
        .update(coffee.id, time("07:30"), time("08:30"), "early coffee")
        .unwrap();

    assert_eq!(texts(store.list()), vec!["early coffee", "write spec"]);
    assert!(store.persistence().try_save(store.list()).is_err());
}

#[test]
fn add_after_loading_out_of_range_id_does_not_overflow() {
    let blobs = MemoryBlobStore::new();
    blobs
        .write(
            DEFAULT_STORAGE_KEY,
            r#"[{"id":18446744073709551615,"startTime":"09:00","endTime":"10:00","text":"x"},
                {"id":7,"startTime":"08:00","endTime":"08:30","text":"kept"}]"#,
        )
        .unwrap();

    let mut store = NoteStore::open(BlobNotePersistence::new(&blobs));
    assert_eq!(texts(store.list()), vec!["kept"]);

    let added = store.add(time("11:00"), time("12:00"), "y");
    assert!(added.id > 7);
    assert!(added.id <= MAX_NOTE_ID);
    assert_eq!(texts(store.list()), vec!["kept", "y"]);
}
