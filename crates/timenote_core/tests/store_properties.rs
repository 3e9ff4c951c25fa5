use proptest::prelude::*;
use timenote_core::{NoPersistence, NoteStore, TimeOfDay};

/// Valid `(start, end)` pairs with `start < end`.
fn time_range() -> impl Strategy<Value = (TimeOfDay, TimeOfDay)> {
    (0u16..1439)
        .prop_flat_map(|start| (Just(start), (start + 1)..1440))
        .prop_map(|(start, end)| {
            (
                TimeOfDay::from_minutes(start).unwrap(),
                TimeOfDay::from_minutes(end).unwrap(),
            )
        })
}

#[derive(Debug, Clone)]
enum Op {
    Add(TimeOfDay, TimeOfDay),
    Update(usize, TimeOfDay, TimeOfDay),
    Remove(usize),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => time_range().prop_map(|(start, end)| Op::Add(start, end)),
        2 => (any::<usize>(), time_range()).prop_map(|(pick, (start, end))| Op::Update(pick, start, end)),
        1 => any::<usize>().prop_map(Op::Remove),
    ]
}

fn is_sorted_by_start(store: &NoteStore<NoPersistence>) -> bool {
    store
        .list()
        .windows(2)
        .all(|pair| pair[0].start_time.to_string() <= pair[1].start_time.to_string())
}

proptest! {
    #[test]
    fn list_stays_sorted_under_any_mutation_sequence(ops in prop::collection::vec(op(), 0..40)) {
        let mut store = NoteStore::open(NoPersistence);
        for op in ops {
            match op {
                Op::Add(start, end) => {
                    let before = store.len();
                    let note = store.add(start, end, "entry");
                    prop_assert_eq!(store.len(), before + 1);
                    prop_assert_eq!(note.start_time, start);
                    prop_assert_eq!(note.end_time, end);
                }
                Op::Update(pick, start, end) => {
                    if !store.is_empty() {
                        let id = store.list()[pick % store.len()].id;
                        store.update(id, start, end, "edited").unwrap();
                    }
                }
                Op::Remove(pick) => {
                    if !store.is_empty() {
                        let id = store.list()[pick % store.len()].id;
                        store.remove(id);
                        prop_assert!(store.get(id).is_none());
                    }
                }
            }
            prop_assert!(is_sorted_by_start(&store));
        }
    }

    #[test]
    fn duration_matches_minute_difference((start, end) in time_range()) {
        let mut store = NoteStore::open(NoPersistence);
        let note = store.add(start, end, "entry");
        let expected = f64::from(end.minutes() - start.minutes()) / 60.0;
        prop_assert!((note.duration_hours() - expected).abs() < 1e-9);
    }

    #[test]
    fn time_of_day_formats_back_to_parsed_input(minutes in 0u16..1440) {
        let time = TimeOfDay::from_minutes(minutes).unwrap();
        let text = time.to_string();
        prop_assert_eq!(text.len(), 5);
        prop_assert_eq!(TimeOfDay::parse(&text).unwrap(), time);
    }
}
