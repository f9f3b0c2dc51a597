use habitspace_core::{
    seed_habits, today_string, Habit, HabitStore, KvRepository, RepoError, RepoResult,
    HABITS_STORAGE_KEY,
};
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};

/// In-memory repository double that counts writes.
#[derive(Default)]
struct MemoryKv {
    values: RefCell<HashMap<String, String>>,
    writes: Cell<usize>,
}

impl MemoryKv {
    fn preloaded(value: &str) -> Self {
        let kv = Self::default();
        kv.values
            .borrow_mut()
            .insert(HABITS_STORAGE_KEY.to_string(), value.to_string());
        kv
    }

    fn stored_habits(&self) -> Vec<Habit> {
        let raw = self
            .values
            .borrow()
            .get(HABITS_STORAGE_KEY)
            .cloned()
            .expect("collection should be persisted");
        serde_json::from_str(&raw).expect("persisted collection should parse")
    }
}

impl KvRepository for MemoryKv {
    fn get(&self, key: &str) -> RepoResult<Option<String>> {
        Ok(self.values.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> RepoResult<()> {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }
}

/// Repository double whose reads and/or writes fail.
struct BrokenKv {
    fail_reads: bool,
}

impl KvRepository for BrokenKv {
    fn get(&self, _key: &str) -> RepoResult<Option<String>> {
        if self.fail_reads {
            Err(RepoError::MissingRequiredTable("kv"))
        } else {
            Ok(None)
        }
    }

    fn set(&self, _key: &str, _value: &str) -> RepoResult<()> {
        Err(RepoError::MissingRequiredTable("kv"))
    }
}

#[test]
fn load_seeds_defaults_when_nothing_is_persisted() {
    let kv = MemoryKv::default();
    let store = HabitStore::load(&kv);

    let ids: Vec<_> = store.habits().iter().map(|habit| habit.id.as_str()).collect();
    assert_eq!(ids, ["1", "2", "3", "4"]);
    assert!(store
        .habits()
        .iter()
        .all(|habit| habit.completed_days.is_empty()));
    assert_eq!(store.habits()[0].title, "Morning Run");
    assert_eq!(store.habits()[3].icon, "🧘");
    // Seeding itself is not a mutation; nothing is written until one happens.
    assert_eq!(kv.writes.get(), 0);
}

#[test]
fn load_uses_persisted_state_when_it_parses() {
    let mut habit = Habit::with_id("9", "Stretching", "#4ECDC4", "🧘");
    habit.toggle_day("2026-08-01");
    let raw = serde_json::to_string(&vec![habit.clone()]).unwrap();

    let kv = MemoryKv::preloaded(&raw);
    let store = HabitStore::load(&kv);

    assert_eq!(store.habits(), &[habit]);
}

#[test]
fn load_falls_back_to_seed_on_malformed_value() {
    let kv = MemoryKv::preloaded("{not json at all");
    let store = HabitStore::load(&kv);

    assert_eq!(store.habits(), seed_habits().as_slice());
}

#[test]
fn load_falls_back_to_seed_on_structurally_invalid_state() {
    let duplicate_ids = serde_json::to_string(&vec![
        Habit::with_id("1", "One", "#FF6B6B", "🏃"),
        Habit::with_id("1", "Other One", "#4ECDC4", "📚"),
    ])
    .unwrap();
    let store = HabitStore::load(MemoryKv::preloaded(&duplicate_ids));
    assert_eq!(store.habits(), seed_habits().as_slice());

    let blank_title = serde_json::to_string(&vec![Habit::with_id("1", " ", "#FF6B6B", "🏃")]).unwrap();
    let store = HabitStore::load(MemoryKv::preloaded(&blank_title));
    assert_eq!(store.habits(), seed_habits().as_slice());
}

#[test]
fn load_falls_back_to_seed_when_read_fails() {
    let store = HabitStore::load(BrokenKv { fail_reads: true });
    assert_eq!(store.habits(), seed_habits().as_slice());
}

#[test]
fn create_appends_habit_with_empty_days() {
    let kv = MemoryKv::default();
    let mut store = HabitStore::load(&kv);

    let id = store.create("Yoga", "#FF6B6B", "🧘").expect("create should succeed");

    assert_eq!(store.habits().len(), 5);
    let created = store.habits().last().unwrap();
    assert_eq!(created.id, id);
    assert_eq!(created.title, "Yoga");
    assert_eq!(created.color, "#FF6B6B");
    assert_eq!(created.icon, "🧘");
    assert!(created.completed_days.is_empty());

    let ids: HashSet<_> = store.habits().iter().map(|habit| &habit.id).collect();
    assert_eq!(ids.len(), store.habits().len());
}

#[test]
fn create_trims_title_whitespace() {
    let kv = MemoryKv::default();
    let mut store = HabitStore::load(&kv);

    store.create("  Yoga  ", "#FF6B6B", "🧘").unwrap();

    assert_eq!(store.habits().last().unwrap().title, "Yoga");
}

#[test]
fn create_rejects_blank_title_without_a_write() {
    let kv = MemoryKv::default();
    let mut store = HabitStore::load(&kv);

    assert_eq!(store.create("", "#FF6B6B", "🏃"), None);
    assert_eq!(store.create("   ", "#FF6B6B", "🏃"), None);

    assert_eq!(store.habits().len(), 4);
    assert_eq!(kv.writes.get(), 0);
}

#[test]
fn delete_removes_exactly_the_matching_entry() {
    let kv = MemoryKv::default();
    let mut store = HabitStore::load(&kv);
    let untouched: Vec<Habit> = store.habits()[1..].to_vec();

    assert!(store.delete("1"));

    let ids: Vec<_> = store.habits().iter().map(|habit| habit.id.as_str()).collect();
    assert_eq!(ids, ["2", "3", "4"]);
    assert_eq!(store.habits(), untouched.as_slice());
}

#[test]
fn delete_unknown_id_is_a_noop_without_a_write() {
    let kv = MemoryKv::default();
    let mut store = HabitStore::load(&kv);

    assert!(!store.delete("no-such-id"));

    assert_eq!(store.habits(), seed_habits().as_slice());
    assert_eq!(kv.writes.get(), 0);
}

#[test]
fn toggle_completion_checks_in_and_out_for_today() {
    let kv = MemoryKv::default();
    let mut store = HabitStore::load(&kv);
    let today = today_string();

    assert_eq!(store.toggle_completion("1"), Some(true));
    assert_eq!(store.get("1").unwrap().completed_days, vec![today.clone()]);

    assert_eq!(store.toggle_completion("1"), Some(false));
    assert!(store.get("1").unwrap().completed_days.is_empty());
}

#[test]
fn toggle_completion_on_pinned_day_is_an_involution() {
    let kv = MemoryKv::default();
    let mut store = HabitStore::load(&kv);
    store.toggle_completion_on("2", "2026-08-01");
    store.toggle_completion_on("2", "2026-08-02");
    let prior = store.get("2").unwrap().completed_days.clone();

    assert_eq!(store.toggle_completion_on("2", "2026-08-06"), Some(true));
    assert_eq!(store.toggle_completion_on("2", "2026-08-06"), Some(false));

    assert_eq!(store.get("2").unwrap().completed_days, prior);
}

#[test]
fn toggle_completion_unknown_id_is_a_noop_without_a_write() {
    let kv = MemoryKv::default();
    let mut store = HabitStore::load(&kv);

    assert_eq!(store.toggle_completion("no-such-id"), None);
    assert_eq!(kv.writes.get(), 0);
}

#[test]
fn every_mutation_mirrors_memory_state_to_storage() {
    let kv = MemoryKv::default();
    let mut store = HabitStore::load(&kv);

    let id = store.create("Yoga", "#FF6B6B", "🧘").unwrap();
    assert_eq!(kv.stored_habits(), store.habits());

    store.toggle_completion_on(&id, "2026-08-06").unwrap();
    assert_eq!(kv.stored_habits(), store.habits());

    store.delete("1");
    assert_eq!(kv.stored_habits(), store.habits());

    assert_eq!(kv.writes.get(), 3);
}

#[test]
fn failed_write_keeps_in_memory_state() {
    let mut store = HabitStore::load(BrokenKv { fail_reads: false });

    let id = store.create("Yoga", "#FF6B6B", "🧘").expect("create should still succeed");

    assert_eq!(store.habits().len(), 5);
    assert_eq!(store.get(&id).unwrap().title, "Yoga");
    assert_eq!(store.toggle_completion_on(&id, "2026-08-06"), Some(true));
}

#[test]
fn collection_round_trip_preserves_every_field() {
    let kv = MemoryKv::default();
    let mut store = HabitStore::load(&kv);
    store.create("Yoga", "#FF6B6B", "🧘").unwrap();
    store.toggle_completion_on("1", "2026-08-05").unwrap();
    store.toggle_completion_on("1", "2026-08-06").unwrap();

    let serialized = serde_json::to_string(store.habits()).unwrap();
    let decoded: Vec<Habit> = serde_json::from_str(&serialized).unwrap();

    assert_eq!(decoded, store.habits());
    // Day membership is what matters for correctness, independent of order.
    let original_days: HashSet<_> = store.get("1").unwrap().completed_days.iter().collect();
    let decoded_days: HashSet<_> = decoded[0].completed_days.iter().collect();
    assert_eq!(decoded_days, original_days);
}
