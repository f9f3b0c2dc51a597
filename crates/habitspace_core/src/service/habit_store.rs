//! Habit collection store: the single mutator of habit state.
//!
//! # Responsibility
//! - Own the in-memory habit collection for the running session.
//! - Mirror every state change to the persistence key before returning.
//! - Fall back to the seed set when persisted state is missing or unreadable.
//!
//! # Invariants
//! - In-memory state is the source of truth for the current session; a
//!   failed write is logged, never rolled back.
//! - Operations that change nothing perform no persistence write.
//! - Habit ids stay unique within the collection.

use crate::day;
use crate::model::habit::{Habit, HabitId};
use crate::repo::kv_repo::KvRepository;
use log::{debug, error, info, warn};

/// Fixed storage key holding the serialized habit collection.
pub const HABITS_STORAGE_KEY: &str = "habits.v1";

/// Returns the fixed default collection used when no persisted data exists.
///
/// Seed habits carry short numeric ids and start with no check-ins.
pub fn seed_habits() -> Vec<Habit> {
    [
        ("1", "Morning Run", "#FF6B6B", "🏃"),
        ("2", "Read Book", "#4ECDC4", "📚"),
        ("3", "Drink Water", "#45B7D1", "💧"),
        ("4", "Meditation", "#96CEB4", "🧘"),
    ]
    .into_iter()
    .map(|(id, title, color, icon)| Habit::with_id(id, title, color, icon))
    .collect()
}

/// Use-case store over a key-value repository.
///
/// All mutations run to completion on the caller's thread; there is exactly
/// one mutator at a time by construction (single user, single session).
pub struct HabitStore<R: KvRepository> {
    repo: R,
    habits: Vec<Habit>,
}

impl<R: KvRepository> HabitStore<R> {
    /// Loads the persisted collection, seeding defaults when unavailable.
    ///
    /// Fail-open: a missing key, unreadable value, or structurally invalid
    /// collection is never an error, only the seed case.
    pub fn load(repo: R) -> Self {
        let habits = match repo.get(HABITS_STORAGE_KEY) {
            Ok(Some(raw)) => match parse_collection(&raw) {
                Some(habits) => {
                    info!(
                        "event=habits_load module=service status=ok source=persisted count={}",
                        habits.len()
                    );
                    habits
                }
                None => {
                    warn!(
                        "event=habits_load module=service status=fallback reason=malformed_value"
                    );
                    seed_habits()
                }
            },
            Ok(None) => {
                info!("event=habits_load module=service status=ok source=seed reason=missing_key");
                seed_habits()
            }
            Err(err) => {
                warn!(
                    "event=habits_load module=service status=fallback reason=read_failed error={err}"
                );
                seed_habits()
            }
        };

        Self { repo, habits }
    }

    /// Current collection in display order.
    pub fn habits(&self) -> &[Habit] {
        &self.habits
    }

    /// Looks up one habit by id.
    pub fn get(&self, id: &str) -> Option<&Habit> {
        self.habits.iter().find(|habit| habit.id == id)
    }

    /// Appends a new habit and persists the collection.
    ///
    /// A title that is empty after trimming is rejected as a silent no-op
    /// with no persistence write. Returns the fresh id on success.
    pub fn create(&mut self, title: &str, color: &str, icon: &str) -> Option<HabitId> {
        let title = title.trim();
        if title.is_empty() {
            debug!("event=habit_create module=service status=noop reason=empty_title");
            return None;
        }

        let habit = Habit::new(title, color, icon);
        let id = habit.id.clone();
        self.habits.push(habit);
        self.persist("habit_create");
        Some(id)
    }

    /// Removes the habit with matching id, if present.
    ///
    /// An absent id is a no-op, not an error, and writes nothing. Returns
    /// whether a habit was removed.
    pub fn delete(&mut self, id: &str) -> bool {
        let before = self.habits.len();
        self.habits.retain(|habit| habit.id != id);
        let removed = self.habits.len() != before;

        if removed {
            self.persist("habit_delete");
        } else {
            debug!("event=habit_delete module=service status=noop reason=unknown_id");
        }
        removed
    }

    /// Strictly toggles today's check-in for the habit with matching id.
    ///
    /// "Today" is the canonical device-local calendar day at call time.
    /// Returns the habit's new completed-today state, or `None` when the id
    /// matches no habit (no-op, no write).
    pub fn toggle_completion(&mut self, id: &str) -> Option<bool> {
        let today = day::today_string();
        self.toggle_completion_on(id, &today)
    }

    /// Strictly toggles the check-in for an explicit canonical day.
    ///
    /// Same semantics as [`toggle_completion`](Self::toggle_completion) with
    /// the day pinned by the caller. Toggling the same day twice restores
    /// the prior `completed_days` contents.
    pub fn toggle_completion_on(&mut self, id: &str, day: &str) -> Option<bool> {
        let habit = self.habits.iter_mut().find(|habit| habit.id == id);
        let Some(habit) = habit else {
            debug!("event=habit_toggle module=service status=noop reason=unknown_id");
            return None;
        };

        let now_completed = habit.toggle_day(day);
        self.persist("habit_toggle");
        Some(now_completed)
    }

    /// Writes the full collection to the storage key, best effort.
    ///
    /// A failed write is reported through the log stream only; the next
    /// successful write still carries the latest state.
    fn persist(&self, event: &str) {
        let serialized = match serde_json::to_string(&self.habits) {
            Ok(serialized) => serialized,
            Err(err) => {
                error!(
                    "event={event} module=service status=error error_code=serialize_failed error={err}"
                );
                return;
            }
        };

        match self.repo.set(HABITS_STORAGE_KEY, &serialized) {
            Ok(()) => debug!(
                "event={event} module=service status=ok count={}",
                self.habits.len()
            ),
            Err(err) => error!(
                "event={event} module=service status=error error_code=persist_failed error={err}"
            ),
        }
    }
}

/// Parses and structurally checks a persisted collection.
///
/// Returns `None` for malformed JSON, invalid records, or duplicate ids, so
/// the caller can apply the seed fallback.
fn parse_collection(raw: &str) -> Option<Vec<Habit>> {
    let habits: Vec<Habit> = serde_json::from_str(raw).ok()?;
    for (index, habit) in habits.iter().enumerate() {
        if habit.validate().is_err() {
            return None;
        }
        if habits[..index].iter().any(|seen| seen.id == habit.id) {
            return None;
        }
    }
    Some(habits)
}
