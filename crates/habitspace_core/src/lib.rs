//! Core domain logic for Habitspace.
//! This crate is the single source of truth for habit state and persistence.

pub mod day;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use day::{canonical_day, is_canonical_day, today_string};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::habit::{Habit, HabitId, HabitValidationError, COLOR_PALETTE, ICON_SET};
pub use repo::kv_repo::{KvRepository, RepoError, RepoResult, SqliteKvRepository};
pub use service::habit_store::{seed_habits, HabitStore, HABITS_STORAGE_KEY};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
