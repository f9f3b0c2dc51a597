//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `habitspace_core` linkage.
//! - Keep output deterministic for quick local sanity checks.

use habitspace_core::db::open_db_in_memory;
use habitspace_core::{HabitStore, SqliteKvRepository};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("habitspace_core ping={}", habitspace_core::ping());
    println!("habitspace_core version={}", habitspace_core::core_version());

    // Exercise the full load path against a throwaway in-memory database.
    let conn = open_db_in_memory()?;
    let repo = SqliteKvRepository::try_new(&conn)?;
    let store = HabitStore::load(repo);
    println!("habitspace_core seed_habits={}", store.habits().len());

    Ok(())
}
