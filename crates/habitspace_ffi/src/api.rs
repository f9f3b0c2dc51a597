//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level habit operations to Dart via FRB.
//! - Keep error semantics simple for the UI: envelopes, never exceptions.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Every call observes the latest persisted collection; the Dart side
//!   re-renders from the returned state.

use habitspace_core::db::open_db;
use habitspace_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ping as ping_inner,
    today_string, Habit, HabitStore, SqliteKvRepository, COLOR_PALETTE, ICON_SET,
};
use log::warn;
use std::path::PathBuf;
use std::sync::OnceLock;

const HABITS_DB_FILE_NAME: &str = "habitspace.sqlite3";
static HABITS_DB_PATH: OnceLock<PathBuf> = OnceLock::new();

/// Minimal health-check API for FRB smoke integration.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn ping() -> String {
    ping_inner().to_owned()
}

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may perform small file-system setup work.
/// - Safe to call repeatedly with the same `level + log_dir` (idempotent).
/// - Never panics; returns empty string on success and error message on
///   failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(level.as_str(), log_dir.as_str()) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Habit record shaped for grid/detail rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitView {
    /// Stable habit ID in string form.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Tile background color from the fixed palette.
    pub color: String,
    /// Tile icon from the fixed symbol set.
    pub icon: String,
    /// Canonical day strings of past check-ins, display order.
    pub completed_days: Vec<String>,
    /// Whether a check-in exists for the current device-local day.
    pub completed_today: bool,
}

/// Collection response envelope for grid rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitListResponse {
    /// Current collection in display order (empty on failure).
    pub habits: Vec<HabitView>,
    /// Human-readable response message for diagnostics.
    pub message: String,
}

/// Generic action response envelope for habit mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HabitActionResponse {
    /// Whether the operation changed state.
    pub ok: bool,
    /// Affected habit ID, when one exists.
    pub habit_id: Option<String>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl HabitActionResponse {
    fn success(message: impl Into<String>, habit_id: String) -> Self {
        Self {
            ok: true,
            habit_id: Some(habit_id),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            habit_id: None,
            message: message.into(),
        }
    }
}

/// Returns the current habit collection for grid/detail rendering.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - On storage failure returns an empty collection with a diagnostic
///   message; the UI keeps whatever it last rendered.
#[flutter_rust_bridge::frb(sync)]
pub fn habits_list() -> HabitListResponse {
    let result = with_store(|store| {
        let today = today_string();
        store
            .habits()
            .iter()
            .map(|habit| to_habit_view(habit, &today))
            .collect::<Vec<_>>()
    });
    match result {
        Ok(habits) => {
            let message = format!("{} habit(s).", habits.len());
            HabitListResponse { habits, message }
        }
        Err(err) => HabitListResponse {
            habits: Vec::new(),
            message: format!("habits_list failed: {err}"),
        },
    }
}

/// Creates a habit from the creation form.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - A title that trims to empty is reported as `ok=false` so the form can
///   stay open; no state changes.
#[flutter_rust_bridge::frb(sync)]
pub fn habit_create(title: String, color: String, icon: String) -> HabitActionResponse {
    match with_store(|store| store.create(&title, &color, &icon)) {
        Ok(Some(habit_id)) => HabitActionResponse::success("Habit created.", habit_id),
        Ok(None) => HabitActionResponse::failure("Title must not be empty."),
        Err(err) => HabitActionResponse::failure(format!("habit_create failed: {err}")),
    }
}

/// Deletes a habit by stable ID.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - An unknown ID is reported as `ok=false` without touching state; the
///   caller owns closing any detail view for the removed habit.
#[flutter_rust_bridge::frb(sync)]
pub fn habit_delete(id: String) -> HabitActionResponse {
    match with_store(|store| store.delete(&id)) {
        Ok(true) => HabitActionResponse::success("Habit deleted.", id),
        Ok(false) => HabitActionResponse::failure(format!("No habit with id `{id}`.")),
        Err(err) => HabitActionResponse::failure(format!("habit_delete failed: {err}")),
    }
}

/// Toggles today's check-in for a habit.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Strict toggle: calling twice on the same calendar day restores the
///   prior state.
#[flutter_rust_bridge::frb(sync)]
pub fn habit_toggle(id: String) -> HabitActionResponse {
    match with_store(|store| store.toggle_completion(&id)) {
        Ok(Some(true)) => HabitActionResponse::success("Checked in.", id),
        Ok(Some(false)) => HabitActionResponse::success("Check-in removed.", id),
        Ok(None) => HabitActionResponse::failure(format!("No habit with id `{id}`.")),
        Err(err) => HabitActionResponse::failure(format!("habit_toggle failed: {err}")),
    }
}

/// Fixed color palette for the creation form.
///
/// # FFI contract
/// - Sync call, non-blocking, never throws.
#[flutter_rust_bridge::frb(sync)]
pub fn habit_palette() -> Vec<String> {
    COLOR_PALETTE.iter().map(|color| color.to_string()).collect()
}

/// Fixed symbol set for the creation form.
///
/// # FFI contract
/// - Sync call, non-blocking, never throws.
#[flutter_rust_bridge::frb(sync)]
pub fn habit_icons() -> Vec<String> {
    ICON_SET.iter().map(|icon| icon.to_string()).collect()
}

fn resolve_habits_db_path() -> PathBuf {
    HABITS_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("HABITSPACE_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(HABITS_DB_FILE_NAME)
        })
        .clone()
}

fn with_store<T>(
    f: impl FnOnce(&mut HabitStore<SqliteKvRepository<'_>>) -> T,
) -> Result<T, String> {
    let db_path = resolve_habits_db_path();
    let conn = open_db(&db_path).map_err(|err| {
        warn!("event=ffi_store module=ffi status=error error_code=db_open_failed error={err}");
        format!("habit DB open failed: {err}")
    })?;
    let repo = SqliteKvRepository::try_new(&conn).map_err(|err| {
        warn!("event=ffi_store module=ffi status=error error_code=repo_init_failed error={err}");
        format!("habit repo init failed: {err}")
    })?;
    let mut store = HabitStore::load(repo);
    Ok(f(&mut store))
}

fn to_habit_view(habit: &Habit, today: &str) -> HabitView {
    HabitView {
        id: habit.id.clone(),
        title: habit.title.clone(),
        color: habit.color.clone(),
        icon: habit.icon.clone(),
        completed_days: habit.completed_days.clone(),
        completed_today: habit.is_completed_on(today),
    }
}
