//! Habit domain model.
//!
//! # Responsibility
//! - Define the canonical habit record shared by grid and detail views.
//! - Provide check-in helpers that preserve the one-entry-per-day rule.
//!
//! # Invariants
//! - `id` is stable and never reused for another habit.
//! - `completed_days` holds at most one entry per calendar day; insertion
//!   order is preserved for display only.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a habit.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
/// Seed habits use short numeric ids; user-created habits get UUID strings.
pub type HabitId = String;

/// Fixed color palette offered by the creation form.
pub const COLOR_PALETTE: &[&str] = &[
    "#FF6B6B", "#4ECDC4", "#45B7D1", "#96CEB4", "#FFEEAD", "#D4A5A5",
];

/// Fixed symbol set offered by the creation form.
pub const ICON_SET: &[&str] = &["🏃", "📚", "💧", "🧘", "💻", "✍️"];

/// Validation failures for habit records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HabitValidationError {
    EmptyId,
    EmptyTitle,
    DuplicateCompletedDay(String),
}

impl Display for HabitValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyId => write!(f, "habit id must not be empty"),
            Self::EmptyTitle => write!(f, "habit title must not be empty"),
            Self::DuplicateCompletedDay(day) => {
                write!(f, "completed_days contains `{day}` more than once")
            }
        }
    }
}

impl Error for HabitValidationError {}

/// Canonical record for one user-defined trackable habit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Habit {
    /// Stable opaque ID, assigned at creation and never mutated.
    pub id: HabitId,
    /// User-supplied display title. Non-empty after trimming.
    pub title: String,
    /// One value from [`COLOR_PALETTE`].
    pub color: String,
    /// One value from [`ICON_SET`].
    pub icon: String,
    /// Canonical `YYYY-MM-DD` day strings the user checked in on.
    /// Serialized as `completedDays` to match the external schema naming.
    #[serde(rename = "completedDays", default)]
    pub completed_days: Vec<String>,
}

impl Habit {
    /// Creates a new habit with a generated stable ID and no check-ins.
    pub fn new(
        title: impl Into<String>,
        color: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), title, color, icon)
    }

    /// Creates a habit with a caller-provided stable ID.
    ///
    /// Used by the seed set and by load paths where identity already exists.
    ///
    /// # Invariants
    /// - The provided `id` must remain stable for this habit's lifetime.
    /// - This constructor does not validate field contents; callers on
    ///   untrusted paths run `validate()` afterwards.
    pub fn with_id(
        id: impl Into<HabitId>,
        title: impl Into<String>,
        color: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            color: color.into(),
            icon: icon.into(),
            completed_days: Vec::new(),
        }
    }

    /// Checks structural invariants of this record.
    ///
    /// # Errors
    /// - `EmptyId` when `id` is empty.
    /// - `EmptyTitle` when `title` trims to empty.
    /// - `DuplicateCompletedDay` when a day string appears more than once.
    pub fn validate(&self) -> Result<(), HabitValidationError> {
        if self.id.is_empty() {
            return Err(HabitValidationError::EmptyId);
        }
        if self.title.trim().is_empty() {
            return Err(HabitValidationError::EmptyTitle);
        }
        for (index, day) in self.completed_days.iter().enumerate() {
            if self.completed_days[..index].iter().any(|seen| seen == day) {
                return Err(HabitValidationError::DuplicateCompletedDay(day.clone()));
            }
        }
        Ok(())
    }

    /// Returns whether the habit has a check-in for the given day.
    pub fn is_completed_on(&self, day: &str) -> bool {
        self.completed_days.iter().any(|entry| entry == day)
    }

    /// Strictly toggles the check-in for `day` and reports the new state.
    ///
    /// Adding appends to the end so display order follows insertion order.
    /// Toggling the same day twice restores the previous contents.
    pub fn toggle_day(&mut self, day: &str) -> bool {
        if self.is_completed_on(day) {
            self.completed_days.retain(|entry| entry != day);
            false
        } else {
            self.completed_days.push(day.to_string());
            true
        }
    }
}
