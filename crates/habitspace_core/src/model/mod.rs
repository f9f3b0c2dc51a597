//! Domain model for trackable habits.
//!
//! # Responsibility
//! - Define the canonical habit record used by core business logic.
//! - Keep one storage shape shared by grid and detail projections.
//!
//! # Invariants
//! - Every habit is identified by a stable string `HabitId`.
//! - `completed_days` never holds two entries for the same calendar day.

pub mod habit;
