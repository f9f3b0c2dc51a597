//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the key-value access contract the habit store depends on.
//! - Isolate SQLite query details from service/business orchestration.
//!
//! # Invariants
//! - Repository construction verifies schema readiness before use.
//! - Repository APIs return transport errors; policy on those errors
//!   (fail-open load, best-effort save) lives in the service layer.

pub mod kv_repo;
