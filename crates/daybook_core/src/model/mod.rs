//! Domain model for per-day diary records.
//!
//! # Responsibility
//! - Define the canonical data structures used by core business logic.
//! - Keep record identity (date key) and record content (note) separate.
//!
//! # Invariants
//! - Every stored record is identified by exactly one `DateKey`.
//! - Deletion is a hard remove of the day's row; there are no tombstones.

pub mod date_key;
pub mod note;
