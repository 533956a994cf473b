//! Repository layer abstractions and persistence implementations.
//!
//! # Responsibility
//! - Define the key-value note store contract used by services.
//! - Isolate SQLite query and JSON codec details from orchestration code.
//!
//! # Invariants
//! - Store writes must enforce `NoteRecord::validate()` before persistence.
//! - Store APIs return semantic errors (`Decode`) in addition to DB
//!   transport errors.

pub mod note_repo;
