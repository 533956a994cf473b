//! Core domain logic for Daybook.
//! This crate is the single source of truth for diary invariants.

pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod session;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::date_key::{DateKey, DateKeyError};
pub use model::note::{
    FontStyle, FontWeight, NoteRecord, NoteValidationError, DEFAULT_CARD_COLOR,
    DEFAULT_FONT_FAMILY, FONT_FAMILIES,
};
pub use repo::note_repo::{NoteStore, RepoError, RepoResult, SqliteNoteStore};
pub use service::composer::{
    Composer, ComposerPhase, ImagePick, MEDIA_PERMISSION_ALERT,
};
pub use service::diary_service::{derive_note_preview, DiaryDay, DiaryService};
pub use session::{AuthError, Session};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
