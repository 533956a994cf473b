//! FFI use-case API for Flutter-facing calls.
//!
//! # Responsibility
//! - Expose stable, use-case-level diary functions to Dart via FRB.
//! - Keep error semantics simple for the mobile shell: response envelopes,
//!   never exceptions.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - Date keys cross the boundary as `YYYY-MM-DD` strings.

use daybook_core::db::open_db;
use daybook_core::{
    core_version as core_version_inner, derive_note_preview, init_logging as init_logging_inner,
    ping as ping_inner, DateKey, DiaryService, FontStyle, FontWeight, NoteRecord, Session,
    SqliteNoteStore,
};
use std::path::PathBuf;
use std::sync::{Mutex, OnceLock};

const NOTE_DB_FILE_NAME: &str = "daybook_notes.sqlite3";
static NOTE_DB_PATH: OnceLock<PathBuf> = OnceLock::new();
static SESSION: OnceLock<Mutex<Session>> = OnceLock::new();

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

/// One diary record as it crosses the FFI boundary.
///
/// Font attributes travel as their serialized labels (`normal|bold`,
/// `normal|italic`) so the Dart side needs no enum mirroring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotePayload {
    pub note: String,
    pub card_color: String,
    pub font_weight: String,
    pub font_style: String,
    pub font_family: String,
    pub image_uri: Option<String>,
}

/// Generic action response envelope for diary mutations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiaryActionResponse {
    /// Whether the operation succeeded.
    pub ok: bool,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

impl DiaryActionResponse {
    fn success(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            message: message.into(),
        }
    }
}

/// Load response envelope for one diary day.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiaryNoteResponse {
    /// Whether a usable record exists for the requested date.
    pub found: bool,
    /// The record when `found` is true.
    pub note: Option<NotePayload>,
    /// Human-readable response message for diagnostics/UI.
    pub message: String,
}

/// One day in the calendar overview listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiaryDayItem {
    /// ISO `YYYY-MM-DD` date key.
    pub date_key: String,
    /// Body excerpt, at most 50 characters.
    pub preview: String,
}

/// Overview response envelope, sorted ascending by date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiaryListResponse {
    pub items: Vec<DiaryDayItem>,
    pub message: String,
}

/// Stores the whole record for one date, replacing any previous one.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - A failed save leaves any previously stored record untouched.
#[flutter_rust_bridge::frb(sync)]
pub fn diary_save_note(date_key: String, note: NotePayload) -> DiaryActionResponse {
    let key = match date_key.parse::<DateKey>() {
        Ok(key) => key,
        Err(err) => return DiaryActionResponse::failure(format!("diary_save_note failed: {err}")),
    };
    let record = match payload_to_record(&note) {
        Ok(record) => record,
        Err(message) => {
            return DiaryActionResponse::failure(format!("diary_save_note failed: {message}"))
        }
    };

    match with_diary_service(|service| service.save_note(&key, &record)) {
        Ok(()) => DiaryActionResponse::success("Note saved."),
        Err(err) => DiaryActionResponse::failure(format!("diary_save_note failed: {err}")),
    }
}

/// Loads the record for one date.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - An unusable stored body reads as not-found, matching the editor's
///   fall-back-to-defaults behavior.
#[flutter_rust_bridge::frb(sync)]
pub fn diary_load_note(date_key: String) -> DiaryNoteResponse {
    let key = match date_key.parse::<DateKey>() {
        Ok(key) => key,
        Err(err) => {
            return DiaryNoteResponse {
                found: false,
                note: None,
                message: format!("diary_load_note failed: {err}"),
            }
        }
    };

    match with_diary_service(|service| service.load_note(&key)) {
        Ok(Some(record)) => DiaryNoteResponse {
            found: true,
            note: Some(record_to_payload(&record)),
            message: "Note loaded.".to_string(),
        },
        Ok(None) => DiaryNoteResponse {
            found: false,
            note: None,
            message: "No note for this date.".to_string(),
        },
        Err(err) => DiaryNoteResponse {
            found: false,
            note: None,
            message: format!("diary_load_note failed: {err}"),
        },
    }
}

/// Deletes the record for one date. Absent dates succeed as a no-op.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn diary_delete_note(date_key: String) -> DiaryActionResponse {
    let key = match date_key.parse::<DateKey>() {
        Ok(key) => key,
        Err(err) => {
            return DiaryActionResponse::failure(format!("diary_delete_note failed: {err}"))
        }
    };

    match with_diary_service(|service| service.delete_note(&key)) {
        Ok(()) => DiaryActionResponse::success("Note deleted."),
        Err(err) => DiaryActionResponse::failure(format!("diary_delete_note failed: {err}")),
    }
}

/// Lists every stored day for the calendar overview, oldest first.
///
/// # FFI contract
/// - Sync call, DB-backed execution.
/// - Never panics.
/// - Corrupt rows are skipped, never failing the listing.
#[flutter_rust_bridge::frb(sync)]
pub fn diary_list_days() -> DiaryListResponse {
    match with_diary_service(|service| service.calendar_overview()) {
        Ok(days) => {
            let items = days
                .into_iter()
                .map(|day| DiaryDayItem {
                    date_key: day.date_key.to_string(),
                    preview: day.preview,
                })
                .collect::<Vec<_>>();
            let message = if items.is_empty() {
                "No entries yet.".to_string()
            } else {
                format!("Found {} day(s).", items.len())
            };
            DiaryListResponse { items, message }
        }
        Err(err) => DiaryListResponse {
            items: Vec::new(),
            message: format!("diary_list_days failed: {err}"),
        },
    }
}

/// Signs in with the local-only placeholder check.
///
/// # FFI contract
/// - Sync call, no storage access.
/// - Any non-empty username/password pair is accepted.
#[flutter_rust_bridge::frb(sync)]
pub fn session_login(username: String, password: String) -> DiaryActionResponse {
    match session().lock() {
        Ok(mut session) => match session.login(&username, &password) {
            Ok(()) => DiaryActionResponse::success("Logged in."),
            Err(err) => DiaryActionResponse::failure(format!("session_login failed: {err}")),
        },
        Err(_) => DiaryActionResponse::failure("session_login failed: session state poisoned"),
    }
}

/// Validates register input; nothing is stored.
///
/// # FFI contract
/// - Sync call, no storage access.
/// - Succeeds when all fields are non-empty and passwords match.
#[flutter_rust_bridge::frb(sync)]
pub fn session_register(
    username: String,
    password: String,
    confirm_password: String,
) -> DiaryActionResponse {
    match Session::register(&username, &password, &confirm_password) {
        Ok(()) => DiaryActionResponse::success("Registration Successful!"),
        Err(err) => DiaryActionResponse::failure(format!("session_register failed: {err}")),
    }
}

/// Clears the signed-in username.
#[flutter_rust_bridge::frb(sync)]
pub fn session_logout() -> DiaryActionResponse {
    match session().lock() {
        Ok(mut session) => {
            session.logout();
            DiaryActionResponse::success("Logged out.")
        }
        Err(_) => DiaryActionResponse::failure("session_logout failed: session state poisoned"),
    }
}

/// Returns the signed-in username, or an empty string when logged out.
#[flutter_rust_bridge::frb(sync)]
pub fn session_username() -> String {
    match session().lock() {
        Ok(session) => session.username().unwrap_or_default().to_string(),
        Err(_) => String::new(),
    }
}

fn session() -> &'static Mutex<Session> {
    SESSION.get_or_init(|| Mutex::new(Session::new()))
}

fn resolve_note_db_path() -> PathBuf {
    NOTE_DB_PATH
        .get_or_init(|| {
            if let Ok(raw) = std::env::var("DAYBOOK_DB_PATH") {
                let trimmed = raw.trim();
                if !trimmed.is_empty() {
                    return PathBuf::from(trimmed);
                }
            }
            std::env::temp_dir().join(NOTE_DB_FILE_NAME)
        })
        .clone()
}

fn with_diary_service<T>(
    f: impl FnOnce(&DiaryService<SqliteNoteStore<'_>>) -> daybook_core::RepoResult<T>,
) -> Result<T, String> {
    let db_path = resolve_note_db_path();
    let conn = open_db(&db_path).map_err(|err| format!("note DB open failed: {err}"))?;
    let store =
        SqliteNoteStore::try_new(&conn).map_err(|err| format!("note store init failed: {err}"))?;
    let service = DiaryService::new(store);
    f(&service).map_err(|err| err.to_string())
}

fn payload_to_record(payload: &NotePayload) -> Result<NoteRecord, String> {
    let font_weight = parse_font_weight(&payload.font_weight)
        .ok_or_else(|| format!("unknown font weight `{}`", payload.font_weight))?;
    let font_style = parse_font_style(&payload.font_style)
        .ok_or_else(|| format!("unknown font style `{}`", payload.font_style))?;

    Ok(NoteRecord {
        note: payload.note.clone(),
        card_color: payload.card_color.clone(),
        font_weight,
        font_style,
        font_family: payload.font_family.clone(),
        image_uri: payload.image_uri.clone(),
    })
}

fn record_to_payload(record: &NoteRecord) -> NotePayload {
    NotePayload {
        note: record.note.clone(),
        card_color: record.card_color.clone(),
        font_weight: font_weight_label(record.font_weight).to_string(),
        font_style: font_style_label(record.font_style).to_string(),
        font_family: record.font_family.clone(),
        image_uri: record.image_uri.clone(),
    }
}

fn parse_font_weight(value: &str) -> Option<FontWeight> {
    match value {
        "normal" => Some(FontWeight::Normal),
        "bold" => Some(FontWeight::Bold),
        _ => None,
    }
}

fn parse_font_style(value: &str) -> Option<FontStyle> {
    match value {
        "normal" => Some(FontStyle::Normal),
        "italic" => Some(FontStyle::Italic),
        _ => None,
    }
}

fn font_weight_label(value: FontWeight) -> &'static str {
    match value {
        FontWeight::Normal => "normal",
        FontWeight::Bold => "bold",
    }
}

fn font_style_label(value: FontStyle) -> &'static str {
    match value {
        FontStyle::Normal => "normal",
        FontStyle::Italic => "italic",
    }
}

/// Default payload mirroring a fresh editor draft; exposed so the shell
/// does not hard-code styling defaults.
#[flutter_rust_bridge::frb(sync)]
pub fn diary_default_note() -> NotePayload {
    record_to_payload(&NoteRecord::default())
}

/// Preview derivation, exposed for shells that render their own lists.
#[flutter_rust_bridge::frb(sync)]
pub fn diary_note_preview(body: String) -> String {
    derive_note_preview(&body)
}
