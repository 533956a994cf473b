//! Note store contract and SQLite implementation.
//!
//! # Responsibility
//! - Persist one serialized note record per calendar date key.
//! - Keep SQL and JSON codec details inside the persistence boundary.
//!
//! # Invariants
//! - Write paths must call `NoteRecord::validate()` before SQL mutations.
//! - `put` replaces the whole record; there are no partial field patches.
//! - `delete` of an absent key is a no-op, not an error.
//! - `list_all` skips undecodable rows instead of failing the listing.

use crate::db::migrations::latest_version;
use crate::db::DbError;
use crate::model::date_key::DateKey;
use crate::model::note::{NoteRecord, NoteValidationError};
use log::warn;
use rusqlite::{params, Connection};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for note persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    /// Record failed domain validation before a write.
    Validation(NoteValidationError),
    /// Underlying storage failed or is unavailable.
    Db(DbError),
    /// Stored bytes under a key are not a decodable note record.
    Decode { date_key: String, message: String },
    /// Record could not be serialized for storage.
    Encode { date_key: String, message: String },
    /// Connection has not been migrated to the expected schema version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Migrated connection is missing a required table.
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::Decode { date_key, message } => {
                write!(f, "stored note for `{date_key}` is not decodable: {message}")
            }
            Self::Encode { date_key, message } => {
                write!(f, "note for `{date_key}` could not be serialized: {message}")
            }
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table `{table}` is missing")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<NoteValidationError> for RepoError {
    fn from(value: NoteValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Key-value persistence contract for per-day note records.
pub trait NoteStore {
    /// Stores `record` under `key`, fully replacing any existing record.
    fn put(&self, key: &DateKey, record: &NoteRecord) -> RepoResult<()>;
    /// Returns the record for `key`, or `None` when no row exists.
    ///
    /// A row whose body cannot be decoded yields `RepoError::Decode`;
    /// callers decide whether to treat that as "no usable note".
    fn get(&self, key: &DateKey) -> RepoResult<Option<NoteRecord>>;
    /// Removes the record for `key` if present. Absent keys are a no-op.
    fn delete(&self, key: &DateKey) -> RepoResult<()>;
    /// Returns every stored entry, unordered with respect to date.
    ///
    /// Rows with malformed keys or undecodable bodies are skipped.
    fn list_all(&self) -> RepoResult<Vec<(DateKey, NoteRecord)>>;
}

/// SQLite-backed note store.
pub struct SqliteNoteStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteNoteStore<'conn> {
    /// Constructs a store from a migrated/ready connection.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        let expected = latest_version();
        let actual = conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?;
        if actual != expected {
            return Err(RepoError::UninitializedConnection {
                expected_version: expected,
                actual_version: actual,
            });
        }

        if !table_exists(conn, "notes")? {
            return Err(RepoError::MissingRequiredTable("notes"));
        }

        Ok(Self { conn })
    }
}

impl NoteStore for SqliteNoteStore<'_> {
    fn put(&self, key: &DateKey, record: &NoteRecord) -> RepoResult<()> {
        record.validate()?;

        let body = encode_body(key, record)?;
        self.conn.execute(
            "INSERT INTO notes (date_key, body)
             VALUES (?1, ?2)
             ON CONFLICT(date_key) DO UPDATE SET body = excluded.body;",
            params![key.to_string(), body],
        )?;

        Ok(())
    }

    fn get(&self, key: &DateKey) -> RepoResult<Option<NoteRecord>> {
        let mut stmt = self
            .conn
            .prepare("SELECT body FROM notes WHERE date_key = ?1;")?;

        let mut rows = stmt.query([key.to_string()])?;
        if let Some(row) = rows.next()? {
            let body: String = row.get(0)?;
            return decode_body(&key.to_string(), &body).map(Some);
        }

        Ok(None)
    }

    fn delete(&self, key: &DateKey) -> RepoResult<()> {
        // Zero affected rows means the key never existed; that is fine.
        self.conn.execute(
            "DELETE FROM notes WHERE date_key = ?1;",
            [key.to_string()],
        )?;
        Ok(())
    }

    fn list_all(&self) -> RepoResult<Vec<(DateKey, NoteRecord)>> {
        let mut stmt = self.conn.prepare("SELECT date_key, body FROM notes;")?;
        let mut rows = stmt.query([])?;
        let mut entries = Vec::new();

        while let Some(row) = rows.next()? {
            let key_text: String = row.get(0)?;
            let body: String = row.get(1)?;

            let key = match key_text.parse::<DateKey>() {
                Ok(key) => key,
                Err(err) => {
                    warn!(
                        "event=note_list module=repo status=skip date_key={key_text} error_code=malformed_key error={err}"
                    );
                    continue;
                }
            };

            match decode_body(&key_text, &body) {
                Ok(record) => entries.push((key, record)),
                Err(err) => {
                    warn!(
                        "event=note_list module=repo status=skip date_key={key_text} error_code=undecodable_body error={err}"
                    );
                }
            }
        }

        Ok(entries)
    }
}

fn encode_body(key: &DateKey, record: &NoteRecord) -> RepoResult<String> {
    serde_json::to_string(record).map_err(|err| RepoError::Encode {
        date_key: key.to_string(),
        message: err.to_string(),
    })
}

fn decode_body(date_key: &str, body: &str) -> RepoResult<NoteRecord> {
    let record: NoteRecord =
        serde_json::from_str(body).map_err(|err| RepoError::Decode {
            date_key: date_key.to_string(),
            message: err.to_string(),
        })?;

    // A body that parses but violates record invariants is just as unusable
    // as one that does not parse.
    record.validate().map_err(|err| RepoError::Decode {
        date_key: date_key.to_string(),
        message: err.to_string(),
    })?;

    Ok(record)
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
