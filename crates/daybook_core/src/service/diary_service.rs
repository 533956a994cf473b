//! Diary use-case service.
//!
//! # Responsibility
//! - Provide save/load/delete/list entry points over any note store.
//! - Mask single-read decode failures as "no usable note".
//! - Shape the calendar overview (date order, body previews).
//!
//! # Invariants
//! - Save uses whole-record replacement semantics.
//! - The overview is sorted ascending by date key.
//! - A decode failure never aborts an overview listing.

use crate::model::date_key::DateKey;
use crate::model::note::NoteRecord;
use crate::repo::note_repo::{NoteStore, RepoError, RepoResult};
use log::{info, warn};
use once_cell::sync::Lazy;
use regex::Regex;

const NOTE_PREVIEW_MAX_CHARS: usize = 50;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// One calendar day in the overview listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiaryDay {
    /// The day's storage key.
    pub date_key: DateKey,
    /// Whitespace-normalized body excerpt, at most 50 characters.
    pub preview: String,
}

/// Use-case facade over note store implementations.
pub struct DiaryService<S: NoteStore> {
    store: S,
}

impl<S: NoteStore> DiaryService<S> {
    /// Creates a service using the provided store implementation.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Stores the whole record for `key`, replacing any previous one.
    pub fn save_note(&self, key: &DateKey, record: &NoteRecord) -> RepoResult<()> {
        match self.store.put(key, record) {
            Ok(()) => {
                info!("event=note_save module=service status=ok date_key={key}");
                Ok(())
            }
            Err(err) => {
                warn!("event=note_save module=service status=error date_key={key} error={err}");
                Err(err)
            }
        }
    }

    /// Loads the record for `key`.
    ///
    /// An undecodable stored body is treated as "no usable note" and
    /// reported as `None`; storage-transport errors still propagate.
    pub fn load_note(&self, key: &DateKey) -> RepoResult<Option<NoteRecord>> {
        match self.store.get(key) {
            Ok(found) => Ok(found),
            Err(RepoError::Decode { date_key, message }) => {
                warn!(
                    "event=note_load module=service status=unusable date_key={date_key} error={message}"
                );
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Removes the record for `key`. Absent keys are a no-op.
    pub fn delete_note(&self, key: &DateKey) -> RepoResult<()> {
        self.store.delete(key)?;
        info!("event=note_delete module=service status=ok date_key={key}");
        Ok(())
    }

    /// Lists every readable day sorted ascending by date.
    ///
    /// Corrupt rows were already skipped by the store; the overview never
    /// fails because of one bad entry.
    pub fn calendar_overview(&self) -> RepoResult<Vec<DiaryDay>> {
        let mut entries = self.store.list_all()?;
        entries.sort_by_key(|(key, _)| *key);

        Ok(entries
            .into_iter()
            .map(|(date_key, record)| DiaryDay {
                date_key,
                preview: derive_note_preview(&record.note),
            })
            .collect())
    }
}

/// Derives the overview excerpt for one note body.
///
/// Rules: whitespace runs collapse to single spaces, the result is trimmed,
/// and at most the first 50 characters are retained.
pub fn derive_note_preview(content: &str) -> String {
    let normalized = WHITESPACE_RE.replace_all(content, " ");
    normalized
        .trim()
        .chars()
        .take(NOTE_PREVIEW_MAX_CHARS)
        .collect()
}
