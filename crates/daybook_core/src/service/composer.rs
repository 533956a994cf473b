//! Note composition state machine.
//!
//! # Responsibility
//! - Track the editor lifecycle for one selected diary day.
//! - Apply save/delete/image-pick outcomes to editor state.
//!
//! # Invariants
//! - A failed save keeps the draft intact and the phase in `Editing`.
//! - Deleting returns the day to `NoEntry` whether or not a record existed.
//! - A media permission denial is surfaced at most once per composer.

use crate::model::date_key::DateKey;
use crate::model::note::{NoteRecord, FONT_FAMILIES};
use crate::repo::note_repo::{NoteStore, RepoResult};
use crate::service::diary_service::DiaryService;
use log::warn;

/// Alert shown when the media library permission is refused.
pub const MEDIA_PERMISSION_ALERT: &str =
    "Sorry, we need camera roll permissions to make this work!";

/// Editor lifecycle state for one date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposerPhase {
    /// No stored record exists for this date.
    NoEntry,
    /// A stored record exists and is being displayed.
    Viewing,
    /// The composition surface is open and holds a draft.
    Editing,
}

/// Outcome of one image-picker interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ImagePick {
    /// The user selected an image at the given local resource locator.
    Picked(String),
    /// The user dismissed the picker.
    Cancelled,
    /// The media library permission was refused.
    Denied,
}

/// Per-date editor view-model.
///
/// Draft mutators only apply while the phase is `Editing`; outside of it
/// the composition surface is not on screen and they are ignored.
#[derive(Debug)]
pub struct Composer {
    date_key: DateKey,
    phase: ComposerPhase,
    draft: NoteRecord,
    permission_alerted: bool,
}

impl Composer {
    /// Creates a composer for a date with no known stored record.
    pub fn new(date_key: DateKey) -> Self {
        Self {
            date_key,
            phase: ComposerPhase::NoEntry,
            draft: NoteRecord::default(),
            permission_alerted: false,
        }
    }

    /// Creates a composer for a date, probing storage for an existing record.
    ///
    /// A load failure is treated as "no entry"; opening a day never fails.
    pub fn open<S: NoteStore>(service: &DiaryService<S>, date_key: DateKey) -> Self {
        let mut composer = Self::new(date_key);
        match service.load_note(&date_key) {
            Ok(Some(_)) => composer.phase = ComposerPhase::Viewing,
            Ok(None) => {}
            Err(err) => {
                warn!(
                    "event=composer_open module=service status=degraded date_key={date_key} error={err}"
                );
            }
        }
        composer
    }

    /// Opens the composition surface.
    ///
    /// The draft initializes from the stored record when one loads, and
    /// from defaults when the day is absent, unusable, or the load fails.
    pub fn begin_editing<S: NoteStore>(&mut self, service: &DiaryService<S>) {
        self.draft = match service.load_note(&self.date_key) {
            Ok(Some(record)) => record,
            Ok(None) => NoteRecord::default(),
            Err(err) => {
                warn!(
                    "event=composer_edit module=service status=degraded date_key={} error={err}",
                    self.date_key
                );
                NoteRecord::default()
            }
        };
        self.phase = ComposerPhase::Editing;
    }

    /// Replaces the draft body text.
    pub fn set_note(&mut self, note: impl Into<String>) {
        if self.phase == ComposerPhase::Editing {
            self.draft.note = note.into();
        }
    }

    /// Replaces the draft card color.
    pub fn set_card_color(&mut self, color: impl Into<String>) {
        if self.phase == ComposerPhase::Editing {
            self.draft.card_color = color.into();
        }
    }

    /// Flips the draft between normal and bold weight.
    pub fn toggle_bold(&mut self) {
        if self.phase == ComposerPhase::Editing {
            self.draft.font_weight = self.draft.font_weight.toggled();
        }
    }

    /// Flips the draft between normal and italic slant.
    pub fn toggle_italic(&mut self) {
        if self.phase == ComposerPhase::Editing {
            self.draft.font_style = self.draft.font_style.toggled();
        }
    }

    /// Selects a draft font family from the fixed identifier set.
    ///
    /// Returns `false` (leaving the draft unchanged) for unknown names.
    pub fn set_font_family(&mut self, family: &str) -> bool {
        if self.phase != ComposerPhase::Editing {
            return false;
        }
        if !FONT_FAMILIES.contains(&family) {
            return false;
        }
        self.draft.font_family = family.to_string();
        true
    }

    /// Applies one image-picker outcome to the draft.
    ///
    /// Returns an alert message the first time permission is denied; the
    /// composition flow continues without an image either way.
    pub fn apply_image_pick(&mut self, pick: ImagePick) -> Option<&'static str> {
        if self.phase != ComposerPhase::Editing {
            return None;
        }
        match pick {
            ImagePick::Picked(uri) => {
                self.draft.image_uri = Some(uri);
                None
            }
            ImagePick::Cancelled => None,
            ImagePick::Denied => {
                if self.permission_alerted {
                    None
                } else {
                    self.permission_alerted = true;
                    Some(MEDIA_PERMISSION_ALERT)
                }
            }
        }
    }

    /// Persists the whole draft for this date.
    ///
    /// On success the surface clears: the draft resets to defaults and the
    /// phase returns to `NoEntry`. On failure the draft and phase are left
    /// untouched so the user can retry; any previously stored record is
    /// unaffected.
    pub fn save<S: NoteStore>(&mut self, service: &DiaryService<S>) -> RepoResult<()> {
        if self.phase != ComposerPhase::Editing {
            return Ok(());
        }

        service.save_note(&self.date_key, &self.draft)?;
        self.draft = NoteRecord::default();
        self.phase = ComposerPhase::NoEntry;
        Ok(())
    }

    /// Deletes this date's stored record.
    ///
    /// The day reads as `NoEntry` afterwards regardless of whether a record
    /// actually existed.
    pub fn delete<S: NoteStore>(&mut self, service: &DiaryService<S>) -> RepoResult<()> {
        service.delete_note(&self.date_key)?;
        self.draft = NoteRecord::default();
        self.phase = ComposerPhase::NoEntry;
        Ok(())
    }

    /// The date this composer edits.
    pub fn date_key(&self) -> DateKey {
        self.date_key
    }

    /// Current editor lifecycle state.
    pub fn phase(&self) -> ComposerPhase {
        self.phase
    }

    /// Current draft contents.
    pub fn draft(&self) -> &NoteRecord {
        &self.draft
    }
}
