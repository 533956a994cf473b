//! Diary note domain model.
//!
//! # Responsibility
//! - Define the record persisted for exactly one diary day.
//! - Validate styling fields before storage writes.
//!
//! # Invariants
//! - `card_color` is always a `#RRGGBB` hex string.
//! - `font_family` is one of the fixed identifiers in [`FONT_FAMILIES`].
//! - An empty `note` body is a valid, storable record; only the absence of
//!   a stored row counts as "no entry".

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Card background used until the user picks another color.
pub const DEFAULT_CARD_COLOR: &str = "#F37199";

/// Font family applied to fresh drafts.
pub const DEFAULT_FONT_FAMILY: &str = "sans-serif";

/// Font identifiers selectable in the note editor.
///
/// Persisted records must name one of these; anything else is rejected on
/// the write path.
pub const FONT_FAMILIES: &[&str] = &[
    "sans-serif",
    "serif",
    "monospace",
    "courier",
    "times-new-roman",
    "Arial",
    "Helvetica",
    "Verdana",
    "Georgia",
    "Palatino",
    "Garamond",
    "Comic Sans MS",
    "Impact",
    "Trebuchet MS",
];

static CARD_COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9a-fA-F]{6}$").expect("valid card color regex"));

/// Weight applied to the note body text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

impl FontWeight {
    /// Returns the opposite weight, for the editor's bold toggle.
    pub fn toggled(self) -> Self {
        match self {
            Self::Normal => Self::Bold,
            Self::Bold => Self::Normal,
        }
    }
}

/// Slant applied to the note body text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontStyle {
    #[default]
    Normal,
    Italic,
}

impl FontStyle {
    /// Returns the opposite slant, for the editor's italic toggle.
    pub fn toggled(self) -> Self {
        match self {
            Self::Normal => Self::Italic,
            Self::Italic => Self::Normal,
        }
    }
}

/// Validation error raised before a record reaches storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NoteValidationError {
    /// `card_color` is not a `#RRGGBB` hex string.
    InvalidCardColor(String),
    /// `font_family` is not one of [`FONT_FAMILIES`].
    UnknownFontFamily(String),
    /// `image_uri` is present but blank.
    BlankImageUri,
}

impl Display for NoteValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidCardColor(value) => {
                write!(f, "card color `{value}` is not a #RRGGBB hex string")
            }
            Self::UnknownFontFamily(value) => {
                write!(f, "font family `{value}` is not a known identifier")
            }
            Self::BlankImageUri => write!(f, "image uri must not be blank when set"),
        }
    }
}

impl Error for NoteValidationError {}

/// One diary day's entry and styling.
///
/// Serialized as the exact camelCase object layout held in storage, one
/// record per date key. Updates are whole-record overwrites; there are no
/// partial field patches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteRecord {
    /// Free-form body text. May be empty.
    pub note: String,
    /// Card background as a `#RRGGBB` hex string.
    pub card_color: String,
    /// Body text weight.
    pub font_weight: FontWeight,
    /// Body text slant.
    pub font_style: FontStyle,
    /// One of the fixed identifiers in [`FONT_FAMILIES`].
    pub font_family: String,
    /// Optional local resource locator of one attached image.
    #[serde(default)]
    pub image_uri: Option<String>,
}

impl NoteRecord {
    /// Creates a record with the given body and default styling.
    pub fn new(note: impl Into<String>) -> Self {
        Self {
            note: note.into(),
            ..Self::default()
        }
    }

    /// Checks styling invariants before a storage write.
    ///
    /// The body text is never validated; empty notes are storable.
    pub fn validate(&self) -> Result<(), NoteValidationError> {
        if !CARD_COLOR_RE.is_match(&self.card_color) {
            return Err(NoteValidationError::InvalidCardColor(
                self.card_color.clone(),
            ));
        }

        if !FONT_FAMILIES.contains(&self.font_family.as_str()) {
            return Err(NoteValidationError::UnknownFontFamily(
                self.font_family.clone(),
            ));
        }

        if let Some(uri) = &self.image_uri {
            if uri.trim().is_empty() {
                return Err(NoteValidationError::BlankImageUri);
            }
        }

        Ok(())
    }
}

impl Default for NoteRecord {
    fn default() -> Self {
        Self {
            note: String::new(),
            card_color: DEFAULT_CARD_COLOR.to_string(),
            font_weight: FontWeight::default(),
            font_style: FontStyle::default(),
            font_family: DEFAULT_FONT_FAMILY.to_string(),
            image_uri: None,
        }
    }
}
