//! Calendar-date identity for diary entries.
//!
//! # Responsibility
//! - Derive the `YYYY-MM-DD` key that identifies one diary day.
//! - Parse stored keys back into calendar dates, strictly.
//!
//! # Invariants
//! - Formatting is always zero-padded ISO `YYYY-MM-DD`.
//! - Two instants on the same calendar day derive the same key.
//! - Keys carry no time-of-day or timezone component.

use chrono::{DateTime, Datelike, Local, NaiveDate, TimeZone};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

static DATE_KEY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid date key regex"));

/// Error for rejected date key strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateKeyError {
    /// Input does not match the `YYYY-MM-DD` shape.
    Malformed(String),
    /// Shape matches but the value is not a real calendar date.
    OutOfRange(String),
}

impl Display for DateKeyError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Malformed(value) => {
                write!(f, "date key `{value}` does not match YYYY-MM-DD")
            }
            Self::OutOfRange(value) => {
                write!(f, "date key `{value}` is not a valid calendar date")
            }
        }
    }
}

impl Error for DateKeyError {}

/// Unique storage identity of one diary day.
///
/// Wraps a calendar date so that every key rendered from it is a valid,
/// zero-padded ISO date string. The wall-clock day is used as-is; there is
/// no UTC normalization that could shift the calendar day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DateKey(NaiveDate);

impl DateKey {
    /// Creates a key from an explicit calendar date.
    pub fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Derives the key for the current device-local calendar day.
    pub fn today() -> Self {
        Self(Local::now().date_naive())
    }

    /// Derives the key from any datetime instant.
    ///
    /// Uses the instant's own year/month/day, so different times on the same
    /// calendar day collapse to one key.
    pub fn from_datetime<Tz: TimeZone>(instant: &DateTime<Tz>) -> Self {
        Self(instant.date_naive())
    }

    /// Returns the underlying calendar date.
    pub fn date(&self) -> NaiveDate {
        self.0
    }
}

impl Display for DateKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}",
            self.0.year(),
            self.0.month(),
            self.0.day()
        )
    }
}

impl FromStr for DateKey {
    type Err = DateKeyError;

    /// Parses a stored key, rejecting anything that is not strict
    /// zero-padded `YYYY-MM-DD`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if !DATE_KEY_RE.is_match(value) {
            return Err(DateKeyError::Malformed(value.to_string()));
        }

        NaiveDate::parse_from_str(value, "%Y-%m-%d")
            .map(Self)
            .map_err(|_| DateKeyError::OutOfRange(value.to_string()))
    }
}

impl TryFrom<String> for DateKey {
    type Error = DateKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DateKey> for String {
    fn from(value: DateKey) -> Self {
        value.to_string()
    }
}
