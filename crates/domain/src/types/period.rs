//! Year-month grouping key
//!
//! Spreadsheet-derived metrics are grouped by the month a task was completed
//! or a sale was invoiced. `PeriodKey` is that grouping key: an owned
//! (year, month) pair that formats as `"YYYY-MM"` and orders
//! chronologically.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::errors::WorkdeckError;

/// A "year-month" grouping key derived from a completion or invoice date.
///
/// Lexical order of the `"YYYY-MM"` rendering matches the derived `Ord`,
/// so grouped output sorted by key is automatically chronological.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub struct PeriodKey {
    year: i32,
    month: u32,
}

impl PeriodKey {
    /// Build a key from explicit parts.
    ///
    /// Returns `None` when `month` is outside `1..=12`.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// Derive the key from a calendar date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self { year: date.year(), month: date.month() }
    }

    /// Calendar year component.
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Calendar month component (1-12).
    pub const fn month(&self) -> u32 {
        self.month
    }
}

impl fmt::Display for PeriodKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl From<PeriodKey> for String {
    fn from(key: PeriodKey) -> Self {
        key.to_string()
    }
}

impl FromStr for PeriodKey {
    type Err = WorkdeckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || WorkdeckError::InvalidInput(format!("Invalid period key: {s}"));

        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;

        Self::new(year, month).ok_or_else(invalid)
    }
}

impl TryFrom<String> for PeriodKey {
    type Error = WorkdeckError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
