//! Task-tracking record types
//!
//! A task row is one completed task exported from the project tracker. The
//! raw fields survive normalization as-is; the derived fields (lag days,
//! punctuality, period key, duration bucket) are computed by the derivation
//! stage in `workdeck-core` and never written back into the raw row.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::period::PeriodKey;

/// Whether a task met its deadline.
///
/// Punctuality is three-valued: when either the deadline or the completion
/// date is missing, lag is undefined and the task is `Unknown`. Unknown
/// tasks must never be counted on either side of a punctuality rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Punctuality {
    OnTime,
    Late,
    Unknown,
}

impl Punctuality {
    /// Classify from a lag in days (completion minus deadline).
    ///
    /// Zero or negative lag counts as on time.
    pub fn from_lag_days(lag_days: Option<i64>) -> Self {
        match lag_days {
            Some(lag) if lag <= 0 => Self::OnTime,
            Some(_) => Self::Late,
            None => Self::Unknown,
        }
    }

    /// `Some(true)` for on-time, `Some(false)` for late, `None` for unknown.
    pub const fn as_on_time(self) -> Option<bool> {
        match self {
            Self::OnTime => Some(true),
            Self::Late => Some(false),
            Self::Unknown => None,
        }
    }
}

/// Duration band of a completed task, over half-open bins
/// `(0,2] (2,8] (8,24] (24,40] (40,inf)` hours.
///
/// A duration of exactly 0 falls below the first bin and has no bucket:
/// zero usually means the tracker had no duration recorded at all, and
/// labelling those rows "< 2h" would disguise missing data as fast work.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationBucket {
    UpTo2h,
    From2To8h,
    From8To24h,
    From24To40h,
    Over40h,
}

impl DurationBucket {
    /// All buckets in ascending order, for rendering distributions.
    pub const ALL: [Self; 5] =
        [Self::UpTo2h, Self::From2To8h, Self::From8To24h, Self::From24To40h, Self::Over40h];

    /// Classify a duration in hours. Upper bounds are inclusive.
    ///
    /// Returns `None` for zero, negative, or non-finite input.
    pub fn from_hours(hours: f64) -> Option<Self> {
        if !hours.is_finite() || hours <= 0.0 {
            return None;
        }
        Some(if hours <= 2.0 {
            Self::UpTo2h
        } else if hours <= 8.0 {
            Self::From2To8h
        } else if hours <= 24.0 {
            Self::From8To24h
        } else if hours <= 40.0 {
            Self::From24To40h
        } else {
            Self::Over40h
        })
    }

    /// Display label used by dashboards and the CSV export.
    pub const fn label(self) -> &'static str {
        match self {
            Self::UpTo2h => "< 2h",
            Self::From2To8h => "2-8h",
            Self::From8To24h => "8-24h",
            Self::From24To40h => "24-40h",
            Self::Over40h => "> 40h",
        }
    }
}

impl std::fmt::Display for DurationBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Normalized raw fields of one task row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRow {
    /// Task title.
    pub name: String,
    /// Person responsible for the task.
    pub owner: Option<String>,
    /// Team name as recorded on the sheet (the roster config is the
    /// authority for team membership; this column is informational).
    pub team: Option<String>,
    /// Tracker status. Sheets only export completed work, so a missing
    /// status is normalized to the configured done-label.
    pub status: String,
    /// Produced hours; missing or unparseable durations normalize to 0.
    pub duration_hours: f64,
    pub deadline: Option<NaiveDate>,
    pub completed_at: Option<NaiveDate>,
}

/// A task row together with its derived metrics.
///
/// Derivation reads only `row`; re-deriving a record therefore reproduces
/// the same derived fields (idempotence).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskRecord {
    #[serde(flatten)]
    pub row: TaskRow,
    /// Completion date minus deadline, in days. Negative means early.
    pub lag_days: Option<i64>,
    pub punctuality: Punctuality,
    /// Defined iff `completed_at` is defined.
    pub period_key: Option<PeriodKey>,
    /// ISO week of the completion date.
    pub completion_week: Option<u32>,
    /// English weekday name of the completion date.
    pub completion_weekday: Option<String>,
    pub duration_bucket: Option<DurationBucket>,
}
