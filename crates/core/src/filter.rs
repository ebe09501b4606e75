//! Filter stage
//!
//! Conjunction of independent per-column predicates over derived records.
//! The dashboards' multi-select widgets have a deliberate convention: an
//! empty selection means "no restriction", not "reject everything".
//! [`Selection`] models that convention as a sum type so the two meanings
//! of an empty set can never be confused again.
//!
//! Predicates are independent and combine by logical AND, so application
//! order cannot affect the result. A selection naming a category absent
//! from the data simply yields an empty result; it is not an error.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use workdeck_domain::{DurationBucket, PeriodKey, SaleRecord, TaskRecord, TeamRoster};

/// A multi-select widget's state: either unrestricted or restricted to an
/// explicit value set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Selection<T: Ord> {
    /// No restriction; every value (including missing ones) passes.
    Unrestricted,
    /// Only the listed values pass; rows with a missing value are
    /// excluded.
    RestrictedTo(BTreeSet<T>),
}

impl<T: Ord> Default for Selection<T> {
    fn default() -> Self {
        Self::Unrestricted
    }
}

impl<T: Ord> Selection<T> {
    /// Restrict to the given values. An empty list normalizes to
    /// [`Selection::Unrestricted`], preserving the widget convention at
    /// construction time.
    pub fn restricted_to<I: IntoIterator<Item = T>>(values: I) -> Self {
        let set: BTreeSet<T> = values.into_iter().collect();
        if set.is_empty() {
            Self::Unrestricted
        } else {
            Self::RestrictedTo(set)
        }
    }

    /// Whether this selection imposes no restriction.
    pub const fn is_unrestricted(&self) -> bool {
        matches!(self, Self::Unrestricted)
    }

    /// Whether a present value passes.
    pub fn allows(&self, value: &T) -> bool {
        match self {
            Self::Unrestricted => true,
            Self::RestrictedTo(set) => set.contains(value),
        }
    }

    /// Whether an optional value passes. A missing value passes only when
    /// the selection is unrestricted.
    pub fn allows_opt(&self, value: Option<&T>) -> bool {
        match (self, value) {
            (Self::Unrestricted, _) => true,
            (Self::RestrictedTo(set), Some(value)) => set.contains(value),
            (Self::RestrictedTo(_), None) => false,
        }
    }
}

/// Inclusive calendar-date range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Whether a date falls within the range, bounds included.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }
}

/// Filter configuration for the task pipeline.
///
/// Team membership is resolved through the [`TeamRoster`] passed to
/// [`TaskFilter::apply`]: selecting teams restricts owners to the union of
/// those teams' rosters, mirroring how the dashboard's team widget works.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskFilter {
    pub teams: Selection<String>,
    pub owners: Selection<String>,
    pub periods: Selection<PeriodKey>,
    /// Completion-date window, bounds inclusive. Rows without a completion
    /// date are excluded while a window is set.
    pub completed_between: Option<DateRange>,
    /// Keep only overdue tasks (`lag_days > 0`). Unknown punctuality is
    /// excluded, never guessed.
    pub overdue_only: bool,
    pub duration_buckets: Selection<DurationBucket>,
}

impl TaskFilter {
    /// Whether one record passes every predicate.
    pub fn matches(&self, roster: &TeamRoster, record: &TaskRecord) -> bool {
        let members = self.team_members(roster);
        self.matches_resolved(members.as_ref(), record)
    }

    /// Filter a derived dataset, preserving row order.
    pub fn apply(&self, roster: &TeamRoster, records: &[TaskRecord]) -> Vec<TaskRecord> {
        let members = self.team_members(roster);
        records
            .iter()
            .filter(|record| self.matches_resolved(members.as_ref(), record))
            .cloned()
            .collect()
    }

    /// Union of rostered members for the selected teams, `None` when the
    /// team predicate is unrestricted.
    fn team_members(&self, roster: &TeamRoster) -> Option<BTreeSet<String>> {
        match &self.teams {
            Selection::Unrestricted => None,
            Selection::RestrictedTo(teams) => {
                Some(roster.members_of_teams(teams.iter().map(String::as_str)))
            }
        }
    }

    fn matches_resolved(
        &self,
        team_members: Option<&BTreeSet<String>>,
        record: &TaskRecord,
    ) -> bool {
        if let Some(members) = team_members {
            match record.row.owner.as_ref() {
                Some(owner) if members.contains(owner) => {}
                _ => return false,
            }
        }

        if !self.owners.allows_opt(record.row.owner.as_ref()) {
            return false;
        }

        if !self.periods.allows_opt(record.period_key.as_ref()) {
            return false;
        }

        if let Some(window) = self.completed_between {
            match record.row.completed_at {
                Some(date) if window.contains(date) => {}
                _ => return false,
            }
        }

        if self.overdue_only && !matches!(record.lag_days, Some(lag) if lag > 0) {
            return false;
        }

        self.duration_buckets.allows_opt(record.duration_bucket.as_ref())
    }
}

/// Filter configuration for the sales pipeline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaleFilter {
    pub invoice_years: Selection<i32>,
    pub salespeople: Selection<String>,
    pub solution_types: Selection<String>,
    pub clients: Selection<String>,
}

impl SaleFilter {
    /// Whether one record passes every predicate.
    pub fn matches(&self, record: &SaleRecord) -> bool {
        self.invoice_years.allows_opt(record.invoice_year.as_ref())
            && self.salespeople.allows_opt(record.row.salesperson.as_ref())
            && self.solution_types.allows_opt(record.row.solution_type.as_ref())
            && self.clients.allows(&record.row.client)
    }

    /// Filter a derived dataset, preserving row order.
    pub fn apply(&self, records: &[SaleRecord]) -> Vec<SaleRecord> {
        records.iter().filter(|record| self.matches(record)).cloned().collect()
    }
}
