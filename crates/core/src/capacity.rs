//! Capacity occupancy
//!
//! Occupancy relates produced hours to a fixed monthly reference of
//! 176 hours per person. Two competing definitions coexist in the
//! dashboards and are kept as separately named functions on purpose:
//!
//! - [`occupancy_mean_of_monthly`]: average of a person's per-month
//!   occupancy percentages, over the months they actually appear in.
//! - [`occupancy_total_over_span`]: a person's total hours against
//!   capacity for EVERY month of the filtered span.
//!
//! For a person active in only part of the span the two disagree;
//! which one a report uses is a product decision, so neither is
//! "the" occupancy.

use std::collections::BTreeMap;

use workdeck_domain::constants::HOURS_PER_PERSON_MONTH;
use workdeck_domain::{PeriodKey, TaskRecord};

use crate::aggregate;

/// Produced hours per (owner, period) cell, the heatmap's raw material.
///
/// Rows without an owner or a completion period are excluded, per the
/// period-keyed aggregation invariant.
pub fn person_period_hours(records: &[TaskRecord]) -> BTreeMap<(String, PeriodKey), f64> {
    aggregate::sum_by(
        records,
        |r| r.row.owner.clone().zip(r.period_key),
        |r| Some(r.row.duration_hours),
    )
}

/// Mean-of-monthly occupancy percentage per person.
pub fn occupancy_mean_of_monthly(records: &[TaskRecord]) -> BTreeMap<String, f64> {
    aggregate::mean_of_inner_sums(
        records,
        |r| r.row.owner.clone(),
        |r| r.period_key,
        |r| Some(r.row.duration_hours),
    )
    .into_iter()
    .map(|(person, monthly_hours)| (person, monthly_hours / HOURS_PER_PERSON_MONTH * 100.0))
    .collect()
}

/// Total-over-span occupancy per person: `(total_hours, occupancy_pct)`.
///
/// The span is the number of distinct completion periods in the filtered
/// dataset, shared by everyone. Returns an empty map when the dataset has
/// no periods at all (no division by zero).
pub fn occupancy_total_over_span(records: &[TaskRecord]) -> BTreeMap<String, (f64, f64)> {
    let months = aggregate::nunique(records, |r: &TaskRecord| r.period_key);
    if months == 0 {
        return BTreeMap::new();
    }

    #[allow(clippy::cast_precision_loss)]
    let span_capacity = HOURS_PER_PERSON_MONTH * months as f64;

    aggregate::sum_by(records, |r| r.row.owner.clone(), |r| Some(r.row.duration_hours))
        .into_iter()
        .map(|(person, total)| (person, (total, total / span_capacity * 100.0)))
        .collect()
}

/// Whole-dataset occupancy: total hours over people x months x capacity.
///
/// `None` when the filtered dataset has no owners or no periods.
pub fn global_occupancy(records: &[TaskRecord]) -> Option<f64> {
    let people = aggregate::nunique(records, |r: &TaskRecord| r.row.owner.clone());
    let months = aggregate::nunique(records, |r: &TaskRecord| r.period_key);
    let total_hours: f64 = records.iter().map(|r| r.row.duration_hours).sum();

    #[allow(clippy::cast_precision_loss)]
    let capacity = people as f64 * months as f64 * HOURS_PER_PERSON_MONTH;
    aggregate::percent(total_hours, capacity)
}
