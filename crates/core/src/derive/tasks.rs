//! Task derivation
//!
//! Computes every derived field of a [`TaskRecord`] from the raw row
//! alone. Derived fields are never read back, which makes re-derivation a
//! fixed point: `derive_task(&record.row)` always reproduces `record`.

use chrono::Datelike;
use workdeck_domain::{DurationBucket, PeriodKey, Punctuality, TaskRecord, TaskRow};

/// Derive metrics for one task row.
pub fn derive_task(row: &TaskRow) -> TaskRecord {
    let lag_days = match (row.completed_at, row.deadline) {
        (Some(completed), Some(deadline)) => Some((completed - deadline).num_days()),
        _ => None,
    };

    TaskRecord {
        lag_days,
        punctuality: Punctuality::from_lag_days(lag_days),
        period_key: row.completed_at.map(PeriodKey::from_date),
        completion_week: row.completed_at.map(|d| d.iso_week().week()),
        completion_weekday: row.completed_at.map(|d| d.format("%A").to_string()),
        duration_bucket: DurationBucket::from_hours(row.duration_hours),
        row: row.clone(),
    }
}

/// Derive metrics for a whole normalized dataset, preserving row order.
pub fn derive_tasks(rows: &[TaskRow]) -> Vec<TaskRecord> {
    rows.iter().map(derive_task).collect()
}
