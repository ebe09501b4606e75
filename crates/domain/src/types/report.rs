//! Report payload types for the rendering front end
//!
//! This module centralizes the tabular and scalar shapes the dashboards
//! consume:
//! - KPI summaries (scalar cards)
//! - Grouped series (one key, one value)
//! - Multi-metric rows (production, punctuality, productivity)
//! - Insight summaries
//!
//! Aggregations over an empty filtered dataset surface as `None` fields or
//! empty vectors, never NaN; renderers branch on emptiness and show a
//! neutral "no data" message.

use serde::{Deserialize, Serialize};

use super::period::PeriodKey;

/* -------------------------------------------------------------------------- */
/* KPI Summaries */
/* -------------------------------------------------------------------------- */

/// Scalar indicators for the task dashboard header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskKpis {
    /// Rows whose status equals the configured done-label.
    pub completed_tasks: u64,
    /// Total produced hours over the filtered rows.
    pub total_hours: f64,
    /// Mean lag in days over rows with a defined lag; `None` when no row
    /// has one.
    pub mean_lag_days: Option<f64>,
    /// Share of on-time tasks among tasks with known punctuality, percent.
    pub punctuality_rate_pct: Option<f64>,
    /// Total hours against people x months x monthly capacity, percent
    /// (the total-over-span definition).
    pub global_occupancy_pct: Option<f64>,
    /// Distinct owners in the filtered rows.
    pub people: u64,
    /// Distinct completion periods in the filtered rows.
    pub periods: u64,
}

/// Scalar indicators for the sales dashboard header.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesKpis {
    /// Sum of priced amounts.
    pub total_revenue: f64,
    /// All filtered sale rows, priced or not.
    pub sale_count: u64,
    /// Rows with a parseable amount; the mean-ticket denominator.
    pub priced_sale_count: u64,
    pub mean_ticket: Option<f64>,
    pub mean_lead_time_days: Option<f64>,
}

/* -------------------------------------------------------------------------- */
/* Grouped Series */
/* -------------------------------------------------------------------------- */

/// One grouped key with a single reduced metric.
///
/// Used for every one-dimensional series: revenue by month, hours by
/// person, top clients, and so on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricPoint {
    pub key: String,
    pub value: f64,
}

/// One bucket label with a row count, for distribution charts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DistributionPoint {
    pub label: String,
    pub count: u64,
}

/// Hours and task count for one team or one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionPoint {
    pub key: String,
    pub hours: f64,
    pub tasks: u64,
}

/// Punctuality rate for one team, person, or period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PunctualityPoint {
    pub key: String,
    /// Share of on-time tasks among tasks with known punctuality, percent.
    pub rate_pct: f64,
    /// Tasks with known punctuality behind the rate.
    pub tasks: u64,
}

/// Hours-per-task efficiency for one person.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EfficiencyEntry {
    pub person: String,
    pub total_hours: f64,
    pub task_count: u64,
    pub hours_per_task: f64,
}

/// One (person, period) cell of the workload heatmap.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeatmapCell {
    pub person: String,
    pub period: PeriodKey,
    pub hours: f64,
}

/// Task throughput per person for one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodThroughput {
    pub period: PeriodKey,
    pub tasks: u64,
    pub people: u64,
    /// `None` when no owner is known for the period.
    pub tasks_per_person: Option<f64>,
}

/* -------------------------------------------------------------------------- */
/* Occupancy & Productivity */
/* -------------------------------------------------------------------------- */

/// Mean-of-monthly occupancy for one person.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OccupancyEntry {
    pub person: String,
    pub occupancy_pct: f64,
}

/// Produced hours and occupancy for one (team, person, period) cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonMonthProductivity {
    pub team: String,
    pub person: String,
    pub period: PeriodKey,
    pub hours: f64,
    pub occupancy_pct: f64,
}

/// Mean of member occupancies for one (team, period) cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMonthProductivity {
    pub team: String,
    pub period: PeriodKey,
    pub mean_occupancy_pct: f64,
}

/// Whole-span occupancy for one person: total hours over capacity x
/// distinct periods in the filtered dataset.
///
/// This is the total-over-span definition; it differs numerically from the
/// mean-of-monthly [`OccupancyEntry`] whenever a person worked only part of
/// the span. Both are reported, deliberately.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PersonSpanProductivity {
    pub person: String,
    pub total_hours: f64,
    pub occupancy_pct: f64,
}

/* -------------------------------------------------------------------------- */
/* Insights */
/* -------------------------------------------------------------------------- */

/// Automatic headline findings for the task dashboard footer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskInsights {
    /// Person with the most produced hours.
    pub top_producer: Option<MetricPoint>,
    /// Team with the best punctuality rate.
    pub best_punctuality_team: Option<PunctualityPoint>,
    /// People whose mean-of-monthly occupancy exceeds the overload
    /// threshold.
    pub overloaded: Vec<OccupancyEntry>,
}
