//! Task dashboard commands
//!
//! Each function turns the filtered task dataset into one payload of the
//! engineering performance dashboard. [`build_task_report`] bundles them
//! all for the rendering front end; the individual builders are public so
//! callers can recompute a single panel after a filter change.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use workdeck_core::{aggregate, capacity, filter::TaskFilter};
use workdeck_domain::types::report::{
    DistributionPoint, EfficiencyEntry, HeatmapCell, MetricPoint, OccupancyEntry,
    PeriodThroughput, PersonMonthProductivity, PersonSpanProductivity, ProductionPoint,
    PunctualityPoint, TaskInsights, TaskKpis, TeamMonthProductivity,
};
use workdeck_domain::{DurationBucket, ReportConfig, TaskRecord};

use crate::context::AppContext;
use crate::utils::logging::log_command_execution;

/// Everything the task dashboard renders, in one serializable payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskReport {
    pub kpis: TaskKpis,
    pub team_production: Vec<ProductionPoint>,
    pub monthly_evolution: Vec<ProductionPoint>,
    pub duration_distribution: Vec<DistributionPoint>,
    pub top_hours_by_person: Vec<MetricPoint>,
    pub top_tasks_by_person: Vec<MetricPoint>,
    pub efficiency_by_person: Vec<EfficiencyEntry>,
    pub punctuality_by_team: Vec<PunctualityPoint>,
    pub punctuality_by_period: Vec<PunctualityPoint>,
    pub top_punctual_people: Vec<PunctualityPoint>,
    pub occupancy_by_person: Vec<OccupancyEntry>,
    pub person_month_heatmap: Vec<HeatmapCell>,
    pub throughput_by_period: Vec<PeriodThroughput>,
    pub person_month_productivity: Vec<PersonMonthProductivity>,
    pub team_month_productivity: Vec<TeamMonthProductivity>,
    pub person_span_productivity: Vec<PersonSpanProductivity>,
    pub insights: TaskInsights,
}

/// Apply the dashboard filter to the loaded task dataset.
///
/// Team selection resolves through the configured roster; an empty result
/// is valid and every downstream payload stays well-defined on it.
pub fn filtered_tasks(ctx: &AppContext, filter: &TaskFilter) -> Vec<TaskRecord> {
    filter.apply(&ctx.config.roster, ctx.tasks())
}

/// Build the full task dashboard payload.
pub fn build_task_report(ctx: &AppContext, filter: &TaskFilter) -> TaskReport {
    let command_name = "tasks::build_task_report";
    let start = Instant::now();

    let records = filtered_tasks(ctx, filter);
    let report_cfg = &ctx.config.report;

    let report = TaskReport {
        kpis: task_kpis(&records, report_cfg),
        team_production: team_production(&records),
        monthly_evolution: monthly_evolution(&records),
        duration_distribution: duration_distribution(&records),
        top_hours_by_person: top_hours_by_person(&records, report_cfg.top_n),
        top_tasks_by_person: top_tasks_by_person(&records, report_cfg.top_n),
        efficiency_by_person: efficiency_by_person(&records, report_cfg.top_n),
        punctuality_by_team: punctuality_by_team(&records),
        punctuality_by_period: punctuality_by_period(&records),
        top_punctual_people: top_punctual_people(&records, report_cfg),
        occupancy_by_person: occupancy_by_person(&records),
        person_month_heatmap: person_month_heatmap(&records),
        throughput_by_period: throughput_by_period(&records),
        person_month_productivity: person_month_productivity(&records),
        team_month_productivity: team_month_productivity(&records),
        person_span_productivity: person_span_productivity(&records),
        insights: task_insights(&records, report_cfg),
    };

    log_command_execution(command_name, records.len(), start.elapsed(), true);
    report
}

/// Render the filtered row-level table as CSV for download.
pub fn export_rows(ctx: &AppContext, filter: &TaskFilter) -> String {
    let records = filtered_tasks(ctx, filter);
    workdeck_infra::tasks_to_csv(&records)
}

// =============================================================================
// KPI row
// =============================================================================

/// Scalar indicators for the dashboard header.
pub fn task_kpis(records: &[TaskRecord], report_cfg: &ReportConfig) -> TaskKpis {
    let completed_tasks =
        records.iter().filter(|r| r.row.status == report_cfg.done_status).count() as u64;

    let mean_lag_days =
        aggregate::mean(records.iter().filter_map(|r| r.lag_days.map(|lag| lag as f64)));

    let on_time = records.iter().filter(|r| r.punctuality.as_on_time() == Some(true)).count();
    let known = records.iter().filter(|r| r.punctuality.as_on_time().is_some()).count();
    let punctuality_rate_pct = aggregate::percent(on_time as f64, known as f64);

    TaskKpis {
        completed_tasks,
        total_hours: records.iter().map(|r| r.row.duration_hours).sum(),
        mean_lag_days,
        punctuality_rate_pct,
        global_occupancy_pct: capacity::global_occupancy(records),
        people: aggregate::nunique(records, |r: &TaskRecord| r.row.owner.clone()),
        periods: aggregate::nunique(records, |r: &TaskRecord| r.period_key),
    }
}

// =============================================================================
// Production overview
// =============================================================================

/// Hours and task counts per team, heaviest team first.
pub fn team_production(records: &[TaskRecord]) -> Vec<ProductionPoint> {
    let hours = aggregate::sum_by(
        records,
        |r: &TaskRecord| r.row.team.clone(),
        |r| Some(r.row.duration_hours),
    );
    let tasks = aggregate::count_by(records, |r: &TaskRecord| r.row.team.clone());

    let mut points: Vec<ProductionPoint> = hours
        .into_iter()
        .map(|(team, hours)| ProductionPoint {
            tasks: tasks.get(&team).copied().unwrap_or(0),
            key: team,
            hours,
        })
        .collect();
    points.sort_by(|a, b| b.hours.partial_cmp(&a.hours).unwrap_or(std::cmp::Ordering::Equal));
    points
}

/// Hours and task counts per completion period, chronological.
pub fn monthly_evolution(records: &[TaskRecord]) -> Vec<ProductionPoint> {
    let hours =
        aggregate::sum_by(records, |r: &TaskRecord| r.period_key, |r| Some(r.row.duration_hours));
    let tasks = aggregate::count_by(records, |r: &TaskRecord| r.period_key);

    hours
        .into_iter()
        .map(|(period, hours)| ProductionPoint {
            tasks: tasks.get(&period).copied().unwrap_or(0),
            key: period.to_string(),
            hours,
        })
        .collect()
}

/// Task counts per duration bucket, ascending bucket order.
///
/// Rows with no bucket (duration 0) are excluded here and only here.
pub fn duration_distribution(records: &[TaskRecord]) -> Vec<DistributionPoint> {
    let counts = aggregate::count_by(records, |r: &TaskRecord| r.duration_bucket);

    DurationBucket::ALL
        .iter()
        .filter_map(|bucket| {
            counts.get(bucket).map(|count| DistributionPoint {
                label: bucket.to_string(),
                count: *count,
            })
        })
        .collect()
}

// =============================================================================
// Per-person rankings
// =============================================================================

/// Top-N people by produced hours.
pub fn top_hours_by_person(records: &[TaskRecord], n: usize) -> Vec<MetricPoint> {
    let hours = aggregate::sum_by(
        records,
        |r: &TaskRecord| r.row.owner.clone(),
        |r| Some(r.row.duration_hours),
    );
    aggregate::top_n(&hours, n)
        .into_iter()
        .map(|(key, value)| MetricPoint { key, value })
        .collect()
}

/// Top-N people by task count.
pub fn top_tasks_by_person(records: &[TaskRecord], n: usize) -> Vec<MetricPoint> {
    let counts = aggregate::count_by(records, |r: &TaskRecord| r.row.owner.clone());
    let as_f64: std::collections::BTreeMap<String, f64> =
        counts.into_iter().map(|(k, v)| (k, v as f64)).collect();
    aggregate::top_n(&as_f64, n)
        .into_iter()
        .map(|(key, value)| MetricPoint { key, value })
        .collect()
}

/// Top-N people by mean hours per task, slowest first.
pub fn efficiency_by_person(records: &[TaskRecord], n: usize) -> Vec<EfficiencyEntry> {
    let hours = aggregate::sum_by(
        records,
        |r: &TaskRecord| r.row.owner.clone(),
        |r| Some(r.row.duration_hours),
    );
    let tasks = aggregate::count_by(records, |r: &TaskRecord| r.row.owner.clone());

    let mut entries: Vec<EfficiencyEntry> = hours
        .into_iter()
        .filter_map(|(person, total_hours)| {
            let task_count = tasks.get(&person).copied().unwrap_or(0);
            (task_count > 0).then(|| EfficiencyEntry {
                hours_per_task: total_hours / task_count as f64,
                person,
                total_hours,
                task_count,
            })
        })
        .collect();
    entries.sort_by(|a, b| {
        b.hours_per_task.partial_cmp(&a.hours_per_task).unwrap_or(std::cmp::Ordering::Equal)
    });
    entries.truncate(n);
    entries
}

// =============================================================================
// Punctuality
// =============================================================================

fn punctuality_points<K, KF>(records: &[TaskRecord], key: KF) -> Vec<PunctualityPoint>
where
    K: Ord + ToString,
    KF: Fn(&TaskRecord) -> Option<K>,
{
    // Only rows with known punctuality enter either side of the rate
    let on_time = aggregate::count_by(records, |r| {
        (r.punctuality.as_on_time() == Some(true)).then(|| key(r)).flatten()
    });
    let known = aggregate::count_by(records, |r| {
        r.punctuality.as_on_time().is_some().then(|| key(r)).flatten()
    });

    known
        .into_iter()
        .filter_map(|(k, total)| {
            let hits = on_time.get(&k).copied().unwrap_or(0);
            aggregate::percent(hits as f64, total as f64).map(|rate_pct| PunctualityPoint {
                key: k.to_string(),
                rate_pct,
                tasks: total,
            })
        })
        .collect()
}

/// Punctuality rate per team.
pub fn punctuality_by_team(records: &[TaskRecord]) -> Vec<PunctualityPoint> {
    punctuality_points(records, |r| r.row.team.clone())
}

/// Punctuality rate per completion period, chronological.
pub fn punctuality_by_period(records: &[TaskRecord]) -> Vec<PunctualityPoint> {
    punctuality_points(records, |r| r.period_key)
}

/// Most punctual people, best rate first.
///
/// People below the configured minimum of known-punctuality tasks are
/// excluded so a single lucky task cannot top the ranking.
pub fn top_punctual_people(records: &[TaskRecord], report_cfg: &ReportConfig) -> Vec<PunctualityPoint> {
    let mut points: Vec<PunctualityPoint> = punctuality_points(records, |r| r.row.owner.clone())
        .into_iter()
        .filter(|point| point.tasks >= report_cfg.min_tasks_for_punctuality_rank)
        .collect();
    points.sort_by(|a, b| b.rate_pct.partial_cmp(&a.rate_pct).unwrap_or(std::cmp::Ordering::Equal));
    points.truncate(report_cfg.top_n);
    points
}

// =============================================================================
// Workload & capacity
// =============================================================================

/// Mean-of-monthly occupancy per person, most loaded first.
pub fn occupancy_by_person(records: &[TaskRecord]) -> Vec<OccupancyEntry> {
    let mut entries: Vec<OccupancyEntry> = capacity::occupancy_mean_of_monthly(records)
        .into_iter()
        .map(|(person, occupancy_pct)| OccupancyEntry { person, occupancy_pct })
        .collect();
    entries.sort_by(|a, b| {
        b.occupancy_pct.partial_cmp(&a.occupancy_pct).unwrap_or(std::cmp::Ordering::Equal)
    });
    entries
}

/// Hours per (person, period) cell for the workload heatmap.
pub fn person_month_heatmap(records: &[TaskRecord]) -> Vec<HeatmapCell> {
    capacity::person_period_hours(records)
        .into_iter()
        .map(|((person, period), hours)| HeatmapCell { person, period, hours })
        .collect()
}

/// Tasks per active person for each period, chronological.
pub fn throughput_by_period(records: &[TaskRecord]) -> Vec<PeriodThroughput> {
    let tasks = aggregate::count_by(records, |r: &TaskRecord| r.period_key);
    let people = aggregate::nunique_by(
        records,
        |r: &TaskRecord| r.period_key,
        |r| r.row.owner.clone(),
    );

    tasks
        .into_iter()
        .map(|(period, task_count)| {
            let person_count = people.get(&period).copied().unwrap_or(0);
            PeriodThroughput {
                period,
                tasks: task_count,
                people: person_count,
                tasks_per_person: (person_count > 0)
                    .then(|| task_count as f64 / person_count as f64),
            }
        })
        .collect()
}

// =============================================================================
// Productivity (both occupancy definitions, kept apart)
// =============================================================================

/// Occupancy per (team, person, period) cell, mean-of-monthly building
/// block.
pub fn person_month_productivity(records: &[TaskRecord]) -> Vec<PersonMonthProductivity> {
    use workdeck_domain::constants::HOURS_PER_PERSON_MONTH;

    let hours = aggregate::sum_by(
        records,
        |r: &TaskRecord| match (&r.row.team, &r.row.owner, r.period_key) {
            (Some(team), Some(owner), Some(period)) => {
                Some((team.clone(), owner.clone(), period))
            }
            _ => None,
        },
        |r| Some(r.row.duration_hours),
    );

    hours
        .into_iter()
        .map(|((team, person, period), hours)| PersonMonthProductivity {
            team,
            person,
            period,
            hours,
            occupancy_pct: hours / HOURS_PER_PERSON_MONTH * 100.0,
        })
        .collect()
}

/// Mean member occupancy per (team, period) cell.
pub fn team_month_productivity(records: &[TaskRecord]) -> Vec<TeamMonthProductivity> {
    let mut sums: std::collections::BTreeMap<(String, workdeck_domain::PeriodKey), (f64, u64)> =
        std::collections::BTreeMap::new();
    for cell in person_month_productivity(records) {
        let slot = sums.entry((cell.team, cell.period)).or_insert((0.0, 0));
        slot.0 += cell.occupancy_pct;
        slot.1 += 1;
    }

    sums.into_iter()
        .map(|((team, period), (total, count))| TeamMonthProductivity {
            team,
            period,
            mean_occupancy_pct: total / count as f64,
        })
        .collect()
}

/// Whole-span occupancy per person, least occupied first (the dashboard
/// renders this as an ascending horizontal bar).
pub fn person_span_productivity(records: &[TaskRecord]) -> Vec<PersonSpanProductivity> {
    let mut entries: Vec<PersonSpanProductivity> = capacity::occupancy_total_over_span(records)
        .into_iter()
        .map(|(person, (total_hours, occupancy_pct))| PersonSpanProductivity {
            person,
            total_hours,
            occupancy_pct,
        })
        .collect();
    entries.sort_by(|a, b| {
        a.occupancy_pct.partial_cmp(&b.occupancy_pct).unwrap_or(std::cmp::Ordering::Equal)
    });
    entries
}

// =============================================================================
// Insights
// =============================================================================

/// Headline findings for the dashboard footer.
pub fn task_insights(records: &[TaskRecord], report_cfg: &ReportConfig) -> TaskInsights {
    let top_producer = top_hours_by_person(records, 1).into_iter().next();

    let best_punctuality_team = punctuality_by_team(records)
        .into_iter()
        .max_by(|a, b| a.rate_pct.partial_cmp(&b.rate_pct).unwrap_or(std::cmp::Ordering::Equal));

    let overloaded: Vec<OccupancyEntry> = occupancy_by_person(records)
        .into_iter()
        .filter(|entry| entry.occupancy_pct > report_cfg.overload_threshold_pct)
        .collect();

    TaskInsights { top_producer, best_punctuality_team, overloaded }
}
