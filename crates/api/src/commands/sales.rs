//! Sales dashboard commands
//!
//! Payload builders for the commercial dashboard: revenue series, client
//! concentration, and the KPI header.

use std::time::Instant;

use serde::{Deserialize, Serialize};
use workdeck_core::{aggregate, derive, filter::SaleFilter};
use workdeck_domain::types::report::{DistributionPoint, MetricPoint, SalesKpis};
use workdeck_domain::{AbcEntry, SaleRecord, ValueBucket};

use crate::context::AppContext;
use crate::utils::logging::log_command_execution;

/// Everything the sales dashboard renders, in one serializable payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesReport {
    pub kpis: SalesKpis,
    pub revenue_by_period: Vec<MetricPoint>,
    pub revenue_by_solution_type: Vec<MetricPoint>,
    pub revenue_by_salesperson: Vec<MetricPoint>,
    pub top_clients: Vec<MetricPoint>,
    pub abc_classification: Vec<AbcEntry>,
    pub value_bucket_distribution: Vec<DistributionPoint>,
}

/// Apply the dashboard filter to the loaded sales dataset.
pub fn filtered_sales(ctx: &AppContext, filter: &SaleFilter) -> Vec<SaleRecord> {
    filter.apply(ctx.sales())
}

/// Build the full sales dashboard payload.
pub fn build_sales_report(ctx: &AppContext, filter: &SaleFilter) -> SalesReport {
    let command_name = "sales::build_sales_report";
    let start = Instant::now();

    let records = filtered_sales(ctx, filter);

    let report = SalesReport {
        kpis: sales_kpis(&records),
        revenue_by_period: revenue_by_period(&records),
        revenue_by_solution_type: revenue_by_solution_type(&records),
        revenue_by_salesperson: revenue_by_salesperson(&records),
        top_clients: top_clients(&records, ctx.config.report.top_n),
        abc_classification: derive::classify_abc(&records),
        value_bucket_distribution: value_bucket_distribution(&records),
    };

    log_command_execution(command_name, records.len(), start.elapsed(), true);
    report
}

/// Render the filtered row-level table as CSV for download.
pub fn export_rows(ctx: &AppContext, filter: &SaleFilter) -> String {
    let records = filtered_sales(ctx, filter);
    workdeck_infra::sales_to_csv(&records)
}

// =============================================================================
// KPI row
// =============================================================================

/// Scalar indicators for the dashboard header.
///
/// `sale_count` counts every filtered row; `priced_sale_count` only rows
/// whose amount parsed. The mean ticket divides revenue by the priced
/// count: rows that failed amount conversion carry no revenue and must
/// not deflate the average.
pub fn sales_kpis(records: &[SaleRecord]) -> SalesKpis {
    let priced: Vec<f64> = records.iter().filter_map(|r| r.row.amount).collect();
    let total_revenue: f64 = priced.iter().sum();
    let priced_sale_count = priced.len() as u64;

    SalesKpis {
        total_revenue,
        sale_count: records.len() as u64,
        priced_sale_count,
        mean_ticket: aggregate::mean(priced.iter().copied()),
        mean_lead_time_days: aggregate::mean(
            records.iter().filter_map(|r| r.lead_time_days.map(|days| days as f64)),
        ),
    }
}

// =============================================================================
// Revenue series
// =============================================================================

/// Revenue per invoice period, chronological.
pub fn revenue_by_period(records: &[SaleRecord]) -> Vec<MetricPoint> {
    aggregate::sum_by(records, |r: &SaleRecord| r.period_key, |r| r.row.amount)
        .into_iter()
        .map(|(period, value)| MetricPoint { key: period.to_string(), value })
        .collect()
}

fn revenue_descending<KF>(records: &[SaleRecord], key: KF) -> Vec<MetricPoint>
where
    KF: Fn(&SaleRecord) -> Option<String>,
{
    let revenue = aggregate::sum_by(records, key, |r| r.row.amount);
    let mut points: Vec<MetricPoint> = revenue
        .into_iter()
        .map(|(key, value)| MetricPoint { key, value })
        .collect();
    points.sort_by(|a, b| b.value.partial_cmp(&a.value).unwrap_or(std::cmp::Ordering::Equal));
    points
}

/// Revenue per solution type, highest first.
pub fn revenue_by_solution_type(records: &[SaleRecord]) -> Vec<MetricPoint> {
    revenue_descending(records, |r| r.row.solution_type.clone())
}

/// Revenue per salesperson, highest first.
pub fn revenue_by_salesperson(records: &[SaleRecord]) -> Vec<MetricPoint> {
    revenue_descending(records, |r| r.row.salesperson.clone())
}

/// Top-N clients by revenue, stable lexical tie-break.
pub fn top_clients(records: &[SaleRecord], n: usize) -> Vec<MetricPoint> {
    let revenue =
        aggregate::sum_by(records, |r: &SaleRecord| Some(r.row.client.clone()), |r| r.row.amount);
    aggregate::top_n(&revenue, n)
        .into_iter()
        .map(|(key, value)| MetricPoint { key, value })
        .collect()
}

// =============================================================================
// Distributions
// =============================================================================

/// Sale counts per value bucket, ascending bucket order.
///
/// Unpriced rows have no bucket and are excluded here and only here.
pub fn value_bucket_distribution(records: &[SaleRecord]) -> Vec<DistributionPoint> {
    let counts = aggregate::count_by(records, |r: &SaleRecord| r.value_bucket);

    ValueBucket::ALL
        .iter()
        .filter_map(|bucket| {
            counts.get(bucket).map(|count| DistributionPoint {
                label: bucket.to_string(),
                count: *count,
            })
        })
        .collect()
}
