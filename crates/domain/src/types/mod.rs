//! Common data types used throughout the application

pub mod period;
pub mod report;
pub mod sales;
pub mod table;
pub mod task;

pub use period::PeriodKey;
pub use report::{
    DistributionPoint, EfficiencyEntry, HeatmapCell, MetricPoint, OccupancyEntry,
    PeriodThroughput, PersonMonthProductivity, PersonSpanProductivity, ProductionPoint,
    PunctualityPoint, SalesKpis, TaskInsights, TaskKpis, TeamMonthProductivity,
};
pub use sales::{AbcEntry, AbcTier, SaleRecord, SaleRow, ValueBucket};
pub use table::{CellValue, RawTable};
pub use task::{DurationBucket, Punctuality, TaskRecord, TaskRow};
