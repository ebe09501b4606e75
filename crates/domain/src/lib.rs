//! # Workdeck Domain
//!
//! Business domain types and models for Workdeck.
//!
//! This crate contains:
//! - Domain data types (TaskRecord, SaleRecord, report payloads)
//! - Domain error types and Result definitions
//! - Configuration structures
//! - Domain constants
//!
//! ## Architecture
//! - No dependencies on other Workdeck crates
//! - Only external dependencies allowed
//! - Pure domain models and data structures

pub mod config;
pub mod constants;
pub mod errors;
pub mod types;

// Re-export commonly used items
pub use config::{ReportConfig, SaleColumns, TaskColumns, TeamRoster, WorkdeckConfig};
pub use errors::{Result, WorkdeckError};
pub use types::{
    AbcEntry, AbcTier, CellValue, DurationBucket, PeriodKey, Punctuality, RawTable, SaleRecord,
    SaleRow, TaskRecord, TaskRow, ValueBucket,
};
