//! Application constants
//!
//! Centralized location for all domain-level constants used throughout the
//! application.

// Capacity reference
pub const HOURS_PER_PERSON_MONTH: f64 = 176.0;
pub const HOURS_PER_DAY: f64 = 8.0;

// ABC client classification cutoffs (cumulative revenue share)
pub const ABC_TIER_A_CUTOFF_PCT: f64 = 80.0;
pub const ABC_TIER_B_CUTOFF_PCT: f64 = 95.0;

// Reporting defaults
pub const DEFAULT_TOP_N: usize = 15;
pub const DEFAULT_MIN_TASKS_FOR_PUNCTUALITY_RANK: u64 = 5;
pub const DEFAULT_DONE_STATUS: &str = "Feito";
pub const PUNCTUALITY_GOAL_PCT: f64 = 80.0;
pub const OVERLOAD_THRESHOLD_PCT: f64 = 120.0;
