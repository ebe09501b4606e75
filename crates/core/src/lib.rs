//! # Workdeck Core
//!
//! Pure business logic layer - no infrastructure dependencies.
//!
//! This crate contains the four pipeline stages:
//! - Normalization: raw sheets to typed rows
//! - Derivation: typed rows to records with metric fields
//! - Filter: predicate conjunction over derived records
//! - Aggregation: group-by reductions and capacity occupancy
//!
//! ## Architecture Principles
//! - Only depends on `workdeck-domain`
//! - No file, network, or platform code
//! - Every stage is a pure function over immutable input
//! - Pure, testable business logic

pub mod aggregate;
pub mod capacity;
pub mod derive;
pub mod filter;
pub mod normalize;

// Re-export specific items to avoid ambiguity
pub use derive::{classify_abc, derive_sale, derive_sales, derive_task, derive_tasks};
pub use filter::{DateRange, SaleFilter, Selection, TaskFilter};
pub use normalize::{normalize_sales, normalize_tasks};
