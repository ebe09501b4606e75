//! Derivation stage
//!
//! Pure per-row functions that compute the derived metric fields from the
//! normalized raw fields. No IO, no shared state; derivation reads only
//! raw fields, never derived ones, so applying it twice is a no-op.

pub mod sales;
pub mod tasks;

pub use sales::{classify_abc, derive_sale, derive_sales};
pub use tasks::{derive_task, derive_tasks};
