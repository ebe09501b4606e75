//! # Workdeck App
//!
//! Report command layer and application entry point. Wires configuration,
//! dataset loading, and the two dashboard pipelines together for the
//! rendering front end.

pub mod commands;
pub mod context;
pub mod utils;

pub use commands::sales::{build_sales_report, SalesReport};
pub use commands::tasks::{build_task_report, TaskReport};
pub use context::AppContext;
