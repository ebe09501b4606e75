//! Row-level exports for the rendering front end

pub mod csv;

pub use csv::{sales_to_csv, tasks_to_csv};
