//! # Workdeck Infra
//!
//! Infrastructure layer: everything that touches the world outside the
//! pure pipelines.
//!
//! This crate contains:
//! - Configuration loading (env + TOML/JSON file probing)
//! - Derived-dataset memoization (content-addressed, moka-backed)
//! - Row-level CSV export

pub mod cache;
pub mod config;
pub mod export;

pub use cache::{fingerprint, DeriveCache, DeriveCacheConfig};
pub use export::{sales_to_csv, tasks_to_csv};
