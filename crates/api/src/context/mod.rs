//! Application context - holds configuration and loaded datasets

use std::sync::Arc;

use workdeck_core::{derive, normalize};
use workdeck_domain::{RawTable, Result, SaleRecord, TaskRecord, WorkdeckConfig, WorkdeckError};
use workdeck_infra::{fingerprint, DeriveCache};

/// Application context - configuration plus the derived datasets the
/// report commands read.
///
/// Datasets are immutable once loaded; commands share them through `Arc`
/// and every pipeline run allocates fresh filtered/aggregated output.
pub struct AppContext {
    pub config: WorkdeckConfig,
    cache: DeriveCache,
    tasks: Arc<Vec<TaskRecord>>,
    sales: Arc<Vec<SaleRecord>>,
}

impl AppContext {
    /// Create a context with no datasets loaded.
    pub fn new(config: WorkdeckConfig) -> Self {
        Self {
            config,
            cache: DeriveCache::default(),
            tasks: Arc::new(Vec::new()),
            sales: Arc::new(Vec::new()),
        }
    }

    /// Load task sheets from JSON-serialized [`RawTable`] payloads.
    ///
    /// Normalization and derivation are memoized per source content: the
    /// cache key fingerprints the sheet bytes together with the column
    /// map, so either changing invalidates naturally.
    pub fn load_task_sheets(&mut self, payloads: &[Vec<u8>]) -> Result<()> {
        let tables = parse_tables(payloads)?;
        let columns = serde_json::to_vec(&self.config.task_columns)
            .map_err(|e| WorkdeckError::Internal(format!("Failed to encode column map: {}", e)))?;
        let done = self.config.report.done_status.clone();

        let key = fingerprint(
            payloads.iter().map(Vec::as_slice).chain([columns.as_slice(), done.as_bytes()]),
        );
        self.tasks = self.cache.tasks_for(&key, || {
            let rows = normalize::normalize_tasks(&tables, &self.config.task_columns, &done);
            derive::derive_tasks(&rows)
        });

        tracing::info!(sheets = payloads.len(), records = self.tasks.len(), "Task sheets loaded");
        Ok(())
    }

    /// Load the sales sheet from JSON-serialized [`RawTable`] payloads.
    pub fn load_sale_sheets(&mut self, payloads: &[Vec<u8>]) -> Result<()> {
        let tables = parse_tables(payloads)?;
        let columns = serde_json::to_vec(&self.config.sale_columns)
            .map_err(|e| WorkdeckError::Internal(format!("Failed to encode column map: {}", e)))?;

        let key =
            fingerprint(payloads.iter().map(Vec::as_slice).chain([columns.as_slice()]));
        self.sales = self.cache.sales_for(&key, || {
            let rows = normalize::normalize_sales(&tables, &self.config.sale_columns);
            derive::derive_sales(&rows)
        });

        tracing::info!(sheets = payloads.len(), records = self.sales.len(), "Sales sheets loaded");
        Ok(())
    }

    /// Derived task dataset (empty until loaded).
    pub fn tasks(&self) -> &[TaskRecord] {
        &self.tasks
    }

    /// Derived sales dataset (empty until loaded).
    pub fn sales(&self) -> &[SaleRecord] {
        &self.sales
    }
}

fn parse_tables(payloads: &[Vec<u8>]) -> Result<Vec<RawTable>> {
    payloads
        .iter()
        .map(|payload| {
            serde_json::from_slice(payload)
                .map_err(|e| WorkdeckError::InvalidInput(format!("Invalid sheet payload: {}", e)))
        })
        .collect()
}
