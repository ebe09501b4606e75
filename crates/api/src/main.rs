//! Workdeck dashboard process
//!
//! Loads the configured sheets, runs both metric pipelines unfiltered,
//! and writes the report payloads plus row-level CSV exports for the
//! rendering front end.
//!
//! Environment:
//! - `WORKDECK_CONFIG`: optional config file (TOML/JSON)
//! - `WORKDECK_TASK_SHEETS`: comma-separated JSON sheet files
//! - `WORKDECK_SALES_SHEETS`: comma-separated JSON sheet files
//! - `WORKDECK_OUT`: output directory (default `out`)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use tracing::info;
use workdeck_core::filter::{SaleFilter, TaskFilter};
use workdeck_lib::{commands, AppContext};

fn main() -> anyhow::Result<()> {
    workdeck_lib::utils::logging::init();

    let config = workdeck_infra::config::load().context("loading configuration")?;
    let mut ctx = AppContext::new(config);

    if let Some(paths) = sheet_paths("WORKDECK_TASK_SHEETS") {
        let payloads = read_payloads(&paths).context("reading task sheets")?;
        ctx.load_task_sheets(&payloads).context("loading task sheets")?;
    }
    if let Some(paths) = sheet_paths("WORKDECK_SALES_SHEETS") {
        let payloads = read_payloads(&paths).context("reading sales sheets")?;
        ctx.load_sale_sheets(&payloads).context("loading sales sheets")?;
    }

    let out_dir = PathBuf::from(
        std::env::var("WORKDECK_OUT").unwrap_or_else(|_| "out".to_string()),
    );
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("creating output directory {}", out_dir.display()))?;

    let task_report = commands::tasks::build_task_report(&ctx, &TaskFilter::default());
    write_json(&out_dir.join("task_report.json"), &task_report)?;
    std::fs::write(
        out_dir.join("tasks.csv"),
        commands::tasks::export_rows(&ctx, &TaskFilter::default()),
    )
    .context("writing task export")?;

    let sales_report = commands::sales::build_sales_report(&ctx, &SaleFilter::default());
    write_json(&out_dir.join("sales_report.json"), &sales_report)?;
    std::fs::write(
        out_dir.join("sales.csv"),
        commands::sales::export_rows(&ctx, &SaleFilter::default()),
    )
    .context("writing sales export")?;

    info!(out = %out_dir.display(), "Reports written");
    Ok(())
}

fn sheet_paths(var: &str) -> Option<Vec<PathBuf>> {
    let value = std::env::var(var).ok()?;
    let paths: Vec<PathBuf> = value
        .split(',')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
        .collect();
    (!paths.is_empty()).then_some(paths)
}

fn read_payloads(paths: &[PathBuf]) -> anyhow::Result<Vec<Vec<u8>>> {
    paths
        .iter()
        .map(|path| {
            std::fs::read(path).with_context(|| format!("reading {}", path.display()))
        })
        .collect()
}

fn write_json<T: serde::Serialize>(path: &Path, payload: &T) -> anyhow::Result<()> {
    let json = serde_json::to_vec_pretty(payload)
        .with_context(|| format!("serializing {}", path.display()))?;
    std::fs::write(path, json).with_context(|| format!("writing {}", path.display()))
}
