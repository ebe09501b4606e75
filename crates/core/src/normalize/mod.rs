//! Normalization stage
//!
//! Turns raw heterogeneous sheets into typed rows using the configured
//! column-rename maps. Multiple sheets concatenate as a pure union with
//! duplicates preserved.
//!
//! Per-field degradation policy (explicit, per record type):
//! - Task rows are always kept; a row whose cells are all empty is skipped
//!   as sheet padding. `name` defaults to empty text, `status` to the
//!   given done-label, `duration` to 0; dates degrade to `None`.
//! - Sale rows require `client` (the identity field); rows without it are
//!   dropped and logged. `amount` degrades to `None`, never 0, so failed
//!   parses stay out of revenue sums.

pub mod cell;

use tracing::debug;
use workdeck_domain::{RawTable, SaleColumns, SaleRow, TaskColumns, TaskRow};

/// Resolved cell positions for the task sheet layout.
struct TaskLayout {
    name: Option<usize>,
    owner: Option<usize>,
    status: Option<usize>,
    deadline: Option<usize>,
    duration: Option<usize>,
    completed_at: Option<usize>,
    team: Option<usize>,
}

impl TaskLayout {
    fn resolve(table: &RawTable, columns: &TaskColumns) -> Self {
        Self {
            name: table.column_index(&columns.name),
            owner: table.column_index(&columns.owner),
            status: table.column_index(&columns.status),
            deadline: table.column_index(&columns.deadline),
            duration: table.column_index(&columns.duration),
            completed_at: table.column_index(&columns.completed_at),
            team: table.column_index(&columns.team),
        }
    }
}

/// Normalize task sheets into typed rows (union across sheets, in order).
pub fn normalize_tasks(
    tables: &[RawTable],
    columns: &TaskColumns,
    done_status: &str,
) -> Vec<TaskRow> {
    let mut rows = Vec::new();

    for table in tables {
        let layout = TaskLayout::resolve(table, columns);

        for row in 0..table.len() {
            if table.rows[row].iter().all(workdeck_domain::CellValue::is_empty) {
                continue;
            }

            rows.push(TaskRow {
                name: cell::text(table.cell(row, layout.name)).unwrap_or_default(),
                owner: cell::text(table.cell(row, layout.owner)),
                team: cell::text(table.cell(row, layout.team)),
                status: cell::text(table.cell(row, layout.status))
                    .unwrap_or_else(|| done_status.to_string()),
                duration_hours: cell::duration_hours(table.cell(row, layout.duration)),
                deadline: cell::date(table.cell(row, layout.deadline)),
                completed_at: cell::date(table.cell(row, layout.completed_at)),
            });
        }
    }

    rows
}

/// Resolved cell positions for the sales sheet layout.
struct SaleLayout {
    sale_date: Option<usize>,
    invoice_date: Option<usize>,
    client: Option<usize>,
    salesperson: Option<usize>,
    solution_type: Option<usize>,
    project_description: Option<usize>,
    amount: Option<usize>,
    work_order: Option<usize>,
    proposal: Option<usize>,
}

impl SaleLayout {
    fn resolve(table: &RawTable, columns: &SaleColumns) -> Self {
        Self {
            sale_date: table.column_index(&columns.sale_date),
            invoice_date: table.column_index(&columns.invoice_date),
            client: table.column_index(&columns.client),
            salesperson: table.column_index(&columns.salesperson),
            solution_type: table.column_index(&columns.solution_type),
            project_description: table.column_index(&columns.project_description),
            amount: table.column_index(&columns.amount),
            work_order: table.column_index(&columns.work_order),
            proposal: table.column_index(&columns.proposal),
        }
    }
}

/// Normalize sales sheets into typed rows (union across sheets, in order).
///
/// Rows without a client are dropped: client is the identity every sales
/// aggregation groups on.
pub fn normalize_sales(tables: &[RawTable], columns: &SaleColumns) -> Vec<SaleRow> {
    let mut rows = Vec::new();
    let mut dropped = 0usize;

    for table in tables {
        let layout = SaleLayout::resolve(table, columns);

        for row in 0..table.len() {
            let Some(client) = cell::text(table.cell(row, layout.client)) else {
                if !table.rows[row].iter().all(workdeck_domain::CellValue::is_empty) {
                    dropped += 1;
                }
                continue;
            };

            rows.push(SaleRow {
                client,
                salesperson: cell::text(table.cell(row, layout.salesperson)),
                solution_type: cell::text(table.cell(row, layout.solution_type)),
                project_description: cell::text(table.cell(row, layout.project_description)),
                work_order: cell::text(table.cell(row, layout.work_order)),
                proposal: cell::text(table.cell(row, layout.proposal)),
                sale_date: cell::date(table.cell(row, layout.sale_date)),
                invoice_date: cell::date(table.cell(row, layout.invoice_date)),
                amount: cell::number(table.cell(row, layout.amount)),
            });
        }
    }

    if dropped > 0 {
        debug!(dropped, "Dropped sale rows without a client");
    }

    rows
}
