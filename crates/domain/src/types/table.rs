//! Raw tabular input
//!
//! The ingestion collaborator hands each spreadsheet over as a `RawTable`:
//! an ordered list of column headers plus rows of loosely-typed cells.
//! Nothing here is validated beyond shape; turning cells into typed records
//! is the normalization stage's job.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single spreadsheet cell as provided by the source sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum CellValue {
    Empty,
    Text(String),
    Number(f64),
    Bool(bool),
    Date(NaiveDate),
}

impl CellValue {
    /// Whether the cell carries no usable value.
    ///
    /// Whitespace-only text counts as empty: sheets exported from the task
    /// tracker pad blank cells with spaces.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Empty => true,
            Self::Text(s) => s.trim().is_empty(),
            _ => false,
        }
    }
}

/// One sheet's worth of raw rows.
///
/// `columns` preserves the source header order; each row is positional and
/// may be shorter than the header (trailing blanks are commonly dropped by
/// exporters), in which case missing cells read as [`CellValue::Empty`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawTable {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl RawTable {
    /// Create a table from a header and rows.
    pub fn new(columns: Vec<String>, rows: Vec<Vec<CellValue>>) -> Self {
        Self { columns, rows }
    }

    /// Position of a column by its source header, if present.
    pub fn column_index(&self, header: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == header)
    }

    /// Cell at (row, column index), treating short rows as empty-padded.
    pub fn cell(&self, row: usize, col: Option<usize>) -> &CellValue {
        const EMPTY: &CellValue = &CellValue::Empty;
        match col {
            Some(col) => self.rows.get(row).and_then(|r| r.get(col)).unwrap_or(EMPTY),
            None => EMPTY,
        }
    }

    /// Number of data rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no data rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Append another sheet's rows to this table (pure union).
    ///
    /// The other table's cells are re-ordered to this table's header;
    /// columns absent from the other sheet read as empty. No
    /// de-duplication is performed: duplicate rows across sheets are
    /// preserved as-is.
    pub fn concat(&mut self, other: &Self) {
        let mapping: Vec<Option<usize>> =
            self.columns.iter().map(|c| other.column_index(c)).collect();

        for row in 0..other.len() {
            let cells =
                mapping.iter().map(|col| other.cell(row, *col).clone()).collect();
            self.rows.push(cells);
        }
    }
}
