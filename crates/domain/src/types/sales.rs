//! Sales record types
//!
//! One row per sale as exported from the commercial sheet. As with tasks,
//! raw fields and derived fields are kept apart so derivation stays
//! idempotent.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::period::PeriodKey;

/// Sale value band, over half-open bins
/// `(0,10k] (10k,50k] (50k,100k] (100k,500k] (500k,inf)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueBucket {
    UpTo10k,
    From10To50k,
    From50To100k,
    From100To500k,
    Over500k,
}

impl ValueBucket {
    /// All buckets in ascending order, for rendering distributions.
    pub const ALL: [Self; 5] = [
        Self::UpTo10k,
        Self::From10To50k,
        Self::From50To100k,
        Self::From100To500k,
        Self::Over500k,
    ];

    /// Classify a sale amount. Upper bounds are inclusive.
    ///
    /// Returns `None` for zero, negative, or non-finite amounts.
    pub fn from_amount(amount: f64) -> Option<Self> {
        if !amount.is_finite() || amount <= 0.0 {
            return None;
        }
        Some(if amount <= 10_000.0 {
            Self::UpTo10k
        } else if amount <= 50_000.0 {
            Self::From10To50k
        } else if amount <= 100_000.0 {
            Self::From50To100k
        } else if amount <= 500_000.0 {
            Self::From100To500k
        } else {
            Self::Over500k
        })
    }

    /// Display label used by dashboards and the CSV export.
    pub const fn label(self) -> &'static str {
        match self {
            Self::UpTo10k => "0-10k",
            Self::From10To50k => "10k-50k",
            Self::From50To100k => "50k-100k",
            Self::From100To500k => "100k-500k",
            Self::Over500k => "> 500k",
        }
    }
}

impl std::fmt::Display for ValueBucket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// ABC concentration tier: A while cumulative revenue share stays within
/// 80%, B within 95%, C for the tail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AbcTier {
    A,
    B,
    C,
}

/// One client's row in the ABC classification table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AbcEntry {
    pub client: String,
    /// Total priced revenue attributed to the client.
    pub revenue: f64,
    /// Cumulative revenue share up to and including this client, percent.
    pub cumulative_pct: f64,
    pub tier: AbcTier,
}

/// Normalized raw fields of one sale row.
///
/// `client` is the row's identity field: normalization drops rows without
/// it. Every other field degrades to `None` on parse failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRow {
    pub client: String,
    pub salesperson: Option<String>,
    pub solution_type: Option<String>,
    pub project_description: Option<String>,
    pub work_order: Option<String>,
    pub proposal: Option<String>,
    pub sale_date: Option<NaiveDate>,
    pub invoice_date: Option<NaiveDate>,
    /// Sale value; `None` when the cell failed numeric conversion. Missing
    /// amounts are excluded from revenue sums but the row still counts as a
    /// sale.
    pub amount: Option<f64>,
}

/// A sale row together with its derived metrics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleRecord {
    #[serde(flatten)]
    pub row: SaleRow,
    /// Invoice date minus sale date, in days.
    pub lead_time_days: Option<i64>,
    /// Defined iff `invoice_date` is defined.
    pub period_key: Option<PeriodKey>,
    pub invoice_year: Option<i32>,
    pub value_bucket: Option<ValueBucket>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_bucket_bounds() {
        assert_eq!(ValueBucket::from_amount(500.0), Some(ValueBucket::UpTo10k));
        assert_eq!(ValueBucket::from_amount(10_000.0), Some(ValueBucket::UpTo10k));
        assert_eq!(ValueBucket::from_amount(10_000.01), Some(ValueBucket::From10To50k));
        assert_eq!(ValueBucket::from_amount(100_000.0), Some(ValueBucket::From50To100k));
        assert_eq!(ValueBucket::from_amount(600_000.0), Some(ValueBucket::Over500k));
    }

    #[test]
    fn test_value_bucket_rejects_non_positive() {
        assert_eq!(ValueBucket::from_amount(0.0), None);
        assert_eq!(ValueBucket::from_amount(-5.0), None);
        assert_eq!(ValueBucket::from_amount(f64::INFINITY), None);
    }
}
