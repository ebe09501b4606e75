//! Sale derivation and ABC client classification

use std::collections::hash_map::Entry;
use std::collections::HashMap;

use chrono::Datelike;
use workdeck_domain::constants::{ABC_TIER_A_CUTOFF_PCT, ABC_TIER_B_CUTOFF_PCT};
use workdeck_domain::{AbcEntry, AbcTier, PeriodKey, SaleRecord, SaleRow, ValueBucket};

/// Derive metrics for one sale row.
pub fn derive_sale(row: &SaleRow) -> SaleRecord {
    let lead_time_days = match (row.invoice_date, row.sale_date) {
        (Some(invoice), Some(sale)) => Some((invoice - sale).num_days()),
        _ => None,
    };

    SaleRecord {
        lead_time_days,
        period_key: row.invoice_date.map(PeriodKey::from_date),
        invoice_year: row.invoice_date.map(|d| d.year()),
        value_bucket: row.amount.and_then(ValueBucket::from_amount),
        row: row.clone(),
    }
}

/// Derive metrics for a whole normalized dataset, preserving row order.
pub fn derive_sales(rows: &[SaleRow]) -> Vec<SaleRecord> {
    rows.iter().map(derive_sale).collect()
}

/// Classify clients by cumulative revenue contribution.
///
/// Clients are ordered by priced revenue descending; equal revenues keep
/// their first-appearance order (stable sort), which pins boundary
/// assignment. Tier A holds while the cumulative share stays within 80%,
/// B within 95%, C takes the tail. Unpriced sales contribute no revenue,
/// so all-unpriced clients sort last and land in C.
///
/// With zero total revenue the cumulative share is undefined; every entry
/// reports 0% and tier C rather than dividing by zero.
pub fn classify_abc(records: &[SaleRecord]) -> Vec<AbcEntry> {
    // Revenue per client, first-seen order preserved for tie stability.
    let mut order: Vec<String> = Vec::new();
    let mut revenue: HashMap<String, f64> = HashMap::new();

    for record in records {
        let amount = record.row.amount.unwrap_or(0.0);
        match revenue.entry(record.row.client.clone()) {
            Entry::Vacant(slot) => {
                order.push(record.row.client.clone());
                slot.insert(amount);
            }
            Entry::Occupied(mut slot) => *slot.get_mut() += amount,
        }
    }

    let mut clients: Vec<(String, f64)> = order
        .into_iter()
        .map(|client| {
            let total = revenue.get(&client).copied().unwrap_or(0.0);
            (client, total)
        })
        .collect();

    // Stable: ties keep input order.
    clients.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    let total: f64 = clients.iter().map(|(_, r)| r).sum();
    if total <= 0.0 {
        return clients
            .into_iter()
            .map(|(client, revenue)| AbcEntry {
                client,
                revenue,
                cumulative_pct: 0.0,
                tier: AbcTier::C,
            })
            .collect();
    }

    let mut running = 0.0;
    clients
        .into_iter()
        .map(|(client, revenue)| {
            running += revenue;
            let cumulative_pct = running / total * 100.0;
            let tier = if cumulative_pct <= ABC_TIER_A_CUTOFF_PCT {
                AbcTier::A
            } else if cumulative_pct <= ABC_TIER_B_CUTOFF_PCT {
                AbcTier::B
            } else {
                AbcTier::C
            };
            AbcEntry { client, revenue, cumulative_pct, tier }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn sale(client: &str, amount: Option<f64>) -> SaleRow {
        SaleRow {
            client: client.to_string(),
            salesperson: None,
            solution_type: None,
            project_description: None,
            work_order: None,
            proposal: None,
            sale_date: NaiveDate::from_ymd_opt(2024, 3, 1),
            invoice_date: NaiveDate::from_ymd_opt(2024, 3, 11),
            amount,
        }
    }

    #[test]
    fn test_lead_time_and_period() {
        let record = derive_sale(&sale("Acme", Some(5_000.0)));
        assert_eq!(record.lead_time_days, Some(10));
        assert_eq!(record.period_key.map(|k| k.to_string()), Some("2024-03".to_string()));
        assert_eq!(record.invoice_year, Some(2024));
        assert_eq!(record.value_bucket, Some(ValueBucket::UpTo10k));
    }

    #[test]
    fn test_missing_amount_has_no_bucket() {
        let record = derive_sale(&sale("Acme", None));
        assert_eq!(record.value_bucket, None);
    }

    #[test]
    fn test_abc_spec_scenario() {
        // Revenues [600, 300, 100] of 1000 total: cumulative [60, 90, 100]
        let records = derive_sales(&[
            sale("Alpha", Some(600.0)),
            sale("Beta", Some(300.0)),
            sale("Gamma", Some(100.0)),
        ]);

        let tiers = classify_abc(&records);
        assert_eq!(tiers.len(), 3);
        assert_eq!(tiers[0].tier, AbcTier::A);
        assert!((tiers[0].cumulative_pct - 60.0).abs() < 1e-9);
        assert_eq!(tiers[1].tier, AbcTier::B);
        assert!((tiers[1].cumulative_pct - 90.0).abs() < 1e-9);
        assert_eq!(tiers[2].tier, AbcTier::C);
        assert!((tiers[2].cumulative_pct - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_abc_cumulative_is_monotone_and_ends_at_100() {
        let records = derive_sales(&[
            sale("A", Some(10.0)),
            sale("B", Some(250.0)),
            sale("A", Some(90.0)),
            sale("C", Some(50.0)),
            sale("D", None),
        ]);

        let tiers = classify_abc(&records);
        let mut previous = 0.0;
        for entry in &tiers {
            assert!(entry.cumulative_pct >= previous);
            previous = entry.cumulative_pct;
        }
        assert!((previous - 100.0).abs() < 1e-9);
    }

    #[test]
    fn test_abc_ties_keep_input_order() {
        let records = derive_sales(&[
            sale("Zeta", Some(100.0)),
            sale("Alpha", Some(100.0)),
            sale("Mid", Some(100.0)),
        ]);

        let tiers = classify_abc(&records);
        let names: Vec<&str> = tiers.iter().map(|t| t.client.as_str()).collect();
        assert_eq!(names, vec!["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn test_abc_zero_revenue_does_not_divide() {
        let records = derive_sales(&[sale("A", None), sale("B", None)]);
        let tiers = classify_abc(&records);
        assert_eq!(tiers.len(), 2);
        assert!(tiers.iter().all(|t| t.tier == AbcTier::C && t.cumulative_pct == 0.0));
    }
}
