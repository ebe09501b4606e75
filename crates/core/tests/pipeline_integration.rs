//! End-to-end pipeline tests: normalize -> derive -> filter -> aggregate.

use chrono::NaiveDate;
use workdeck_core::{aggregate, capacity, derive, filter, normalize};
use workdeck_domain::{
    CellValue, DurationBucket, Punctuality, RawTable, SaleColumns, TaskColumns, TaskRecord,
    TeamRoster,
};

fn txt(s: &str) -> CellValue {
    CellValue::Text(s.to_string())
}

fn date(s: &str) -> CellValue {
    CellValue::Date(NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap())
}

fn task_sheet() -> RawTable {
    RawTable::new(
        vec![
            "Name".into(),
            "Dono".into(),
            "Status".into(),
            "Prazo".into(),
            "Duração".into(),
            "Data de Conclusão".into(),
            "Equipe".into(),
        ],
        vec![
            vec![
                txt("Painel elétrico"),
                txt("Ana"),
                txt("Feito"),
                date("2024-01-10"),
                CellValue::Number(88.0),
                date("2024-01-08"),
                txt("Elétrica"),
            ],
            vec![
                txt("Usinagem suporte"),
                txt("Bruno"),
                txt("Feito"),
                date("2024-01-10"),
                CellValue::Number(8.0),
                date("2024-01-12"),
                txt("Mecânica"),
            ],
            vec![
                txt("Revisão desenho"),
                txt("Ana"),
                txt("Feito"),
                CellValue::Empty,
                CellValue::Number(8.01),
                date("2024-02-05"),
                txt("Elétrica"),
            ],
            vec![
                txt("Sem conclusão"),
                txt("Bruno"),
                txt("Feito"),
                date("2024-03-01"),
                CellValue::Number(4.0),
                CellValue::Empty,
                txt("Mecânica"),
            ],
        ],
    )
}

fn derived_tasks() -> Vec<TaskRecord> {
    let rows = normalize::normalize_tasks(&[task_sheet()], &TaskColumns::default(), "Feito");
    derive::derive_tasks(&rows)
}

fn roster() -> TeamRoster {
    TeamRoster::new([("Elétrica", vec!["Ana"]), ("Mecânica", vec!["Bruno"])])
}

#[test]
fn derivation_is_idempotent_across_the_dataset() {
    let records = derived_tasks();
    for record in &records {
        assert_eq!(derive::derive_task(&record.row), *record);
    }
}

#[test]
fn punctuality_scenarios() {
    let records = derived_tasks();

    // Completed 2024-01-08 against deadline 2024-01-10: two days early
    assert_eq!(records[0].lag_days, Some(-2));
    assert_eq!(records[0].punctuality, Punctuality::OnTime);

    // Completed 2024-01-12 against deadline 2024-01-10: two days late
    assert_eq!(records[1].lag_days, Some(2));
    assert_eq!(records[1].punctuality, Punctuality::Late);

    // No deadline: unknown, not counted either way
    assert_eq!(records[2].punctuality, Punctuality::Unknown);
}

#[test]
fn duration_bucket_boundaries_survive_the_pipeline() {
    let records = derived_tasks();
    assert_eq!(records[1].duration_bucket, Some(DurationBucket::From2To8h));
    assert_eq!(records[2].duration_bucket, Some(DurationBucket::From8To24h));
}

#[test]
fn records_without_completion_are_excluded_from_period_aggregation_only() {
    let records = derived_tasks();

    let by_period = aggregate::sum_by(
        &records,
        |r: &TaskRecord| r.period_key,
        |r| Some(r.row.duration_hours),
    );
    let period_total: f64 = by_period.values().sum();

    let flat_total: f64 = records.iter().map(|r| r.row.duration_hours).sum();

    // The 4-hour task without a completion date counts in the flat total
    // but in no period group
    assert!((flat_total - period_total - 4.0).abs() < 1e-9);
    assert_eq!(by_period.len(), 2);
}

#[test]
fn filter_order_independence_over_filter_pairs() {
    let records = derived_tasks();
    let roster = roster();

    let filters = [
        filter::TaskFilter {
            teams: filter::Selection::restricted_to(["Elétrica".to_string()]),
            ..filter::TaskFilter::default()
        },
        filter::TaskFilter { overdue_only: true, ..filter::TaskFilter::default() },
        filter::TaskFilter {
            duration_buckets: filter::Selection::restricted_to([DurationBucket::From2To8h]),
            ..filter::TaskFilter::default()
        },
    ];

    for first in &filters {
        for second in &filters {
            let ab = second.apply(&roster, &first.apply(&roster, &records));
            let ba = first.apply(&roster, &second.apply(&roster, &records));
            assert_eq!(ab, ba);
        }
    }
}

#[test]
fn empty_selection_is_pass_through() {
    let records = derived_tasks();
    let unfiltered = filter::TaskFilter::default().apply(&roster(), &records);
    assert_eq!(unfiltered, records);
}

#[test]
fn empty_filter_result_aggregates_to_no_data() {
    let records = derived_tasks();
    let filter = filter::TaskFilter {
        teams: filter::Selection::restricted_to(["Time Fantasma".to_string()]),
        ..filter::TaskFilter::default()
    };

    let kept = filter.apply(&roster(), &records);
    assert!(kept.is_empty());

    // Every downstream reduction reports no-data explicitly
    assert_eq!(aggregate::mean(kept.iter().map(|r| r.row.duration_hours)), None);
    assert_eq!(capacity::global_occupancy(&kept), None);
    assert!(capacity::occupancy_mean_of_monthly(&kept).is_empty());
}

#[test]
fn occupancy_scenario_from_capacity_reference() {
    let records = derived_tasks();
    let occupancy = capacity::occupancy_mean_of_monthly(&records);

    // Ana: January 88h (50%), February 8.01h; mean of the two months
    let january_pct = 88.0 / 176.0 * 100.0;
    let february_pct = 8.01 / 176.0 * 100.0;
    let expected = (january_pct + february_pct) / 2.0;
    let ana = occupancy.get("Ana").copied().unwrap();
    assert!((ana - expected).abs() < 1e-9);
}

#[test]
fn sales_pipeline_abc_and_kpi_shapes() {
    let sheet = RawTable::new(
        vec![
            "Data da Venda".into(),
            "Data de Emissão da NF".into(),
            "Cliente".into(),
            "Vendedor Responsável".into(),
            "Tipo de Solução".into(),
            "Valor da Venda (R$)".into(),
        ],
        vec![
            vec![
                date("2024-03-01"),
                date("2024-03-11"),
                txt("Alpha"),
                txt("Vitor"),
                txt("Automação"),
                txt("R$ 600,00"),
            ],
            vec![
                date("2024-03-02"),
                date("2024-03-07"),
                txt("Beta"),
                txt("Vitor"),
                txt("Retrofit"),
                CellValue::Number(300.0),
            ],
            vec![
                date("2024-03-03"),
                date("2024-03-05"),
                txt("Gamma"),
                txt("Sara"),
                txt("Automação"),
                CellValue::Number(100.0),
            ],
            vec![
                date("2024-03-04"),
                date("2024-03-06"),
                txt("Alpha"),
                txt("Sara"),
                txt("Automação"),
                txt("a combinar"),
            ],
        ],
    );

    let rows = normalize::normalize_sales(&[sheet], &SaleColumns::default());
    let records = derive::derive_sales(&rows);
    assert_eq!(records.len(), 4);

    // Unpriced row is excluded from revenue but not from the record count
    let revenue: f64 = records.iter().filter_map(|r| r.row.amount).sum();
    assert!((revenue - 1000.0).abs() < 1e-9);

    let tiers = derive::classify_abc(&records);
    let labels: Vec<(&str, workdeck_domain::AbcTier)> =
        tiers.iter().map(|t| (t.client.as_str(), t.tier)).collect();
    assert_eq!(
        labels,
        vec![
            ("Alpha", workdeck_domain::AbcTier::A),
            ("Beta", workdeck_domain::AbcTier::B),
            ("Gamma", workdeck_domain::AbcTier::C),
        ]
    );

    // Lead times: 10, 5, 2, 2 days
    let mean_lead =
        aggregate::mean(records.iter().filter_map(|r| r.lead_time_days.map(|d| d as f64)));
    assert_eq!(mean_lead, Some(4.75));

    // Filtering by a salesperson keeps the conjunction empty-safe
    let only_sara = filter::SaleFilter {
        salespeople: filter::Selection::restricted_to(["Sara".to_string()]),
        ..filter::SaleFilter::default()
    };
    assert_eq!(only_sara.apply(&records).len(), 2);
}
