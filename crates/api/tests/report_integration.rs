//! Report command tests over a fixture dataset with a fake roster.

use chrono::NaiveDate;
use workdeck_core::filter::{SaleFilter, Selection, TaskFilter};
use workdeck_domain::{CellValue, RawTable, TeamRoster, WorkdeckConfig};
use workdeck_lib::{commands, AppContext};

fn txt(s: &str) -> CellValue {
    CellValue::Text(s.to_string())
}

fn date(s: &str) -> CellValue {
    CellValue::Date(NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap())
}

fn task_sheet() -> Vec<u8> {
    let table = RawTable::new(
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
                txt("Painel"),
                txt("Ana"),
                txt("Feito"),
                date("2024-01-10"),
                CellValue::Number(88.0),
                date("2024-01-08"),
                txt("Elétrica"),
            ],
            vec![
                txt("Suporte"),
                txt("Bruno"),
                txt("Feito"),
                date("2024-01-10"),
                CellValue::Number(44.0),
                date("2024-01-12"),
                txt("Mecânica"),
            ],
            vec![
                txt("Desenho"),
                txt("Ana"),
                txt("Feito"),
                date("2024-02-28"),
                CellValue::Number(88.0),
                date("2024-02-20"),
                txt("Elétrica"),
            ],
        ],
    );
    serde_json::to_vec(&table).unwrap()
}

fn sales_sheet() -> Vec<u8> {
    let table = RawTable::new(
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
                date("2024-04-01"),
                date("2024-04-03"),
                txt("Gamma"),
                txt("Sara"),
                txt("Automação"),
                txt("sob consulta"),
            ],
        ],
    );
    serde_json::to_vec(&table).unwrap()
}

fn context() -> AppContext {
    let mut config = WorkdeckConfig::default();
    config.roster =
        TeamRoster::new([("Elétrica", vec!["Ana"]), ("Mecânica", vec!["Bruno"])]);

    let mut ctx = AppContext::new(config);
    ctx.load_task_sheets(&[task_sheet()]).unwrap();
    ctx.load_sale_sheets(&[sales_sheet()]).unwrap();
    ctx
}

#[test]
fn task_report_kpis() {
    let ctx = context();
    let report = commands::tasks::build_task_report(&ctx, &TaskFilter::default());

    assert_eq!(report.kpis.completed_tasks, 3);
    assert_eq!(report.kpis.total_hours, 220.0);
    assert_eq!(report.kpis.people, 2);
    assert_eq!(report.kpis.periods, 2);
    // Two on-time of three known
    let rate = report.kpis.punctuality_rate_pct.unwrap();
    assert!((rate - 200.0 / 3.0).abs() < 1e-9);
    // 220 hours over 2 people x 2 months x 176h
    let global = report.kpis.global_occupancy_pct.unwrap();
    assert!((global - 220.0 / 704.0 * 100.0).abs() < 1e-9);
}

#[test]
fn task_report_respects_roster_filter() {
    let ctx = context();
    let filter = TaskFilter {
        teams: Selection::restricted_to(["Elétrica".to_string()]),
        ..TaskFilter::default()
    };

    let report = commands::tasks::build_task_report(&ctx, &filter);
    assert_eq!(report.kpis.completed_tasks, 2);
    assert_eq!(report.top_hours_by_person.len(), 1);
    assert_eq!(report.top_hours_by_person[0].key, "Ana");

    // Ana: 88h in each of two months, 50% occupancy under both definitions
    assert_eq!(report.occupancy_by_person.len(), 1);
    assert!((report.occupancy_by_person[0].occupancy_pct - 50.0).abs() < 1e-9);
    assert!((report.person_span_productivity[0].occupancy_pct - 50.0).abs() < 1e-9);
}

#[test]
fn empty_filter_yields_no_data_report() {
    let ctx = context();
    let filter = TaskFilter {
        teams: Selection::restricted_to(["Time Fantasma".to_string()]),
        ..TaskFilter::default()
    };

    let report = commands::tasks::build_task_report(&ctx, &filter);
    assert_eq!(report.kpis.completed_tasks, 0);
    assert_eq!(report.kpis.mean_lag_days, None);
    assert_eq!(report.kpis.punctuality_rate_pct, None);
    assert_eq!(report.kpis.global_occupancy_pct, None);
    assert!(report.team_production.is_empty());
    assert!(report.insights.top_producer.is_none());
    assert!(report.insights.overloaded.is_empty());
}

#[test]
fn sales_report_counts_and_abc() {
    let ctx = context();
    let report = commands::sales::build_sales_report(&ctx, &SaleFilter::default());

    // Unpriced Gamma row counts as a sale but not as a priced one
    assert_eq!(report.kpis.sale_count, 3);
    assert_eq!(report.kpis.priced_sale_count, 2);
    assert!((report.kpis.total_revenue - 900.0).abs() < 1e-9);
    assert!((report.kpis.mean_ticket.unwrap() - 450.0).abs() < 1e-9);

    assert_eq!(report.abc_classification.len(), 3);
    assert_eq!(report.abc_classification[0].client, "Alpha");

    // Revenue by period is chronological
    let periods: Vec<&str> =
        report.revenue_by_period.iter().map(|p| p.key.as_str()).collect();
    assert_eq!(periods, vec!["2024-03", "2024-04"]);
}

#[test]
fn sales_filter_by_year_and_export() {
    let ctx = context();
    let filter = SaleFilter {
        invoice_years: Selection::restricted_to([2024]),
        salespeople: Selection::restricted_to(["Vitor".to_string()]),
        ..SaleFilter::default()
    };

    let report = commands::sales::build_sales_report(&ctx, &filter);
    assert_eq!(report.kpis.sale_count, 2);

    let csv = commands::sales::export_rows(&ctx, &filter);
    let lines: Vec<&str> = csv.lines().collect();
    // Header plus the two Vitor rows
    assert_eq!(lines.len(), 3);
    assert!(lines[0].starts_with("Data da Venda,"));
    assert!(lines[1].contains("Alpha"));
}

#[test]
fn reload_same_payload_hits_cache() {
    let mut config = WorkdeckConfig::default();
    config.roster = TeamRoster::new([("Elétrica", vec!["Ana"])]);

    let mut ctx = AppContext::new(config);
    ctx.load_task_sheets(&[task_sheet()]).unwrap();
    let first = ctx.tasks().as_ptr();

    ctx.load_task_sheets(&[task_sheet()]).unwrap();
    let second = ctx.tasks().as_ptr();

    // Same fingerprint, same Arc'd dataset
    assert_eq!(first, second);
}
