//! CSV export of filtered row-level tables
//!
//! Column order and header names are fixed: the export is consumed by
//! spreadsheet users who expect the dashboard's display names, in the
//! dashboard's order. Fields are quoted per RFC 4180 when they contain a
//! delimiter, quote, or line break.

use workdeck_domain::{SaleRecord, TaskRecord};

/// Header row of the task export, in display order.
pub const TASK_EXPORT_COLUMNS: [&str; 11] = [
    "Tarefa",
    "Responsável",
    "Equipe",
    "Status",
    "Prazo",
    "Data de Conclusão",
    "Duração (h)",
    "Mês",
    "Dias de Atraso",
    "No Prazo",
    "Faixa de Duração",
];

/// Header row of the sales export, in display order.
pub const SALE_EXPORT_COLUMNS: [&str; 12] = [
    "Data da Venda",
    "Data de Emissão da NF",
    "Cliente",
    "Vendedor",
    "Tipo de Solução",
    "Descrição do Projeto",
    "Valor da Venda",
    "OS",
    "Proposta",
    "Lead Time (dias)",
    "Mês",
    "Faixa de Valor",
];

/// Render the filtered task table as delimited text.
pub fn tasks_to_csv(records: &[TaskRecord]) -> String {
    let mut out = String::new();
    write_row(&mut out, TASK_EXPORT_COLUMNS.iter().map(|c| (*c).to_string()));

    for record in records {
        write_row(
            &mut out,
            [
                record.row.name.clone(),
                record.row.owner.clone().unwrap_or_default(),
                record.row.team.clone().unwrap_or_default(),
                record.row.status.clone(),
                record.row.deadline.map(|d| d.to_string()).unwrap_or_default(),
                record.row.completed_at.map(|d| d.to_string()).unwrap_or_default(),
                format_number(record.row.duration_hours),
                record.period_key.map(|k| k.to_string()).unwrap_or_default(),
                record.lag_days.map(|d| d.to_string()).unwrap_or_default(),
                match record.punctuality.as_on_time() {
                    Some(true) => "Sim".to_string(),
                    Some(false) => "Não".to_string(),
                    None => String::new(),
                },
                record.duration_bucket.map(|b| b.to_string()).unwrap_or_default(),
            ],
        );
    }

    out
}

/// Render the filtered sales table as delimited text.
pub fn sales_to_csv(records: &[SaleRecord]) -> String {
    let mut out = String::new();
    write_row(&mut out, SALE_EXPORT_COLUMNS.iter().map(|c| (*c).to_string()));

    for record in records {
        write_row(
            &mut out,
            [
                record.row.sale_date.map(|d| d.to_string()).unwrap_or_default(),
                record.row.invoice_date.map(|d| d.to_string()).unwrap_or_default(),
                record.row.client.clone(),
                record.row.salesperson.clone().unwrap_or_default(),
                record.row.solution_type.clone().unwrap_or_default(),
                record.row.project_description.clone().unwrap_or_default(),
                record.row.amount.map(format_number).unwrap_or_default(),
                record.row.work_order.clone().unwrap_or_default(),
                record.row.proposal.clone().unwrap_or_default(),
                record.lead_time_days.map(|d| d.to_string()).unwrap_or_default(),
                record.period_key.map(|k| k.to_string()).unwrap_or_default(),
                record.value_bucket.map(|b| b.to_string()).unwrap_or_default(),
            ],
        );
    }

    out
}

fn write_row<I: IntoIterator<Item = String>>(out: &mut String, fields: I) {
    let mut first = true;
    for field in fields {
        if !first {
            out.push(',');
        }
        first = false;
        out.push_str(&escape(&field));
    }
    out.push_str("\r\n");
}

fn format_number(value: f64) -> String {
    // Integral values print without a trailing ".0"
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

fn escape(field: &str) -> String {
    if field.contains(',') || field.contains('"') || field.contains('\n') || field.contains('\r') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
