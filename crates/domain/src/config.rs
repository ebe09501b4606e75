//! Configuration structures
//!
//! Everything the pipelines need from the outside world: the source column
//! headers of each sheet, the team roster, and reporting knobs. All
//! sections default to the production sheet layout so a missing or partial
//! config file still works.
//!
//! The roster is deliberately plain configuration data passed into the
//! filter stage, never ambient state; tests swap in a fake roster by
//! constructing a different [`TeamRoster`].

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::constants::{
    DEFAULT_DONE_STATUS, DEFAULT_MIN_TASKS_FOR_PUNCTUALITY_RANK, DEFAULT_TOP_N,
    OVERLOAD_THRESHOLD_PCT,
};

/// Source column headers of the task sheets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TaskColumns {
    pub name: String,
    pub owner: String,
    pub status: String,
    pub deadline: String,
    pub duration: String,
    pub completed_at: String,
    pub team: String,
}

impl Default for TaskColumns {
    fn default() -> Self {
        Self {
            name: "Name".to_string(),
            owner: "Dono".to_string(),
            status: "Status".to_string(),
            deadline: "Prazo".to_string(),
            duration: "Duração".to_string(),
            completed_at: "Data de Conclusão".to_string(),
            team: "Equipe".to_string(),
        }
    }
}

/// Source column headers of the sales sheet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaleColumns {
    pub sale_date: String,
    pub invoice_date: String,
    pub client: String,
    pub salesperson: String,
    pub solution_type: String,
    pub project_description: String,
    pub amount: String,
    pub work_order: String,
    pub proposal: String,
}

impl Default for SaleColumns {
    fn default() -> Self {
        Self {
            sale_date: "Data da Venda".to_string(),
            invoice_date: "Data de Emissão da NF".to_string(),
            client: "Cliente".to_string(),
            salesperson: "Vendedor Responsável".to_string(),
            solution_type: "Tipo de Solução".to_string(),
            project_description: "Descrição do Projeto".to_string(),
            amount: "Valor da Venda (R$)".to_string(),
            work_order: "OS.".to_string(),
            proposal: "Proposta".to_string(),
        }
    }
}

/// Static mapping from team name to its ordered member list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamRoster {
    pub teams: BTreeMap<String, Vec<String>>,
}

impl TeamRoster {
    /// Create a roster from (team, members) pairs.
    pub fn new<T, M, N>(teams: T) -> Self
    where
        T: IntoIterator<Item = (N, M)>,
        M: IntoIterator<Item = N>,
        N: Into<String>,
    {
        Self {
            teams: teams
                .into_iter()
                .map(|(team, members)| {
                    (team.into(), members.into_iter().map(Into::into).collect())
                })
                .collect(),
        }
    }

    /// Members of one team, in roster order.
    pub fn members(&self, team: &str) -> Option<&[String]> {
        self.teams.get(team).map(Vec::as_slice)
    }

    /// Union of member names across the given teams. Unknown team names
    /// contribute nothing (a configuration mismatch filters to empty, it
    /// does not fail).
    pub fn members_of_teams<'a, I>(&self, teams: I) -> BTreeSet<String>
    where
        I: IntoIterator<Item = &'a str>,
    {
        teams
            .into_iter()
            .filter_map(|team| self.teams.get(team))
            .flat_map(|members| members.iter().cloned())
            .collect()
    }

    /// All team names, in sorted order.
    pub fn team_names(&self) -> impl Iterator<Item = &str> {
        self.teams.keys().map(String::as_str)
    }
}

/// Reporting knobs shared by the dashboard commands.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Ranking length for top-N series.
    pub top_n: usize,
    /// Minimum known-punctuality tasks before a person may appear in the
    /// punctuality ranking.
    pub min_tasks_for_punctuality_rank: u64,
    /// Mean-of-monthly occupancy above which a person counts as
    /// overloaded, percent.
    pub overload_threshold_pct: f64,
    /// Status label marking a task as completed.
    pub done_status: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            min_tasks_for_punctuality_rank: DEFAULT_MIN_TASKS_FOR_PUNCTUALITY_RANK,
            overload_threshold_pct: OVERLOAD_THRESHOLD_PCT,
            done_status: DEFAULT_DONE_STATUS.to_string(),
        }
    }
}

/// Root configuration for the application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkdeckConfig {
    pub task_columns: TaskColumns,
    pub sale_columns: SaleColumns,
    pub roster: TeamRoster,
    pub report: ReportConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_columns_match_production_sheets() {
        let cols = TaskColumns::default();
        assert_eq!(cols.completed_at, "Data de Conclusão");
        assert_eq!(SaleColumns::default().amount, "Valor da Venda (R$)");
    }

    #[test]
    fn test_roster_member_union() {
        let roster = TeamRoster::new([
            ("Compras", vec!["Viviane", "Cintia"]),
            ("Manufatura", vec!["Eduardo", "Viviane"]),
        ]);

        let members = roster.members_of_teams(["Compras", "Manufatura"]);
        assert_eq!(members.len(), 3);
        assert!(members.contains("Viviane"));

        // Unknown teams contribute nothing rather than failing
        let none = roster.members_of_teams(["Ghost Team"]);
        assert!(none.is_empty());
    }

    #[test]
    fn test_partial_config_fills_defaults() {
        let cfg: WorkdeckConfig = serde_json::from_str(r#"{"report": {"top_n": 5}}"#).unwrap();
        assert_eq!(cfg.report.top_n, 5);
        assert_eq!(cfg.report.done_status, "Feito");
        assert_eq!(cfg.task_columns, TaskColumns::default());
    }
}
