use serde::{Deserialize, Serialize};

use crate::core::constants::{defaults, limits};
use crate::model::{InspectionReport, ProjectFinding};

/// Amount the disbursed percentage of a project is applied to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisbursementBasis {
    #[default]
    ContractSum,
    ApprovedCost,
}

impl DisbursementBasis {
    fn amount_of(self, project: &ProjectFinding) -> f64 {
        match self {
            DisbursementBasis::ContractSum => project.contract_sum.unwrap_or(0.0),
            DisbursementBasis::ApprovedCost => project.approved_cost.unwrap_or(0.0),
        }
    }
}

/// Tunable parts of the aggregation formula
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryRule {
    /// Completion percentage at which a project counts as completed
    #[serde(default = "default_completion_threshold")]
    pub completion_threshold: f64,

    #[serde(default)]
    pub disbursement_basis: DisbursementBasis,
}

fn default_completion_threshold() -> f64 {
    defaults::COMPLETION_THRESHOLD
}

impl Default for SummaryRule {
    fn default() -> Self {
        Self {
            completion_threshold: defaults::COMPLETION_THRESHOLD,
            disbursement_basis: DisbursementBasis::default(),
        }
    }
}

/// Sum and fill count over a set of optional numeric fields.
///
/// Blank fields add nothing to `total` and are not counted as completed.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct FieldSummary {
    pub total: f64,
    pub completed: usize,
    pub field_count: usize,
}

impl FieldSummary {
    pub fn from_values(values: &[Option<f64>]) -> Self {
        values.iter().copied().collect()
    }

    /// Share of fields filled in, within `[0, 1]`; zero when there are no fields
    pub fn fraction_complete(&self) -> f64 {
        if self.field_count == 0 {
            0.0
        } else {
            self.completed as f64 / self.field_count as f64
        }
    }

    pub fn percent_complete(&self) -> f64 {
        self.fraction_complete() * limits::MAX_PERCENTAGE
    }
}

impl FromIterator<Option<f64>> for FieldSummary {
    fn from_iter<I: IntoIterator<Item = Option<f64>>>(iter: I) -> Self {
        iter.into_iter()
            .fold(FieldSummary::default(), |mut summary, value| {
                summary.field_count += 1;
                if let Some(value) = value {
                    summary.total += value;
                    summary.completed += 1;
                }
                summary
            })
    }
}

/// Summary figures shown under the findings table and printed on the report
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportSummary {
    pub total_projects: usize,
    pub completed: usize,
    pub in_progress: usize,
    /// Percentage of projects completed, within `[0, 100]`
    pub completion_rate: f64,
    pub total_approved: f64,
    pub total_contract: f64,
    pub total_disbursed: f64,
    pub balance: f64,
    /// Bank charges folded into the three totals (zero when excluded)
    pub bank_charges: f64,
    pub approved_cost: FieldSummary,
    pub contract_sum: FieldSummary,
    /// Fill state of every numeric finding cell on the form
    pub entry: FieldSummary,
}

/// Derives the summary figures of a report under a [`SummaryRule`]
#[derive(Debug, Clone, Default)]
pub struct SummaryCalculator {
    rule: SummaryRule,
}

impl SummaryCalculator {
    pub fn new(rule: SummaryRule) -> Self {
        Self { rule }
    }

    pub fn rule(&self) -> &SummaryRule {
        &self.rule
    }

    pub fn is_completed(&self, project: &ProjectFinding) -> bool {
        project.completion.unwrap_or(0.0) >= self.rule.completion_threshold
    }

    /// Naira amount disbursed on one project
    pub fn disbursed_amount(&self, project: &ProjectFinding) -> f64 {
        (project.disbursed.unwrap_or(0.0) / 100.0) * self.rule.disbursement_basis.amount_of(project)
    }

    pub fn calculate(&self, report: &InspectionReport) -> ReportSummary {
        let projects = &report.projects;
        let total_projects = projects.len();
        let completed = projects.iter().filter(|p| self.is_completed(p)).count();
        let completion_rate = if total_projects > 0 {
            completed as f64 / total_projects as f64 * 100.0
        } else {
            0.0
        };

        let approved_cost: FieldSummary = projects.iter().map(|p| p.approved_cost).collect();
        let contract_sum: FieldSummary = projects.iter().map(|p| p.contract_sum).collect();
        let entry: FieldSummary = projects.iter().flat_map(|p| p.numeric_cells()).collect();

        let bank_charges = report.bank_charges.effective_amount();
        let total_approved = approved_cost.total + bank_charges;
        let total_contract = contract_sum.total + bank_charges;
        let total_disbursed = projects
            .iter()
            .map(|p| self.disbursed_amount(p))
            .sum::<f64>()
            + bank_charges;

        ReportSummary {
            total_projects,
            completed,
            in_progress: total_projects - completed,
            completion_rate,
            total_approved,
            total_contract,
            total_disbursed,
            balance: total_contract - total_disbursed,
            bank_charges,
            approved_cost,
            contract_sum,
            entry,
        }
    }
}

/// Summary of `report` under the default rule
pub fn summarize(report: &InspectionReport) -> ReportSummary {
    SummaryCalculator::default().calculate(report)
}
