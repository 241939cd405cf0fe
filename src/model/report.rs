//! The inspection report record and its field-level edits

use chrono::{Datelike, Local, NaiveDate};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::constants::defaults;
use crate::core::error::{Result, TetReportError};
use crate::model::input::{CoercionPolicy, NumericKind, lenient_amount, lenient_percent};

/// Declares a closed set of form choices with display labels and
/// case-insensitive parsing that ignores `_`, `-` and space differences.
macro_rules! form_choice {
    (
        $(#[$meta:meta])*
        $name:ident, default = $default:ident, {
            $($variant:ident => $label:tt),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$default
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.label())
            }
        }

        impl FromStr for $name {
            type Err = TetReportError;

            fn from_str(s: &str) -> Result<Self> {
                let wanted = s.trim().to_lowercase().replace(['_', ' '], "-");
                $name::ALL
                    .iter()
                    .copied()
                    .find(|choice| choice.label().to_lowercase().replace(' ', "-") == wanted)
                    .ok_or_else(|| {
                        let options: Vec<&str> = $name::ALL.iter().map(|c| c.label()).collect();
                        TetReportError::InvalidArgument(format!(
                            "'{}' is not a valid {}. Expected one of: {}",
                            s,
                            stringify!($name),
                            options.join(", ")
                        ))
                    })
            }
        }
    };
}

form_choice! {
    /// Quality of work observed on site
    Quality, default = Good, {
        Excellent => "Excellent",
        Good => "Good",
        Average => "Average",
        Poor => "Poor",
    }
}

form_choice! {
    /// Compliance with the approved specification
    Compliance, default = Compliant, {
        Compliant => "Compliant",
        Partial => "Partial",
        NonCompliant => "Non-compliant",
    }
}

form_choice! {
    /// State of the project documentation
    DocsStatus, default = Pending, {
        Submitted => "Submitted",
        Pending => "Pending",
        Incomplete => "Incomplete",
    }
}

form_choice! {
    /// DM&E approval decision
    ApprovalStatus, default = Pending, {
        Pending => "Pending",
        Approved => "Approved",
        ReturnedForCorrection => "Returned for Correction",
        Rejected => "Rejected",
    }
}

fn parse_date(field: &str, value: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), "%Y-%m-%d").map_err(|e| {
        TetReportError::InvalidArgument(format!(
            "'{value}' is not a valid {field}, expected YYYY-MM-DD ({e})"
        ))
    })
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Institution {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub location: String,
    /// Institution code as issued by the fund, e.g. `TF/NE/2025/01`
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub intervention_year: String,
    pub inspection_date: NaiveDate,
}

impl Institution {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            name: String::new(),
            location: String::new(),
            code: String::new(),
            intervention_year: today.year().to_string(),
            inspection_date: today,
        }
    }
}

/// One row of the projects monitoring table.
///
/// Serial number and balance are derived from the row position and the
/// disbursed percentage, so they are exposed as methods only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectFinding {
    #[serde(default)]
    pub project: String,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub approved_cost: Option<f64>,
    #[serde(default, deserialize_with = "lenient_amount")]
    pub contract_sum: Option<f64>,
    #[serde(default, deserialize_with = "lenient_percent")]
    pub disbursed: Option<f64>,
    #[serde(default)]
    pub quality: Quality,
    #[serde(default)]
    pub compliance: Compliance,
    #[serde(default)]
    pub other_obs: String,
    #[serde(default, deserialize_with = "lenient_percent")]
    pub completion: Option<f64>,
    #[serde(default)]
    pub docs: DocsStatus,
    #[serde(default)]
    pub recommendation: String,
}

impl Default for ProjectFinding {
    fn default() -> Self {
        Self {
            project: defaults::PROJECT_DESCRIPTION.to_string(),
            approved_cost: None,
            contract_sum: None,
            disbursed: None,
            quality: Quality::default(),
            compliance: Compliance::default(),
            other_obs: String::new(),
            completion: None,
            docs: DocsStatus::default(),
            recommendation: defaults::RECOMMENDATION.to_string(),
        }
    }
}

impl ProjectFinding {
    /// Percentage of the contract still to be disbursed
    pub fn balance_percent(&self) -> f64 {
        100.0 - self.disbursed.unwrap_or(0.0)
    }

    /// The numeric finding cells in column order, blanks as `None`
    pub fn numeric_cells(&self) -> [Option<f64>; 4] {
        [
            self.approved_cost,
            self.contract_sum,
            self.disbursed,
            self.completion,
        ]
    }

    /// Set one column from raw form text
    pub fn set_field(
        &mut self,
        field: ProjectField,
        raw: &str,
        policy: CoercionPolicy,
    ) -> Result<()> {
        let key = field.key();
        match field {
            ProjectField::Project => self.project = raw.to_string(),
            ProjectField::ApprovedCost => {
                self.approved_cost = policy.apply(key, raw, NumericKind::Amount)?
            }
            ProjectField::ContractSum => {
                self.contract_sum = policy.apply(key, raw, NumericKind::Amount)?
            }
            ProjectField::Disbursed => {
                self.disbursed = policy.apply(key, raw, NumericKind::Percent)?
            }
            ProjectField::Completion => {
                self.completion = policy.apply(key, raw, NumericKind::Percent)?
            }
            ProjectField::Quality => self.quality = raw.parse()?,
            ProjectField::Compliance => self.compliance = raw.parse()?,
            ProjectField::OtherObs => self.other_obs = raw.to_string(),
            ProjectField::Docs => self.docs = raw.parse()?,
            ProjectField::Recommendation => self.recommendation = raw.to_string(),
        }
        Ok(())
    }
}

/// Editable columns of the projects table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectField {
    Project,
    ApprovedCost,
    ContractSum,
    Disbursed,
    Quality,
    Compliance,
    OtherObs,
    Completion,
    Docs,
    Recommendation,
}

impl ProjectField {
    pub const ALL: [ProjectField; 10] = [
        ProjectField::Project,
        ProjectField::ApprovedCost,
        ProjectField::ContractSum,
        ProjectField::Disbursed,
        ProjectField::Quality,
        ProjectField::Compliance,
        ProjectField::OtherObs,
        ProjectField::Completion,
        ProjectField::Docs,
        ProjectField::Recommendation,
    ];

    pub fn key(&self) -> &'static str {
        match self {
            ProjectField::Project => "project",
            ProjectField::ApprovedCost => "approved_cost",
            ProjectField::ContractSum => "contract_sum",
            ProjectField::Disbursed => "disbursed",
            ProjectField::Quality => "quality",
            ProjectField::Compliance => "compliance",
            ProjectField::OtherObs => "other_obs",
            ProjectField::Completion => "completion",
            ProjectField::Docs => "docs",
            ProjectField::Recommendation => "recommendation",
        }
    }
}

impl FromStr for ProjectField {
    type Err = TetReportError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase().replace('-', "_");
        if wanted == "s_no" || wanted == "balance" {
            return Err(TetReportError::InvalidField(format!(
                "'{wanted}' is calculated from the other columns and cannot be edited"
            )));
        }
        ProjectField::ALL
            .iter()
            .copied()
            .find(|field| field.key() == wanted)
            .ok_or_else(|| {
                let keys: Vec<&str> = ProjectField::ALL.iter().map(|f| f.key()).collect();
                TetReportError::InvalidField(format!(
                    "Unknown project column '{s}'. Expected one of: {}",
                    keys.join(", ")
                ))
            })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TeamMember {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub designation: String,
}

/// Optional bank and administrative charges line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BankCharges {
    #[serde(default)]
    pub included: bool,
    #[serde(
        default = "default_bank_charges_amount",
        deserialize_with = "lenient_charges_amount"
    )]
    pub amount: f64,
}

fn default_bank_charges_amount() -> f64 {
    defaults::BANK_CHARGES_AMOUNT
}

/// A stored amount that is blank or invalid counts as no charge
fn lenient_charges_amount<'de, D>(deserializer: D) -> std::result::Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(lenient_amount(deserializer)?.unwrap_or(0.0))
}

impl Default for BankCharges {
    fn default() -> Self {
        Self {
            included: false,
            amount: defaults::BANK_CHARGES_AMOUNT,
        }
    }
}

impl BankCharges {
    /// The amount that enters the summary totals
    pub fn effective_amount(&self) -> f64 {
        if self.included { self.amount } else { 0.0 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Approval {
    #[serde(default)]
    pub status: ApprovalStatus,
    #[serde(default)]
    pub officer: String,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub comments: String,
}

/// A project inspection report as entered on the form
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectionReport {
    pub institution: Institution,
    #[serde(default)]
    pub projects: Vec<ProjectFinding>,
    #[serde(default)]
    pub monitoring_team: Vec<TeamMember>,
    #[serde(default)]
    pub bank_charges: BankCharges,
    #[serde(default)]
    pub approval: Approval,
}

impl Default for InspectionReport {
    fn default() -> Self {
        Self::new(Local::now().date_naive(), defaults::BANK_CHARGES_AMOUNT)
    }
}

impl InspectionReport {
    /// An empty report dated `today`
    pub fn new(today: NaiveDate, bank_charges_amount: f64) -> Self {
        Self {
            institution: Institution::new(today),
            projects: Vec::new(),
            monitoring_team: Vec::new(),
            bank_charges: BankCharges {
                included: false,
                amount: bank_charges_amount,
            },
            approval: Approval::default(),
        }
    }

    /// Clear every field, keeping the configured bank charges amount
    pub fn reset(&mut self, today: NaiveDate, bank_charges_amount: f64) {
        *self = Self::new(today, bank_charges_amount);
    }

    pub fn set_institution_field(&mut self, field: &str, value: &str) -> Result<()> {
        match field.trim().to_lowercase().as_str() {
            "name" => self.institution.name = value.to_string(),
            "location" => self.institution.location = value.to_string(),
            "code" => self.institution.code = value.trim().to_string(),
            "year" | "intervention_year" => {
                self.institution.intervention_year = value.trim().to_string()
            }
            "date" | "inspection_date" => {
                self.institution.inspection_date = parse_date("inspection date", value)?
            }
            other => {
                return Err(TetReportError::InvalidField(format!(
                    "Unknown institution field '{other}'. Expected one of: name, location, code, year, date"
                )));
            }
        }
        debug!("Institution {field} set to '{value}'");
        Ok(())
    }

    /// Append a project row with default values, returning its serial number
    pub fn add_project(&mut self, description: Option<&str>) -> usize {
        let mut project = ProjectFinding::default();
        if let Some(description) = description {
            project.project = description.to_string();
        }
        self.projects.push(project);
        self.projects.len()
    }

    pub fn remove_last_project(&mut self) -> Option<ProjectFinding> {
        self.projects.pop()
    }

    /// Remove the project with the given serial number
    pub fn remove_project(&mut self, position: usize) -> Result<ProjectFinding> {
        let index = Self::index_for(position, self.projects.len(), "project")?;
        Ok(self.projects.remove(index))
    }

    pub fn project_mut(&mut self, position: usize) -> Result<&mut ProjectFinding> {
        let index = Self::index_for(position, self.projects.len(), "project")?;
        Ok(&mut self.projects[index])
    }

    pub fn set_project_field(
        &mut self,
        position: usize,
        field: &str,
        raw: &str,
        policy: CoercionPolicy,
    ) -> Result<()> {
        let field: ProjectField = field.parse()?;
        self.project_mut(position)?.set_field(field, raw, policy)?;
        debug!("Project {position} {} set to '{raw}'", field.key());
        Ok(())
    }

    pub fn add_team_member(&mut self, name: &str, designation: &str) -> usize {
        self.monitoring_team.push(TeamMember {
            name: name.to_string(),
            designation: designation.to_string(),
        });
        self.monitoring_team.len()
    }

    pub fn remove_last_team_member(&mut self) -> Option<TeamMember> {
        self.monitoring_team.pop()
    }

    pub fn set_team_field(&mut self, position: usize, field: &str, value: &str) -> Result<()> {
        let index = Self::index_for(position, self.monitoring_team.len(), "team member")?;
        let member = &mut self.monitoring_team[index];
        match field.trim().to_lowercase().as_str() {
            "name" => member.name = value.to_string(),
            "designation" | "role" => member.designation = value.to_string(),
            other => {
                return Err(TetReportError::InvalidField(format!(
                    "Unknown team member field '{other}'. Expected one of: name, designation"
                )));
            }
        }
        Ok(())
    }

    pub fn set_bank_charges_included(&mut self, included: bool) {
        self.bank_charges.included = included;
    }

    /// Set the bank charges amount from raw form text; blank means zero
    pub fn set_bank_charges_amount(&mut self, raw: &str, policy: CoercionPolicy) -> Result<()> {
        let amount = policy.apply("bank_charges", raw, NumericKind::Amount)?;
        self.bank_charges.amount = amount.unwrap_or(0.0);
        Ok(())
    }

    pub fn set_approval_field(&mut self, field: &str, value: &str) -> Result<()> {
        match field.trim().to_lowercase().as_str() {
            "status" => self.approval.status = value.parse()?,
            "officer" => self.approval.officer = value.to_string(),
            "date" => {
                self.approval.date = if value.trim().is_empty() {
                    None
                } else {
                    Some(parse_date("approval date", value)?)
                }
            }
            "comments" => self.approval.comments = value.to_string(),
            other => {
                return Err(TetReportError::InvalidField(format!(
                    "Unknown approval field '{other}'. Expected one of: status, officer, date, comments"
                )));
            }
        }
        Ok(())
    }

    fn index_for(position: usize, len: usize, what: &str) -> Result<usize> {
        if position == 0 || position > len {
            return Err(TetReportError::InvalidField(format!(
                "There is no {what} number {position} (the report has {len})"
            )));
        }
        Ok(position - 1)
    }
}
