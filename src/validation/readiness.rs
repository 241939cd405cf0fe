use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::OnceLock;

use crate::model::InspectionReport;

/// How much an issue matters for export
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Blocks the printable export
    Error,
    /// Reported, but the export still goes ahead
    Warning,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    pub field: &'static str,
    pub message: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// Outcome of checking a report before export
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Readiness {
    pub issues: Vec<ValidationIssue>,
}

impl Readiness {
    pub fn is_ready(&self) -> bool {
        !self.issues.iter().any(|i| i.severity == Severity::Error)
    }

    pub fn errors(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Error)
    }

    pub fn warnings(&self) -> impl Iterator<Item = &ValidationIssue> {
        self.issues.iter().filter(|i| i.severity == Severity::Warning)
    }

    /// Error messages, for [`crate::TetReportError::Validation`]
    pub fn error_messages(&self) -> Vec<String> {
        self.errors().map(|i| i.message.clone()).collect()
    }
}

fn year_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]{4}$").expect("year pattern is valid"))
}

/// Check that `report` has what the printed report needs
pub fn check_readiness(report: &InspectionReport) -> Readiness {
    let mut issues = Vec::new();
    let mut error = |field, message: &str| {
        issues.push(ValidationIssue {
            severity: Severity::Error,
            field,
            message: message.to_string(),
        })
    };

    if report.institution.name.trim().is_empty() {
        error("institution.name", "Institution name is required");
    }
    if report.institution.location.trim().is_empty() {
        error("institution.location", "Location is required");
    }
    if report.projects.is_empty() {
        error("projects", "At least one project is required");
    }

    let year = report.institution.intervention_year.trim();
    if !year_pattern().is_match(year) {
        issues.push(ValidationIssue {
            severity: Severity::Warning,
            field: "institution.intervention_year",
            message: format!("Intervention year '{year}' does not look like a year"),
        });
    }

    Readiness { issues }
}
