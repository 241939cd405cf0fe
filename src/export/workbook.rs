//! CSV workbook export
//!
//! The workbook is a directory with one CSV file per sheet: the projects
//! table, the institution details and the summary figures.

use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::error::Result;
use crate::export::export_rows;
use crate::model::InspectionReport;
use crate::reporting::logging;
use crate::summary::ReportSummary;

pub const PROJECTS_SHEET: &str = "projects.csv";
pub const INSTITUTION_SHEET: &str = "institution.csv";
pub const SUMMARY_SHEET: &str = "summary.csv";

#[derive(Debug, Serialize)]
struct InstitutionRow<'a> {
    name: &'a str,
    location: &'a str,
    code: &'a str,
    intervention_year: &'a str,
    inspection_date: String,
}

#[derive(Debug, Serialize)]
struct SummaryRow {
    total_projects: usize,
    completed: usize,
    in_progress: usize,
    completion_rate: f64,
    total_approved: f64,
    total_contract: f64,
    total_disbursed: f64,
    balance: f64,
    bank_charges: f64,
}

impl From<&ReportSummary> for SummaryRow {
    fn from(summary: &ReportSummary) -> Self {
        Self {
            total_projects: summary.total_projects,
            completed: summary.completed,
            in_progress: summary.in_progress,
            completion_rate: summary.completion_rate,
            total_approved: summary.total_approved,
            total_contract: summary.total_contract,
            total_disbursed: summary.total_disbursed,
            balance: summary.balance,
            bank_charges: summary.bank_charges,
        }
    }
}

fn write_sheet<T: Serialize>(path: &Path, rows: impl IntoIterator<Item = T>) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

/// Write the workbook into `dir`, creating it if needed.
///
/// Returns the paths of the written sheets. Bank charges appear in the
/// summary sheet only, not as a project row.
pub fn write_workbook<P: AsRef<Path>>(
    dir: P,
    report: &InspectionReport,
    summary: &ReportSummary,
) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir)?;

    let projects_path = dir.join(PROJECTS_SHEET);
    let rows = export_rows(report, false);
    if rows.is_empty() {
        // csv only writes headers alongside the first record
        fs::write(
            &projects_path,
            "s_no,project,approved_cost,contract_sum,disbursed,balance,quality,compliance,other_obs,completion,docs,recommendation\n",
        )?;
    } else {
        write_sheet(&projects_path, rows)?;
    }

    let institution_path = dir.join(INSTITUTION_SHEET);
    let institution = &report.institution;
    write_sheet(
        &institution_path,
        [InstitutionRow {
            name: &institution.name,
            location: &institution.location,
            code: &institution.code,
            intervention_year: &institution.intervention_year,
            inspection_date: institution.inspection_date.format("%d-%b-%Y").to_string(),
        }],
    )?;

    let summary_path = dir.join(SUMMARY_SHEET);
    write_sheet(&summary_path, [SummaryRow::from(summary)])?;

    logging::log_export("csv workbook", dir);
    Ok(vec![projects_path, institution_path, summary_path])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CoercionPolicy;
    use crate::summary::summarize;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn report() -> InspectionReport {
        let mut report =
            InspectionReport::new(NaiveDate::from_ymd_opt(2025, 7, 9).unwrap(), 215_013.0);
        report.set_institution_field("name", "Federal University, Lokoja").unwrap();
        report.set_institution_field("location", "Lokoja").unwrap();
        report.set_institution_field("code", "TF/NC/2025/07").unwrap();
        report.add_project(Some("Perimeter fence"));
        report
            .set_project_field(1, "contract_sum", "300000", CoercionPolicy::Reject)
            .unwrap();
        report.set_bank_charges_included(true);
        report
    }

    #[test]
    fn test_write_workbook_creates_three_sheets() -> Result<()> {
        let dir = TempDir::new()?;
        let out = dir.path().join("workbook");
        let report = report();

        let paths = write_workbook(&out, &report, &summarize(&report))?;
        assert_eq!(paths.len(), 3);
        assert!(paths.iter().all(|p| p.is_file()));

        let projects = fs::read_to_string(out.join(PROJECTS_SHEET))?;
        let mut lines = projects.lines();
        assert!(lines.next().unwrap().starts_with("s_no,project,approved_cost"));
        assert!(lines.next().unwrap().starts_with("1,Perimeter fence,0.0,300000.0"));
        assert!(lines.next().is_none());

        let institution = fs::read_to_string(out.join(INSTITUTION_SHEET))?;
        assert!(institution.starts_with("name,location,code,intervention_year,inspection_date"));
        assert!(institution.contains(
            "\"Federal University, Lokoja\",Lokoja,TF/NC/2025/07,2025,09-Jul-2025"
        ));

        let summary = fs::read_to_string(out.join(SUMMARY_SHEET))?;
        assert!(summary.contains("bank_charges"));
        assert!(summary.contains("215013.0"));
        Ok(())
    }

    #[test]
    fn test_workbook_without_projects_keeps_header() -> Result<()> {
        let dir = TempDir::new()?;
        let report = InspectionReport::new(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(), 0.0);

        write_workbook(dir.path(), &report, &summarize(&report))?;
        let projects = fs::read_to_string(dir.path().join(PROJECTS_SHEET))?;
        assert_eq!(projects.lines().count(), 1);
        Ok(())
    }
}
