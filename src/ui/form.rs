//! Interactive report form
//!
//! Walks through the sections of the printed report with terminal prompts,
//! pre-filled with whatever the draft already holds. Numeric fields are
//! checked as they are typed, so a rejected value is asked for again rather
//! than aborting the form.

use crate::core::constants::report_text;
use crate::core::error::Result;
use crate::drafts::DraftStore;
use crate::export::{format_naira, format_percent};
use crate::model::{
    ApprovalStatus, CoercionPolicy, Compliance, DocsStatus, InspectionReport, NumericKind,
    ProjectFinding, Quality, parse_numeric,
};
use crate::reporting::logging;
use crate::summary::SummaryCalculator;
use crate::ui::color::{Colors, colorize};
use dialoguer::{Confirm, Input, Select, theme::ColorfulTheme};
use std::fmt::Display;

type Section = fn(&ReportForm, &mut InspectionReport) -> Result<()>;

/// Prompt driven editor for a whole report
pub struct ReportForm {
    theme: ColorfulTheme,
    policy: CoercionPolicy,
    calculator: SummaryCalculator,
    autosave: Option<DraftStore>,
}

impl ReportForm {
    pub fn new(policy: CoercionPolicy, calculator: SummaryCalculator) -> Self {
        Self {
            theme: ColorfulTheme::default(),
            policy,
            calculator,
            autosave: None,
        }
    }

    /// Save the draft after every section, project and team member
    pub fn with_autosave(mut self, store: DraftStore) -> Self {
        self.autosave = Some(store);
        self
    }

    const SECTIONS: [Section; 5] = [
        Self::edit_institution,
        Self::edit_projects,
        Self::edit_team,
        Self::edit_bank_charges,
        Self::edit_approval,
    ];

    /// Run the form over `report`, editing it in place
    pub fn run(&self, report: &mut InspectionReport) -> Result<()> {
        self.display_welcome();
        self.run_sections(report, &Self::SECTIONS)?;
        self.show_running_summary(report);
        Ok(())
    }

    /// Run each section in turn, saving what was entered before moving on.
    /// An aborted prompt keeps every earlier section in the draft.
    fn run_sections(&self, report: &mut InspectionReport, sections: &[Section]) -> Result<()> {
        for section in sections {
            section(self, report)?;
            self.checkpoint(report)?;
        }
        Ok(())
    }

    fn checkpoint(&self, report: &InspectionReport) -> Result<()> {
        if let Some(store) = &self.autosave {
            store.save(report)?;
        }
        Ok(())
    }

    fn display_welcome(&self) {
        println!(
            "\n{}",
            colorize(report_text::REPORT_TITLE, Colors::BRIGHT_CYAN)
        );
        println!(
            "{}\n",
            colorize(
                "Press Enter to keep a value. Clear a numeric field to leave it blank.",
                Colors::DIM
            )
        );
    }

    fn section(&self, title: &str) {
        println!("\n{}", colorize(title, Colors::BRIGHT_WHITE));
    }

    fn prompt_text(&self, prompt: &str, current: &str) -> Result<String> {
        Ok(Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .with_initial_text(current)
            .allow_empty(true)
            .interact_text()?)
    }

    fn prompt_date(&self, prompt: &str, current: &str) -> Result<String> {
        Ok(Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .with_initial_text(current)
            .allow_empty(true)
            .validate_with(|input: &String| check_date(input))
            .interact_text()?)
    }

    fn prompt_numeric(
        &self,
        prompt: &str,
        key: &'static str,
        current: Option<f64>,
        kind: NumericKind,
    ) -> Result<Option<f64>> {
        let input = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .with_initial_text(current.map(plain_number).unwrap_or_default())
            .allow_empty(true);

        let raw = match self.policy {
            CoercionPolicy::Reject => input
                .validate_with(move |input: &String| check_numeric(key, kind, input))
                .interact_text()?,
            CoercionPolicy::Coerce => input.interact_text()?,
        };
        self.policy.apply(key, &raw, kind)
    }

    fn prompt_choice<T: Copy + Display + PartialEq>(
        &self,
        prompt: &str,
        options: &[T],
        current: T,
    ) -> Result<T> {
        let labels: Vec<String> = options.iter().map(ToString::to_string).collect();
        let default = options.iter().position(|o| *o == current).unwrap_or(0);
        let selection = Select::with_theme(&self.theme)
            .with_prompt(prompt)
            .items(&labels)
            .default(default)
            .interact()?;
        Ok(options[selection])
    }

    fn confirm(&self, prompt: &str, default: bool) -> Result<bool> {
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact()?)
    }

    fn edit_institution(&self, report: &mut InspectionReport) -> Result<()> {
        self.section("Institution");
        let current = report.institution.clone();

        let name = self.prompt_text("Institution name", &current.name)?;
        report.set_institution_field("name", &name)?;
        let location = self.prompt_text("Location", &current.location)?;
        report.set_institution_field("location", &location)?;
        let code = self.prompt_text("Institution code", &current.code)?;
        report.set_institution_field("code", &code)?;
        let year = self.prompt_text("Intervention year", &current.intervention_year)?;
        report.set_institution_field("year", &year)?;
        let date = self.prompt_date(
            "Inspection date (YYYY-MM-DD)",
            &current.inspection_date.format("%Y-%m-%d").to_string(),
        )?;
        if !date.trim().is_empty() {
            report.set_institution_field("date", &date)?;
        }

        logging::log_edit("institution", &name);
        Ok(())
    }

    fn edit_project(&self, position: usize, project: &mut ProjectFinding) -> Result<()> {
        project.project = self.prompt_text("Project", &project.project)?;
        project.approved_cost = self.prompt_numeric(
            "Approved cost (₦)",
            "approved_cost",
            project.approved_cost,
            NumericKind::Amount,
        )?;
        project.contract_sum = self.prompt_numeric(
            "Contract sum (₦)",
            "contract_sum",
            project.contract_sum,
            NumericKind::Amount,
        )?;
        project.disbursed = self.prompt_numeric(
            "Disbursed (%)",
            "disbursed",
            project.disbursed,
            NumericKind::Percent,
        )?;
        println!(
            "  {}",
            colorize(
                &format!("Balance: {}", format_percent(project.balance_percent())),
                Colors::DIM
            )
        );
        project.quality = self.prompt_choice("Quality of work", Quality::ALL, project.quality)?;
        project.compliance =
            self.prompt_choice("Compliance", Compliance::ALL, project.compliance)?;
        project.other_obs = self.prompt_text("Other observations", &project.other_obs)?;
        project.completion = self.prompt_numeric(
            "Completion (%)",
            "completion",
            project.completion,
            NumericKind::Percent,
        )?;
        project.docs = self.prompt_choice("Documentation", DocsStatus::ALL, project.docs)?;
        project.recommendation = self.prompt_text("Recommendation", &project.recommendation)?;

        logging::log_edit(&format!("project {position}"), &project.project);
        Ok(())
    }

    fn edit_projects(&self, report: &mut InspectionReport) -> Result<()> {
        self.section("Projects Monitoring Details");

        for position in 1..=report.projects.len() {
            let prompt = format!("Edit project {position} ({})?", report.projects[position - 1].project);
            if self.confirm(&prompt, false)? {
                self.edit_project(position, report.project_mut(position)?)?;
                self.checkpoint(report)?;
                self.show_running_summary(report);
            }
        }

        while self.confirm("Add a project?", report.projects.is_empty())? {
            let position = report.add_project(None);
            self.edit_project(position, report.project_mut(position)?)?;
            self.checkpoint(report)?;
            self.show_running_summary(report);
        }
        Ok(())
    }

    fn edit_team(&self, report: &mut InspectionReport) -> Result<()> {
        self.section("Monitoring Team");

        for position in 1..=report.monitoring_team.len() {
            let member = report.monitoring_team[position - 1].clone();
            if self.confirm(&format!("Edit team member {position} ({})?", member.name), false)? {
                let name = self.prompt_text("Name", &member.name)?;
                report.set_team_field(position, "name", &name)?;
                let designation = self.prompt_text("Designation", &member.designation)?;
                report.set_team_field(position, "designation", &designation)?;
                self.checkpoint(report)?;
            }
        }

        while self.confirm("Add a team member?", report.monitoring_team.is_empty())? {
            let name = self.prompt_text("Name", "")?;
            let designation = self.prompt_text("Designation", "")?;
            let position = report.add_team_member(&name, &designation);
            logging::log_edit(&format!("team member {position}"), &name);
            self.checkpoint(report)?;
        }
        Ok(())
    }

    fn edit_bank_charges(&self, report: &mut InspectionReport) -> Result<()> {
        self.section("Bank and Administrative Charges");

        let included = self.confirm(
            "Include bank and administrative charges?",
            report.bank_charges.included,
        )?;
        report.set_bank_charges_included(included);
        if included {
            let amount = self.prompt_numeric(
                "Charges amount (₦)",
                "bank_charges",
                Some(report.bank_charges.amount),
                NumericKind::Amount,
            )?;
            report.bank_charges.amount = amount.unwrap_or(0.0);
        }
        Ok(())
    }

    fn edit_approval(&self, report: &mut InspectionReport) -> Result<()> {
        self.section("DM&E Approval");
        let current = report.approval.clone();

        report.approval.status =
            self.prompt_choice("Approval status", ApprovalStatus::ALL, current.status)?;
        let officer = self.prompt_text("DM&E officer", &current.officer)?;
        report.set_approval_field("officer", &officer)?;
        let date = self.prompt_date(
            "Approval date (YYYY-MM-DD, blank for the export date)",
            &current
                .date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        )?;
        report.set_approval_field("date", &date)?;
        let comments = self.prompt_text("Comments", &current.comments)?;
        report.set_approval_field("comments", &comments)?;
        Ok(())
    }

    fn show_running_summary(&self, report: &InspectionReport) {
        let summary = self.calculator.calculate(report);
        println!(
            "{}",
            colorize(
                &format!(
                    "  Projects {} | Completed {} | Contract {} | Disbursed {} | Balance {}",
                    summary.total_projects,
                    summary.completed,
                    format_naira(summary.total_contract, 2),
                    format_naira(summary.total_disbursed, 2),
                    format_naira(summary.balance, 2)
                ),
                Colors::BRIGHT_CYAN
            )
        );
    }
}

/// Validation for numeric prompts; blank is accepted
fn check_numeric(key: &str, kind: NumericKind, input: &str) -> std::result::Result<(), String> {
    parse_numeric(key, input, kind)
        .map(|_| ())
        .map_err(|e| e.to_string())
}

/// Validation for date prompts; blank is accepted
fn check_date(input: &str) -> std::result::Result<(), String> {
    if input.trim().is_empty() {
        return Ok(());
    }
    chrono::NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d")
        .map(|_| ())
        .map_err(|_| "Expected a date as YYYY-MM-DD".to_string())
}

/// A number as a user would type it back in
fn plain_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::error::TetReportError;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn fill_institution(_: &ReportForm, report: &mut InspectionReport) -> Result<()> {
        report.set_institution_field("name", "Federal Polytechnic, Bida")
    }

    fn add_project(_: &ReportForm, report: &mut InspectionReport) -> Result<()> {
        report.add_project(Some("Workshop roof"));
        Ok(())
    }

    fn interrupted(_: &ReportForm, _: &mut InspectionReport) -> Result<()> {
        Err(TetReportError::InvalidArgument("prompt interrupted".to_string()))
    }

    fn blank_report() -> InspectionReport {
        InspectionReport::new(NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(), 0.0)
    }

    #[test]
    fn test_sections_are_saved_before_an_interruption() -> Result<()> {
        let dir = TempDir::new()?;
        let store = DraftStore::in_dir(dir.path());
        let form = ReportForm::new(CoercionPolicy::Reject, SummaryCalculator::default())
            .with_autosave(store.clone());

        let mut report = blank_report();
        let result = form.run_sections(&mut report, &[fill_institution, add_project, interrupted]);
        assert!(result.is_err());

        let saved = store.load()?.expect("draft should exist").report;
        assert_eq!(saved.institution.name, "Federal Polytechnic, Bida");
        assert_eq!(saved.projects.len(), 1);
        assert_eq!(saved.projects[0].project, "Workshop roof");
        Ok(())
    }

    #[test]
    fn test_sections_without_autosave_write_nothing() -> Result<()> {
        let dir = TempDir::new()?;
        let store = DraftStore::in_dir(dir.path());
        let form = ReportForm::new(CoercionPolicy::Reject, SummaryCalculator::default());

        let mut report = blank_report();
        form.run_sections(&mut report, &[fill_institution])?;
        assert_eq!(report.institution.name, "Federal Polytechnic, Bida");
        assert!(!store.exists());
        Ok(())
    }

    #[test]
    fn test_check_numeric() {
        assert!(check_numeric("disbursed", NumericKind::Percent, "45%").is_ok());
        assert!(check_numeric("disbursed", NumericKind::Percent, "").is_ok());
        assert!(check_numeric("approved_cost", NumericKind::Amount, "₦1,000").is_ok());

        let err = check_numeric("disbursed", NumericKind::Percent, "140").unwrap_err();
        assert!(err.contains("disbursed"));
        assert!(check_numeric("approved_cost", NumericKind::Amount, "lots").is_err());
    }

    #[test]
    fn test_check_date() {
        assert!(check_date("2025-07-09").is_ok());
        assert!(check_date("   ").is_ok());
        assert!(check_date("09/07/2025").is_err());
    }

    #[test]
    fn test_plain_number() {
        assert_eq!(plain_number(1_500_000.0), "1500000");
        assert_eq!(plain_number(42.5), "42.5");
        assert_eq!(plain_number(0.0), "0");
    }
}
