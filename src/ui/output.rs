//! Output formatting and display logic for tetreport

use crate::core::constants::{display, output_formats};
use crate::core::error::Result;
use crate::export::{export_rows, format_naira, format_percent};
use crate::model::InspectionReport;
use crate::summary::ReportSummary;
use crate::ui::color::{Colors, colorize, emphasize, percent_color};
use crate::validation::{Readiness, Severity};
use serde_json::json;

fn label_value(label: &str, value: &str) -> String {
    format!(
        "  {}: {}",
        emphasize(label, Colors::BRIGHT_CYAN),
        colorize(value, Colors::BRIGHT_WHITE)
    )
}

fn heading(emoji: &str, title: &str) -> String {
    format!("{} {}", emoji, emphasize(title, Colors::BRIGHT_BLUE))
}

fn or_placeholder(value: &str) -> &str {
    if value.trim().is_empty() { "-" } else { value }
}

/// Summary figures as colored text lines
pub fn format_summary_text(summary: &ReportSummary) -> String {
    let mut lines = vec![heading(display::SUMMARY_EMOJI, "Summary")];
    lines.push(label_value("Total Projects", &summary.total_projects.to_string()));
    lines.push(label_value("Completed", &summary.completed.to_string()));
    lines.push(label_value("In Progress", &summary.in_progress.to_string()));
    lines.push(format!(
        "  {}: {}",
        emphasize("Completion Rate", Colors::BRIGHT_CYAN),
        colorize(
            &format_percent(summary.completion_rate),
            percent_color(summary.completion_rate)
        )
    ));
    lines.push(label_value("Total Approved", &format_naira(summary.total_approved, 2)));
    lines.push(label_value("Total Contract", &format_naira(summary.total_contract, 2)));
    lines.push(label_value("Total Disbursed", &format_naira(summary.total_disbursed, 2)));
    lines.push(label_value("Balance", &format_naira(summary.balance, 2)));
    if summary.bank_charges > 0.0 {
        lines.push(colorize(
            &format!(
                "  (includes {} bank and administrative charges)",
                format_naira(summary.bank_charges, 2)
            ),
            Colors::DIM,
        ));
    }
    lines.push(label_value(
        "Fields Filled",
        &format!(
            "{}/{} ({})",
            summary.entry.completed,
            summary.entry.field_count,
            format_percent(summary.entry.percent_complete())
        ),
    ));
    lines.join("\n")
}

/// The whole report as colored text
pub fn format_report_text(report: &InspectionReport, summary: &ReportSummary) -> String {
    let institution = &report.institution;
    let mut lines = vec![heading(display::INSTITUTION_EMOJI, "Institution")];
    lines.push(label_value("Name", or_placeholder(&institution.name)));
    lines.push(label_value("Location", or_placeholder(&institution.location)));
    lines.push(label_value("Code", or_placeholder(&institution.code)));
    lines.push(label_value(
        "Intervention Year",
        or_placeholder(&institution.intervention_year),
    ));
    lines.push(label_value(
        "Inspection Date",
        &institution.inspection_date.format("%Y-%m-%d").to_string(),
    ));
    lines.push(String::new());

    lines.push(heading(display::PROJECTS_EMOJI, "Projects"));
    let rows = export_rows(report, true);
    if rows.is_empty() {
        lines.push(colorize("  No projects yet", Colors::DIM));
    }
    for row in rows {
        lines.push(format!(
            "  {}. {}",
            row.s_no,
            emphasize(&row.project, Colors::BRIGHT_WHITE)
        ));
        lines.push(format!(
            "     Approved {} | Contract {} | Disbursed {} | Balance {}",
            format_naira(row.approved_cost, 0),
            format_naira(row.contract_sum, 0),
            format_percent(row.disbursed),
            format_percent(row.balance)
        ));
        lines.push(format!(
            "     Quality {} | Compliance {} | Completion {} | Docs {}",
            row.quality,
            row.compliance,
            colorize(&format_percent(row.completion), percent_color(row.completion)),
            row.docs
        ));
        if !row.other_obs.trim().is_empty() {
            lines.push(format!("     Observations: {}", row.other_obs));
        }
        lines.push(format!("     Recommendation: {}", row.recommendation));
    }
    lines.push(String::new());

    lines.push(heading(display::TEAM_EMOJI, "Monitoring Team"));
    if report.monitoring_team.is_empty() {
        lines.push(colorize("  No team members yet", Colors::DIM));
    }
    for (i, member) in report.monitoring_team.iter().enumerate() {
        lines.push(format!(
            "  {}. {} ({})",
            i + 1,
            or_placeholder(&member.name),
            or_placeholder(&member.designation)
        ));
    }
    lines.push(String::new());

    let approval = &report.approval;
    lines.push(heading(display::SUCCESS_EMOJI, "DM&E Approval"));
    lines.push(label_value("Status", approval.status.label()));
    lines.push(label_value("Officer", or_placeholder(&approval.officer)));
    lines.push(label_value(
        "Date",
        &approval
            .date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string()),
    ));
    lines.push(label_value("Comments", or_placeholder(&approval.comments)));
    lines.push(String::new());

    lines.push(format_summary_text(summary));
    lines.join("\n")
}

/// Summary as `key=value` lines without colors
pub fn format_summary_minimal(summary: &ReportSummary) -> String {
    [
        format!("total_projects={}", summary.total_projects),
        format!("completed={}", summary.completed),
        format!("in_progress={}", summary.in_progress),
        format!("completion_rate={:.1}", summary.completion_rate),
        format!("total_approved={:.2}", summary.total_approved),
        format!("total_contract={:.2}", summary.total_contract),
        format!("total_disbursed={:.2}", summary.total_disbursed),
        format!("balance={:.2}", summary.balance),
    ]
    .join("\n")
}

/// Report as tab separated project lines followed by the summary lines
pub fn format_report_minimal(report: &InspectionReport, summary: &ReportSummary) -> String {
    let mut lines = vec![
        format!("institution={}", report.institution.name),
        format!("location={}", report.institution.location),
        format!("code={}", report.institution.code),
    ];
    for row in export_rows(report, true) {
        lines.push(format!(
            "{}\t{}\t{:.2}\t{:.2}\t{:.1}\t{:.1}",
            row.s_no, row.project, row.approved_cost, row.contract_sum, row.disbursed, row.completion
        ));
    }
    lines.push(format_summary_minimal(summary));
    lines.join("\n")
}

/// Print the summary in the requested output format
pub fn display_summary(summary: &ReportSummary, output_format: &str) -> Result<()> {
    match output_format {
        output_formats::JSON => println!("{}", serde_json::to_string_pretty(summary)?),
        output_formats::MINIMAL => println!("{}", format_summary_minimal(summary)),
        _ => println!("{}", format_summary_text(summary)),
    }
    Ok(())
}

/// Print the report and its summary in the requested output format
pub fn display_report(
    report: &InspectionReport,
    summary: &ReportSummary,
    output_format: &str,
) -> Result<()> {
    match output_format {
        output_formats::JSON => {
            let value = json!({ "report": report, "summary": summary });
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        output_formats::MINIMAL => println!("{}", format_report_minimal(report, summary)),
        _ => println!("{}", format_report_text(report, summary)),
    }
    Ok(())
}

/// Readiness check result as text lines
pub fn format_readiness_text(readiness: &Readiness) -> String {
    if readiness.issues.is_empty() {
        return format!(
            "{} {}",
            display::SUCCESS_EMOJI,
            emphasize("Report is ready for export", Colors::BRIGHT_GREEN)
        );
    }

    let mut lines = Vec::new();
    if readiness.is_ready() {
        lines.push(format!(
            "{} {}",
            display::SUCCESS_EMOJI,
            emphasize("Report is ready for export, with warnings", Colors::BRIGHT_YELLOW)
        ));
    } else {
        lines.push(format!(
            "{} {}",
            display::ERROR_EMOJI,
            emphasize("Report is not ready for export", Colors::BRIGHT_RED)
        ));
    }
    for issue in &readiness.issues {
        let (emoji, color) = match issue.severity {
            Severity::Error => (display::ERROR_EMOJI, Colors::BRIGHT_RED),
            Severity::Warning => (display::WARNING_EMOJI, Colors::BRIGHT_YELLOW),
        };
        lines.push(format!("  {} {}", emoji, colorize(&issue.message, color)));
    }
    lines.join("\n")
}

/// Print the readiness check result in the requested output format
pub fn display_readiness(readiness: &Readiness, output_format: &str) -> Result<()> {
    match output_format {
        output_formats::JSON => println!("{}", serde_json::to_string_pretty(readiness)?),
        output_formats::MINIMAL => {
            for issue in &readiness.issues {
                let level = match issue.severity {
                    Severity::Error => "ERROR",
                    Severity::Warning => "WARNING",
                };
                println!("{level} {} {}", issue.field, issue.message);
            }
        }
        _ => println!("{}", format_readiness_text(readiness)),
    }
    Ok(())
}

/// Print a one-line confirmation unless quiet or machine readable output was asked for
pub fn display_success(message: &str, output_format: &str, quiet: bool) {
    if quiet || output_format == output_formats::JSON {
        return;
    }
    if output_format == output_formats::MINIMAL {
        println!("{message}");
    } else {
        println!(
            "{} {}",
            display::SUCCESS_EMOJI,
            colorize(message, Colors::BRIGHT_GREEN)
        );
    }
}
