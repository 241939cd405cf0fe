//! Report export
//!
//! Turns a report and its computed summary into files: a printable HTML
//! document, a CSV workbook, or a JSON document. Shared row assembly and
//! number formatting live here.

pub mod html;
pub mod json;
pub mod workbook;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::core::constants::report_text;
use crate::model::InspectionReport;

// Re-export commonly used items
pub use html::{Orientation, PrintableReport, ReportDocument};
pub use json::JsonDocument;
pub use workbook::write_workbook;

/// One fully resolved row of the findings table, blanks as zero
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    pub s_no: usize,
    pub project: String,
    pub approved_cost: f64,
    pub contract_sum: f64,
    pub disbursed: f64,
    pub balance: f64,
    pub quality: String,
    pub compliance: String,
    pub other_obs: String,
    pub completion: f64,
    pub docs: String,
    pub recommendation: String,
}

/// Rows of the findings table in order.
///
/// With `with_bank_charges` and charges included on the report, a closing
/// "Bank and Administrative Charges" row is appended.
pub fn export_rows(report: &InspectionReport, with_bank_charges: bool) -> Vec<ExportRow> {
    let mut rows: Vec<ExportRow> = report
        .projects
        .iter()
        .enumerate()
        .map(|(i, p)| ExportRow {
            s_no: i + 1,
            project: p.project.clone(),
            approved_cost: p.approved_cost.unwrap_or(0.0),
            contract_sum: p.contract_sum.unwrap_or(0.0),
            disbursed: p.disbursed.unwrap_or(0.0),
            balance: p.balance_percent(),
            quality: p.quality.to_string(),
            compliance: p.compliance.to_string(),
            other_obs: p.other_obs.clone(),
            completion: p.completion.unwrap_or(0.0),
            docs: p.docs.to_string(),
            recommendation: p.recommendation.clone(),
        })
        .collect();

    if with_bank_charges && report.bank_charges.included {
        let amount = report.bank_charges.amount;
        rows.push(ExportRow {
            s_no: rows.len() + 1,
            project: report_text::BANK_CHARGES_PROJECT.to_string(),
            approved_cost: amount,
            contract_sum: amount,
            disbursed: 100.0,
            balance: 0.0,
            quality: report_text::NOT_APPLICABLE.to_string(),
            compliance: report_text::NOT_APPLICABLE.to_string(),
            other_obs: report_text::BANK_CHARGES_OBSERVATION.to_string(),
            completion: 100.0,
            docs: "Submitted".to_string(),
            recommendation: report_text::BANK_CHARGES_RECOMMENDATION.to_string(),
        });
    }

    rows
}

/// Format `value` with `decimals` places and comma thousands separators
pub fn group_thousands(value: f64, decimals: usize) -> String {
    let formatted = format!("{:.*}", decimals, value.abs());
    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (formatted.as_str(), None),
    };

    let mut grouped = String::with_capacity(formatted.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if let Some(frac_part) = frac_part {
        grouped.push('.');
        grouped.push_str(frac_part);
    }

    let is_zero = !formatted.chars().any(|c| c.is_ascii_digit() && c != '0');
    if value < 0.0 && !is_zero {
        format!("-{grouped}")
    } else {
        grouped
    }
}

/// Naira amount, e.g. `₦1,250,000`
pub fn format_naira(value: f64, decimals: usize) -> String {
    let grouped = group_thousands(value, decimals);
    match grouped.strip_prefix('-') {
        Some(positive) => format!("-{}{positive}", report_text::CURRENCY_SYMBOL),
        None => format!("{}{grouped}", report_text::CURRENCY_SYMBOL),
    }
}

/// Percentage with one decimal place, e.g. `42.5%`
pub fn format_percent(value: f64) -> String {
    format!("{value:.1}%")
}

/// Escape text for inclusion in HTML element content or attributes
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

fn file_stem(institution_name: Option<&str>, now: &DateTime<Local>) -> String {
    let timestamp = now.format("%Y%m%d_%H%M%S");
    match institution_name.map(str::trim).filter(|n| !n.is_empty()) {
        Some(name) => {
            let name: String = name
                .split_whitespace()
                .collect::<Vec<_>>()
                .join("_")
                .replace(['/', '\\'], "_");
            format!("{}_{name}_{timestamp}", report_text::FILE_PREFIX)
        }
        None => format!("{}_{timestamp}", report_text::FILE_PREFIX),
    }
}

/// Default name of the printable report file
pub fn default_html_filename(report: &InspectionReport, now: &DateTime<Local>) -> String {
    format!("{}.html", file_stem(Some(&report.institution.name), now))
}

/// Default name of the CSV workbook directory
pub fn default_workbook_dirname(now: &DateTime<Local>) -> String {
    file_stem(None, now)
}

/// Default name of the JSON export file
pub fn default_json_filename(now: &DateTime<Local>) -> String {
    format!("{}.json", file_stem(None, now))
}
