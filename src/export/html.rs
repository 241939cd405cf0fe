use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use chrono::{DateTime, Local};
use std::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use crate::core::constants::{orientations, report_text};
use crate::core::error::{Result, TetReportError};
use crate::export::{ExportRow, escape_html, export_rows, format_naira, format_percent};
use crate::model::InspectionReport;
use crate::reporting::logging;
use crate::summary::{ReportSummary, SummaryCalculator};
use crate::validation::check_readiness;

/// Date format used on the printed report, e.g. `09-Jul-2025`
const PRINT_DATE_FORMAT: &str = "%d-%b-%Y";

/// Printed page orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Landscape,
    Portrait,
}

impl Orientation {
    /// Value of the CSS `@page size` property
    pub fn page_size(&self) -> &'static str {
        match self {
            Orientation::Landscape => "A4 landscape",
            Orientation::Portrait => "A4",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Orientation::Landscape => f.write_str(orientations::LANDSCAPE),
            Orientation::Portrait => f.write_str(orientations::PORTRAIT),
        }
    }
}

impl FromStr for Orientation {
    type Err = TetReportError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            orientations::LANDSCAPE => Ok(Orientation::Landscape),
            orientations::PORTRAIT => Ok(Orientation::Portrait),
            _ => Err(TetReportError::InvalidArgument(format!(
                "Invalid orientation '{s}'. Expected one of: {}",
                orientations::ALL.join(", ")
            ))),
        }
    }
}

/// Everything the printable report shows
#[derive(Debug, Clone)]
pub struct ReportDocument<'a> {
    pub report: &'a InspectionReport,
    pub summary: ReportSummary,
    pub orientation: Orientation,
    /// Base64 encoded PNG logo
    pub logo_base64: Option<String>,
    pub generated_at: DateTime<Local>,
}

impl<'a> ReportDocument<'a> {
    pub fn new(
        report: &'a InspectionReport,
        calculator: &SummaryCalculator,
        orientation: Orientation,
    ) -> Self {
        Self {
            report,
            summary: calculator.calculate(report),
            orientation,
            logo_base64: None,
            generated_at: Local::now(),
        }
    }

    pub fn with_logo(mut self, logo_base64: Option<String>) -> Self {
        self.logo_base64 = logo_base64;
        self
    }

    pub fn with_generated_at(mut self, generated_at: DateTime<Local>) -> Self {
        self.generated_at = generated_at;
        self
    }
}

/// Read a logo image and encode it for a `data:` URI
pub fn load_logo<P: AsRef<Path>>(path: P) -> Result<String> {
    let bytes = fs::read(path.as_ref())?;
    Ok(STANDARD.encode(bytes))
}

/// Like [`load_logo`], but a missing or unreadable logo only logs a warning
pub fn load_logo_or_warn(path: Option<&str>) -> Option<String> {
    let path = path?;
    match load_logo(path) {
        Ok(encoded) => Some(encoded),
        Err(e) => {
            logging::log_warning(&format!(
                "Could not load logo '{path}', using the text heading instead: {e}"
            ));
            None
        }
    }
}

/// Printable HTML report generator
pub struct PrintableReport;

impl PrintableReport {
    /// Render and write the report to `output_path`.
    ///
    /// Fails with [`TetReportError::Validation`] when the report is missing
    /// the institution name, location or projects.
    pub fn write<P: AsRef<Path>>(doc: &ReportDocument<'_>, output_path: P) -> Result<()> {
        let readiness = check_readiness(doc.report);
        if !readiness.is_ready() {
            return Err(TetReportError::Validation(readiness.error_messages()));
        }

        let html = Self::render(doc);
        fs::write(output_path.as_ref(), html)?;
        logging::log_export("html", output_path.as_ref());
        Ok(())
    }

    /// Generate the complete HTML document
    pub fn render(doc: &ReportDocument<'_>) -> String {
        format!(
            r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>TETFUND Monitoring Report</title>
    <style>{}</style>
</head>
<body>
    {}
    {}
    {}
    {}
    {}
    {}
    {}
</body>
</html>"#,
            Self::generate_css(doc.orientation),
            Self::generate_heading(doc.logo_base64.as_deref()),
            Self::generate_institution_section(doc.report),
            Self::generate_projects_section(doc.report),
            Self::generate_summary_section(&doc.summary),
            Self::generate_team_section(doc.report),
            Self::generate_approval_section(doc.report, &doc.generated_at),
            Self::generate_footer(&doc.generated_at),
        )
    }

    fn generate_css(orientation: Orientation) -> String {
        format!(
            r#"
        @page {{
            size: {};
            margin: 2cm;
        }}
        body {{
            font-family: Arial, Helvetica, sans-serif;
            font-size: 10pt;
            line-height: 1.4;
            color: #333;
        }}
        h1 {{ color: #1E3A8A; font-size: 24pt; text-align: center; margin: 10px 0; }}
        h2 {{ color: #1E3A8A; font-size: 16pt; text-align: center; margin: 5px 0; }}
        h3 {{ color: #1E3A8A; font-size: 14pt; text-align: center; margin: 15px 0 10px 0; }}
        table {{
            width: 100%;
            border-collapse: collapse;
            margin: 15px 0;
            font-size: 9pt;
        }}
        th {{
            background-color: #1E3A8A;
            color: white;
            padding: 8px 4px;
            font-weight: bold;
            text-align: center;
            border: 1px solid #1E3A8A;
        }}
        td {{ border: 1px solid #999; padding: 6px 4px; vertical-align: top; }}
        .info-box {{
            background-color: #f5f5f5;
            padding: 10px;
            margin: 15px 0;
            border: 1px solid #ddd;
            border-radius: 3px;
        }}
        .logo {{ text-align: center; }}
        .logo img {{ height: 80px; width: auto; }}
        .signature {{ margin-top: 30px; padding-top: 10px; }}
        .footer {{
            text-align: center;
            font-size: 8pt;
            color: #666;
            margin-top: 30px;
            padding-top: 10px;
            border-top: 1px solid #ccc;
        }}
        .text-center {{ text-align: center; }}
        .text-right {{ text-align: right; }}
        "#,
            orientation.page_size()
        )
    }

    fn generate_heading(logo_base64: Option<&str>) -> String {
        let logo = match logo_base64 {
            Some(encoded) => format!(
                r#"<div class="logo"><img src="data:image/png;base64,{encoded}" alt="TETFund logo"></div>"#
            ),
            None => String::new(),
        };
        format!(
            r#"{logo}
    <h1>{}</h1>
    <h2>{}</h2>
    <h3>{}</h3>"#,
            report_text::FUND_NAME,
            escape_html(report_text::DEPARTMENT),
            report_text::REPORT_TITLE
        )
    }

    fn generate_institution_section(report: &InspectionReport) -> String {
        let institution = &report.institution;
        format!(
            r#"<div class="info-box">
        <strong>Institution:</strong> {} |
        <strong>Location:</strong> {} |
        <strong>Code:</strong> {} |
        <strong>Inspection Date:</strong> {} |
        <strong>Intervention Year:</strong> {}
    </div>"#,
            escape_html(&institution.name),
            escape_html(&institution.location),
            escape_html(&institution.code),
            institution.inspection_date.format(PRINT_DATE_FORMAT),
            escape_html(&institution.intervention_year)
        )
    }

    fn generate_project_row(row: &ExportRow) -> String {
        format!(
            r#"
            <tr>
                <td class="text-center">{}</td>
                <td>{}</td>
                <td class="text-right">{}</td>
                <td class="text-right">{}</td>
                <td class="text-center">{}</td>
                <td class="text-center">{}</td>
                <td class="text-center">{}</td>
                <td class="text-center">{}</td>
                <td>{}</td>
                <td class="text-center">{}</td>
                <td class="text-center">{}</td>
                <td>{}</td>
            </tr>"#,
            row.s_no,
            escape_html(&row.project),
            format_naira(row.approved_cost, 0),
            format_naira(row.contract_sum, 0),
            format_percent(row.disbursed),
            format_percent(row.balance),
            escape_html(&row.quality),
            escape_html(&row.compliance),
            escape_html(&row.other_obs),
            format_percent(row.completion),
            escape_html(&row.docs),
            escape_html(&row.recommendation),
        )
    }

    fn generate_projects_section(report: &InspectionReport) -> String {
        let rows: String = export_rows(report, true)
            .iter()
            .map(Self::generate_project_row)
            .collect();

        format!(
            r#"<h3>Projects Monitoring Details</h3>
    <table>
        <thead>
            <tr>
                <th style="width: 3%;">S/N</th>
                <th style="width: 12%;">Project</th>
                <th style="width: 8%;">Approved (₦)</th>
                <th style="width: 8%;">Contract (₦)</th>
                <th style="width: 4%;">%Disb</th>
                <th style="width: 4%;">%Bal</th>
                <th style="width: 6%;">Quality</th>
                <th style="width: 6%;">Compl</th>
                <th style="width: 15%;">Observations</th>
                <th style="width: 4%;">%Comp</th>
                <th style="width: 6%;">Docs</th>
                <th style="width: 14%;">Recommendation</th>
            </tr>
        </thead>
        <tbody>{rows}
        </tbody>
    </table>"#
        )
    }

    fn generate_summary_section(summary: &ReportSummary) -> String {
        format!(
            r#"<div class="info-box">
        <strong>Total Projects:</strong> {} |
        <strong>Completed:</strong> {} |
        <strong>In Progress:</strong> {} |
        <strong>Completion Rate:</strong> {}<br>
        <strong>Total Approved:</strong> {} |
        <strong>Total Contract:</strong> {} |
        <strong>Total Disbursed:</strong> {} |
        <strong>Balance:</strong> {}
    </div>"#,
            summary.total_projects,
            summary.completed,
            summary.in_progress,
            format_percent(summary.completion_rate),
            format_naira(summary.total_approved, 2),
            format_naira(summary.total_contract, 2),
            format_naira(summary.total_disbursed, 2),
            format_naira(summary.balance, 2),
        )
    }

    fn generate_team_section(report: &InspectionReport) -> String {
        let rows: String = report
            .monitoring_team
            .iter()
            .enumerate()
            .map(|(i, member)| {
                format!(
                    r#"
            <tr>
                <td class="text-center">{}</td>
                <td>{}</td>
                <td>{}</td>
                <td class="text-center">________________</td>
            </tr>"#,
                    i + 1,
                    escape_html(&member.name),
                    escape_html(&member.designation)
                )
            })
            .collect();

        format!(
            r#"<h3>Monitoring Team</h3>
    <table>
        <thead>
            <tr>
                <th style="width: 10%;">S/N</th>
                <th style="width: 40%;">Name</th>
                <th style="width: 30%;">Designation</th>
                <th style="width: 20%;">Signature</th>
            </tr>
        </thead>
        <tbody>{rows}
        </tbody>
    </table>"#
        )
    }

    fn generate_approval_section(report: &InspectionReport, generated_at: &DateTime<Local>) -> String {
        let approval = &report.approval;
        let date = approval
            .date
            .unwrap_or_else(|| generated_at.date_naive())
            .format(PRINT_DATE_FORMAT);
        let comments = if approval.comments.trim().is_empty() {
            report_text::NO_COMMENTS.to_string()
        } else {
            escape_html(&approval.comments)
        };

        format!(
            r#"<h3>DM&amp;E Approval</h3>
    <div class="info-box">
        <strong>Status:</strong> {} |
        <strong>Officer:</strong> {} |
        <strong>Date:</strong> {}<br>
        <strong>Comments:</strong> {}
    </div>
    <div class="signature">
        <strong>DM&amp;E Officer Signature:</strong><br>
        _________________________________________
    </div>"#,
            approval.status,
            escape_html(&approval.officer),
            date,
            comments
        )
    }

    fn generate_footer(generated_at: &DateTime<Local>) -> String {
        format!(
            r#"<div class="footer">
        Generated on {}
    </div>"#,
            generated_at.format("%Y-%m-%d %H:%M:%S")
        )
    }
}
