use chrono::{DateTime, Local};
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::core::error::Result;
use crate::model::InspectionReport;
use crate::reporting::logging;
use crate::summary::{ReportSummary, SummaryCalculator};
use crate::validation::{Readiness, check_readiness};

/// Machine readable export: the report as entered plus everything derived from it
#[derive(Debug, Clone, Serialize)]
pub struct JsonDocument<'a> {
    pub report: &'a InspectionReport,
    pub summary: ReportSummary,
    pub readiness: Readiness,
    pub generated_at: DateTime<Local>,
}

impl<'a> JsonDocument<'a> {
    pub fn new(report: &'a InspectionReport, calculator: &SummaryCalculator) -> Self {
        Self {
            report,
            summary: calculator.calculate(report),
            readiness: check_readiness(report),
            generated_at: Local::now(),
        }
    }

    pub fn with_generated_at(mut self, generated_at: DateTime<Local>) -> Self {
        self.generated_at = generated_at;
        self
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn write<P: AsRef<Path>>(&self, output_path: P) -> Result<()> {
        fs::write(output_path.as_ref(), self.to_json()?)?;
        logging::log_export("json", output_path.as_ref());
        Ok(())
    }
}
