//! Summary calculation
//!
//! Derived figures are never stored on the report; they are recomputed
//! from the current findings every time they are needed.

pub mod calculator;

// Re-export commonly used items
pub use calculator::{
    DisbursementBasis, FieldSummary, ReportSummary, SummaryCalculator, SummaryRule, summarize,
};
