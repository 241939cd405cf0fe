//! tetreport
//!
//! Records TETFund project monitoring reports: the institution visited, the
//! projects inspected, the monitoring team and the DM&E approval. Summary
//! figures are recomputed from the findings on every change, and a complete
//! report can be exported as a printable HTML page, a CSV workbook or JSON.

pub mod config;
pub mod core;
pub mod drafts;
pub mod export;
pub mod model;
pub mod reporting;
pub mod summary;
pub mod ui;
pub mod validation;

// Re-export commonly used items
pub use crate::config::{CliConfig, Config};
pub use crate::core::{Result, TetReportError};
pub use crate::drafts::{Draft, DraftStore};
pub use crate::model::{CoercionPolicy, InspectionReport};
pub use crate::summary::{ReportSummary, SummaryCalculator, SummaryRule, summarize};
pub use crate::validation::{Readiness, check_readiness};
