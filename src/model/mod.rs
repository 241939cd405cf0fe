//! Report data model
//!
//! The inspection report as entered on the form, plus the numeric input
//! handling that guards every numeric finding field.

pub mod input;
pub mod report;

// Re-export commonly used items
pub use input::{CoercionPolicy, NumericKind, parse_numeric};
pub use report::{
    Approval, ApprovalStatus, BankCharges, Compliance, DocsStatus, InspectionReport, Institution,
    ProjectField, ProjectFinding, Quality, TeamMember,
};
