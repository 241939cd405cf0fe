//! Export readiness checks
//!
//! This module decides whether a report carries enough information to be
//! printed as an official document.

pub mod readiness;

// Re-export commonly used items
pub use readiness::{Readiness, Severity, ValidationIssue, check_readiness};
