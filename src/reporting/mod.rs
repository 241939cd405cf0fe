//! Structured logging
//!
//! Log helpers shared by the draft store, the editing commands and the
//! exporters.

pub mod logging;
