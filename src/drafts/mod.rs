//! Draft persistence
//!
//! The report being edited is autosaved as JSON after every change so a
//! session can be picked up again later.

pub mod store;

pub use store::{Draft, DraftStore};
