//! Output formatting for resolved subscriptions.
//!
//! - [`json`] - JSON for the select-list endpoint and the default CLI mode
//! - [`terminal`] - aligned, colored table for operators

mod json;
mod terminal;

pub use json::options_json;
pub use terminal::{format_field, write_subscription_table};
