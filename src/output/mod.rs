//! Rendering of scan results for terminals and machine consumers.

mod json;
mod terminal;

pub use json::{to_json, to_json_pretty};
pub use terminal::{format_outcome, format_report, format_unavailable};
