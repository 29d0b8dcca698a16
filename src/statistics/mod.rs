//! Statistical comparison of timing series.
//!
//! The decision rule is intentionally small: a median per series and a fixed
//! relative margin between them. Per-frame noise is absorbed by repetition,
//! not filtered.

mod median;

pub use median::{is_elevated, is_elevated_by, median_of};
