//! Errors raised by the optional fail-fast checks.
//!
//! `spec::build` is permissive and never returns these; only `spec::build_checked`
//! and the explicit `validate` helpers do.

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum SpecError {
    #[error("expected 3 status colours (for statuses -1, 0, 1), found {found}")]
    StatusColourCount { found: usize },

    #[error("no tooltip columns configured")]
    EmptyColumns,

    #[error("row {row} is missing field '{field}'")]
    MissingField { row: usize, field: String },

    #[error("row {row} has status {value}, expected -1, 0 or 1")]
    InvalidStatus { row: usize, value: String },

    #[error("canvas must be positive and finite, got {width}x{height}")]
    InvalidCanvas { width: f64, height: f64 },
}
