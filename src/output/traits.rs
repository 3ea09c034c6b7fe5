//! Output renderer trait and errors
//!
//! This module defines the interface every report format implements.

use crate::report::Report;
use thiserror::Error;

/// Errors that can occur during output operations
#[derive(Debug, Error)]
pub enum OutputError {
    #[error("Failed to serialize report: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for output operations
pub type OutputResult<T> = Result<T, OutputError>;

/// Trait for report renderers
///
/// A renderer turns a finished [`Report`] into a display document. It must
/// not reorder rows or columns; the report order is the presentation order.
pub trait ReportRenderer {
    /// Renders the whole report as a document
    fn render(&self, report: &Report) -> OutputResult<String>;

    /// Conventional file extension for the rendered document
    fn extension(&self) -> &'static str;
}
