//! Output module for rendering and writing reports
//!
//! This module handles:
//! - Rendering a finished report as HTML, Markdown or JSON
//! - Writing the rendered document to a file or stdout

mod html;
mod markdown;
mod traits;

pub use html::{format_html_report, HtmlRenderer};
pub use markdown::{format_markdown_report, MarkdownRenderer};
pub use traits::{OutputError, OutputResult, ReportRenderer};

use crate::config::OutputFormat;
use crate::report::Report;
use std::io::Write;
use std::path::Path;

/// Renders reports as pretty-printed JSON
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonRenderer;

impl ReportRenderer for JsonRenderer {
    fn render(&self, report: &Report) -> OutputResult<String> {
        let mut json = serde_json::to_string_pretty(report)?;
        json.push('\n');
        Ok(json)
    }

    fn extension(&self) -> &'static str {
        "json"
    }
}

/// Returns the renderer for an output format
pub fn renderer_for(format: OutputFormat) -> Box<dyn ReportRenderer> {
    match format {
        OutputFormat::Html => Box::new(HtmlRenderer),
        OutputFormat::Markdown => Box::new(MarkdownRenderer),
        OutputFormat::Json => Box::new(JsonRenderer),
    }
}

/// File stem used when the output path names a directory
pub const REPORT_FILE_STEM: &str = "pets";

/// Renders a report and writes it to `path`, or to stdout when `None`
///
/// When `path` is an existing directory the report is written to
/// `pets.<ext>` inside it, with the renderer's extension.
///
/// # Returns
///
/// * `Ok(())` - Report written
/// * `Err(OutputError)` - Rendering or writing failed
pub fn write_report(report: &Report, format: OutputFormat, path: Option<&Path>) -> OutputResult<()> {
    let renderer = renderer_for(format);
    let document = renderer.render(report)?;

    match path {
        Some(path) => {
            let target = if path.is_dir() {
                path.join(format!("{}.{}", REPORT_FILE_STEM, renderer.extension()))
            } else {
                path.to_path_buf()
            };
            std::fs::write(&target, document.as_bytes())?;
            tracing::info!("Report written to {}", target.display());
        }
        None => {
            let stdout = std::io::stdout();
            let mut handle = stdout.lock();
            handle.write_all(document.as_bytes())?;
            handle.flush()?;
        }
    }

    Ok(())
}
