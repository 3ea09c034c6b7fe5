//! Markdown report generation
//!
//! This module renders the presence table as a Markdown document, with an
//! overview section and a list of the pages that could not be read.

use crate::output::traits::{OutputResult, ReportRenderer};
use crate::report::Report;

/// Renders reports as Markdown
#[derive(Debug, Default, Clone, Copy)]
pub struct MarkdownRenderer;

impl ReportRenderer for MarkdownRenderer {
    fn render(&self, report: &Report) -> OutputResult<String> {
        Ok(format_markdown_report(report))
    }

    fn extension(&self) -> &'static str {
        "md"
    }
}

/// Formats a report as Markdown
pub fn format_markdown_report(report: &Report) -> String {
    let mut md = String::new();

    md.push_str("# Pet Listing Cross-Reference\n\n");
    md.push_str(&format!("- **Generated**: {}\n", report.generated));
    md.push_str(&format!("- **Sites**: {}\n", report.sites.len()));
    md.push_str(&format!("- **Pets**: {}\n", report.pets.len()));
    md.push_str(&format!(
        "- **Missing from at least one site**: {}\n\n",
        report.incomplete_count()
    ));

    md.push_str("## Listings\n\n");
    if report.pets.is_empty() {
        md.push_str("No pets were found.\n\n");
    } else {
        md.push_str("| Pet ID |");
        for site in &report.sites {
            md.push_str(&format!(" [{}]({}) |", escape_cell(&site.label), site.base));
        }
        md.push_str(" Sites |\n");

        md.push_str("|--------|");
        for _ in &report.sites {
            md.push_str("------|");
        }
        md.push_str("-------|\n");

        for pet in &report.pets {
            md.push_str(&format!("| {} |", escape_cell(&pet.id)));
            for link in &pet.links {
                if link.is_empty() {
                    md.push_str("  |");
                } else {
                    md.push_str(&format!(" [link]({}) |", link.replace(' ', "%20")));
                }
            }
            md.push_str(&format!(" {} |\n", pet.presence_count));
        }
        md.push('\n');
    }

    if !report.failures.is_empty() {
        md.push_str("## Failed Sources\n\n");
        for failure in &report.failures {
            md.push_str(&format!(
                "- `{}`: {}\n",
                failure.url,
                failure.error.replace('\n', " ")
            ));
        }
        md.push('\n');
    }

    md
}

/// Escapes characters that would break a table cell
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace('\n', " ")
}
