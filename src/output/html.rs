//! HTML report page
//!
//! One table, one row per pet and one column per site. Rows carry a
//! `presence-<count>` class so the stylesheet can shade pets by coverage.

use crate::output::traits::{OutputResult, ReportRenderer};
use crate::report::Report;
use html_escape::{encode_double_quoted_attribute, encode_text};

const STYLE: &str = r#"
body { font-family: sans-serif; margin: 2em; }
table { border-collapse: collapse; }
th, td { border: 1px solid #ccc; padding: 0.25em 0.75em; text-align: center; }
td.id { font-family: monospace; text-align: left; }
td.missing { background: #f6d5d5; }
tr.presence-1 td.id { font-weight: bold; }
footer { margin-top: 2em; color: #666; font-size: smaller; }
"#;

/// Renders reports as a standalone HTML page
#[derive(Debug, Default, Clone, Copy)]
pub struct HtmlRenderer;

impl ReportRenderer for HtmlRenderer {
    fn render(&self, report: &Report) -> OutputResult<String> {
        Ok(format_html_report(report))
    }

    fn extension(&self) -> &'static str {
        "html"
    }
}

/// Formats a report as an HTML document
pub fn format_html_report(report: &Report) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n");
    html.push_str("<title>Pet Listing Cross-Reference</title>\n");
    html.push_str(&format!("<style>{}</style>\n", STYLE));
    html.push_str("</head>\n<body>\n");
    html.push_str("<h1>Pet Listing Cross-Reference</h1>\n");
    html.push_str(&format!(
        "<p>{} pets across {} sites, {} missing from at least one site.</p>\n",
        report.pets.len(),
        report.sites.len(),
        report.incomplete_count()
    ));

    html.push_str("<table>\n<thead>\n<tr><th>Pet ID</th>");
    for site in &report.sites {
        html.push_str(&format!(
            "<th><a href=\"{}\" target=\"_blank\">{}</a></th>",
            encode_double_quoted_attribute(&site.base),
            encode_text(&site.label)
        ));
    }
    html.push_str("<th>Sites</th></tr>\n</thead>\n<tbody>\n");

    for pet in &report.pets {
        html.push_str(&format!(
            "<tr class=\"presence-{}\"><td class=\"id\">{}</td>",
            pet.presence_count,
            encode_text(&pet.id)
        ));
        for link in &pet.links {
            if link.is_empty() {
                html.push_str("<td class=\"missing\"></td>");
            } else {
                html.push_str(&format!(
                    "<td><a href=\"{}\" target=\"_blank\">&#10003;</a></td>",
                    encode_double_quoted_attribute(link)
                ));
            }
        }
        html.push_str(&format!("<td>{}</td></tr>\n", pet.presence_count));
    }
    html.push_str("</tbody>\n</table>\n");

    if !report.failures.is_empty() {
        html.push_str("<h2>Failed sources</h2>\n<ul>\n");
        for failure in &report.failures {
            html.push_str(&format!(
                "<li><code>{}</code>: {}</li>\n",
                encode_text(&failure.url),
                encode_text(&failure.error)
            ));
        }
        html.push_str("</ul>\n");
    }

    html.push_str(&format!(
        "<footer>Generated {}</footer>\n</body>\n</html>\n",
        encode_text(&report.generated)
    ));

    html
}
