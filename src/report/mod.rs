//! Report types and the merge/rank engine
//!
//! A [`Report`] is the only thing the output layer sees: one column per site,
//! one row per pet, rows ordered so the least-listed pets come first.

mod merge;

pub use merge::{merge_results, qualify_link};

use serde::Serialize;

/// Layout of the generation timestamp, e.g. "Mon 2024/01/15 09:30:00"
pub const GENERATED_FORMAT: &str = "%a %Y/%m/%d %H:%M:%S";

/// A report column: one rescue site
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Site {
    /// Display label, the base address without its scheme
    pub label: String,

    /// Base address the label was derived from
    pub base: String,
}

/// A report row: one pet and where it is listed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PresenceEntry {
    pub id: String,

    /// One link per site, aligned with `Report::sites`; empty when absent
    pub links: Vec<String>,

    /// Number of non-empty links
    pub presence_count: usize,
}

impl PresenceEntry {
    /// Builds an entry and counts the sites it is listed on
    pub fn new(id: impl Into<String>, links: Vec<String>) -> Self {
        let presence_count = links.iter().filter(|l| !l.is_empty()).count();
        Self {
            id: id.into(),
            links,
            presence_count,
        }
    }

    /// Returns true if the pet is listed on every site
    pub fn is_complete(&self) -> bool {
        self.presence_count == self.links.len()
    }
}

/// A source page that contributed nothing because it failed
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SourceFailure {
    pub url: String,
    pub error: String,
}

/// Merged, ranked presence table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Local generation time, formatted with [`GENERATED_FORMAT`]
    pub generated: String,

    /// Distinct sites, sorted by label
    pub sites: Vec<Site>,

    /// Pets sorted by presence count, then id
    pub pets: Vec<PresenceEntry>,

    /// Source pages that failed, in configured order
    pub failures: Vec<SourceFailure>,
}

impl Report {
    pub fn site_labels(&self) -> Vec<&str> {
        self.sites.iter().map(|s| s.label.as_str()).collect()
    }

    /// Looks up a pet's row by id
    pub fn entry(&self, id: &str) -> Option<&PresenceEntry> {
        self.pets.iter().find(|p| p.id == id)
    }

    /// Number of pets missing from at least one site
    pub fn incomplete_count(&self) -> usize {
        self.pets.iter().filter(|p| !p.is_complete()).count()
    }
}
