//! Source descriptors and per-source results

use crate::config::Config;
use crate::extract::{Extractor, PetLinks};
use crate::{ConfigError, FetchError};
use std::sync::Arc;

/// One fetchable page: where to get it and how to read pets out of it
#[derive(Debug, Clone)]
pub struct SourceDescriptor {
    /// Position in the configured source list; later pages of a site win ties
    pub index: usize,

    /// Base address of the site, e.g. "https://www.seaaca.org"
    pub site: String,

    /// Path appended to `site`, including any query string
    pub page: String,

    /// Extra request headers
    pub headers: Vec<(String, String)>,

    pub extractor: Extractor,
}

impl SourceDescriptor {
    pub fn new(
        index: usize,
        site: impl Into<String>,
        page: impl Into<String>,
        headers: Vec<(String, String)>,
        extractor: Extractor,
    ) -> Self {
        Self {
            index,
            site: site.into(),
            page: page.into(),
            headers,
            extractor,
        }
    }

    /// Complete URL of the page
    pub fn url(&self) -> String {
        format!("{}{}", self.site, self.page)
    }

    /// Display label of the site this page belongs to
    pub fn label(&self) -> String {
        site_label(&self.site)
    }

    /// Expands every configured site into one descriptor per page
    pub fn from_config(config: &Config) -> Result<Vec<Self>, ConfigError> {
        let mut sources = Vec::new();

        for entry in &config.sources {
            let extractor = Extractor::from_config(&entry.extractor)?;
            let headers: Vec<(String, String)> = entry
                .headers
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect();

            for page in &entry.pages {
                sources.push(Self::new(
                    sources.len(),
                    entry.site.clone(),
                    page.clone(),
                    headers.clone(),
                    extractor.clone(),
                ));
            }
        }

        Ok(sources)
    }
}

/// Shortens a site base address to its display label
///
/// The scheme and any trailing slash are dropped, so
/// "https://www.seaaca.org/" becomes "www.seaaca.org".
pub fn site_label(site: &str) -> String {
    let rest = site.split_once("://").map(|(_, rest)| rest).unwrap_or(site);
    rest.trim_end_matches('/').to_string()
}

/// Outcome of fetching one source page
#[derive(Debug)]
pub struct SourceResult {
    pub source: Arc<SourceDescriptor>,
    pub outcome: Result<PetLinks, FetchError>,
}

impl SourceResult {
    pub fn new(source: Arc<SourceDescriptor>, outcome: Result<PetLinks, FetchError>) -> Self {
        Self { source, outcome }
    }

    /// Pets found on the page; a failed page contributes none
    pub fn pets(&self) -> Option<&PetLinks> {
        self.outcome.as_ref().ok()
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}
