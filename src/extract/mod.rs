//! Pet id extraction strategies
//!
//! Every source page carries an [`Extractor`] that turns the raw response body
//! into a pet id → link mapping. Extraction is pure: no I/O, and a page with
//! no recognizable pets yields an empty mapping rather than an error.
//!
//! - `Pattern`: regex with a link capture and an id capture, for HTML pages
//! - `Structured`: JSON document addressed with JSON pointers, for API sources
//! - `Selector`: CSS selector over parsed HTML

mod pattern;
mod selector;
mod structured;

pub use pattern::PatternExtractor;
pub use selector::SelectorExtractor;
pub use structured::StructuredExtractor;

use crate::config::ExtractorConfig;
use crate::ConfigError;
use std::collections::HashMap;
use thiserror::Error;

/// Pet id → detail link (absolute or relative to the site base)
pub type PetLinks = HashMap<String, String>;

/// Errors that can occur while extracting pets from a body
#[derive(Debug, Error)]
pub enum ExtractError {
    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Extraction strategy, chosen when the source descriptor is built
#[derive(Debug, Clone)]
pub enum Extractor {
    Pattern(PatternExtractor),
    Structured(StructuredExtractor),
    Selector(SelectorExtractor),
}

impl Extractor {
    /// Builds the extractor described by a configuration entry
    ///
    /// Patterns, selectors and pointers are checked here so that a bad
    /// configuration is rejected before anything is fetched.
    pub fn from_config(config: &ExtractorConfig) -> Result<Self, ConfigError> {
        Ok(match config {
            ExtractorConfig::Pattern { pattern } => Self::Pattern(PatternExtractor::new(pattern)?),
            ExtractorConfig::Structured {
                animals_pointer,
                id_pointer,
                link_pointer,
            } => Self::Structured(StructuredExtractor::new(
                animals_pointer,
                id_pointer,
                link_pointer,
            )?),
            ExtractorConfig::Selector {
                selector,
                link_attr,
                id_pattern,
            } => Self::Selector(SelectorExtractor::new(selector, link_attr, id_pattern)?),
        })
    }

    /// Extracts the pet id → link mapping from a decoded response body
    pub fn extract(&self, body: &[u8]) -> Result<PetLinks, ExtractError> {
        match self {
            Self::Pattern(p) => Ok(p.extract(body)),
            Self::Structured(s) => s.extract(body),
            Self::Selector(s) => Ok(s.extract(body)),
        }
    }

    /// Short name of the strategy, for logging
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Pattern(_) => "pattern",
            Self::Structured(_) => "structured",
            Self::Selector(_) => "selector",
        }
    }
}
