//! CSS selector extraction
//!
//! This module parses a listing page as HTML and extracts pets from the
//! elements matched by a selector:
//! - the link comes from an attribute of the matched element (usually `href`)
//! - the id is the first match of an id regex in the element's text

use crate::extract::PetLinks;
use crate::ConfigError;
use regex::Regex;
use scraper::{Html, Selector};

/// Extracts pets from the elements matched by a CSS selector
#[derive(Debug, Clone)]
pub struct SelectorExtractor {
    selector: Selector,
    link_attr: String,
    id_regex: Regex,
}

impl SelectorExtractor {
    /// Parses the selector and compiles the id pattern
    pub fn new(selector: &str, link_attr: &str, id_pattern: &str) -> Result<Self, ConfigError> {
        let parsed = Selector::parse(selector).map_err(|e| {
            ConfigError::InvalidPattern(format!("Invalid selector '{}': {:?}", selector, e))
        })?;
        let id_regex = Regex::new(id_pattern)
            .map_err(|e| ConfigError::InvalidPattern(format!("'{}': {}", id_pattern, e)))?;

        if link_attr.is_empty() {
            return Err(ConfigError::InvalidPattern(
                "link-attr cannot be empty".to_string(),
            ));
        }

        Ok(Self {
            selector: parsed,
            link_attr: link_attr.to_string(),
            id_regex,
        })
    }

    /// Walks the matched elements; items without a link or an id are skipped
    pub fn extract(&self, body: &[u8]) -> PetLinks {
        let html = String::from_utf8_lossy(body);
        let document = Html::parse_document(&html);
        let mut pets = PetLinks::new();

        for element in document.select(&self.selector) {
            let Some(link) = element.value().attr(&self.link_attr) else {
                continue;
            };
            let text = element.text().collect::<String>();
            let Some(id) = self.id_regex.find(&text) else {
                continue;
            };
            pets.insert(id.as_str().to_string(), link.trim().to_string());
        }

        pets
    }
}
