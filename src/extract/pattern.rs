//! Regex-based pet id extraction
//!
//! The pattern runs over the raw body bytes, so pages that are not valid
//! UTF-8 still match wherever the markup is.

use crate::extract::PetLinks;
use crate::ConfigError;
use regex::bytes::Regex;

/// Extracts (link, id) pairs from every match of a capture-group regex
#[derive(Debug, Clone)]
pub struct PatternExtractor {
    regex: Regex,
    link_group: usize,
    id_group: usize,
}

impl PatternExtractor {
    /// Compiles the pattern and resolves which groups hold the link and id
    ///
    /// Named groups `link` and `id` are used when both exist; otherwise group 1
    /// is the link and group 2 the id.
    pub fn new(pattern: &str) -> Result<Self, ConfigError> {
        let regex = Regex::new(pattern)
            .map_err(|e| ConfigError::InvalidPattern(format!("'{}': {}", pattern, e)))?;

        let named = |name: &str| regex.capture_names().position(|n| n == Some(name));

        let (link_group, id_group) = match (named("link"), named("id")) {
            (Some(link), Some(id)) => (link, id),
            _ if regex.captures_len() >= 3 => (1, 2),
            _ => {
                return Err(ConfigError::InvalidPattern(format!(
                    "'{}' needs a link capture and an id capture",
                    pattern
                )))
            }
        };

        Ok(Self {
            regex,
            link_group,
            id_group,
        })
    }

    /// Applies the pattern; a repeated id keeps its last match
    pub fn extract(&self, body: &[u8]) -> PetLinks {
        let mut pets = PetLinks::new();

        for caps in self.regex.captures_iter(body) {
            let (Some(link), Some(id)) = (caps.get(self.link_group), caps.get(self.id_group))
            else {
                continue;
            };
            pets.insert(
                String::from_utf8_lossy(id.as_bytes()).into_owned(),
                String::from_utf8_lossy(link.as_bytes()).into_owned(),
            );
        }

        pets
    }
}
