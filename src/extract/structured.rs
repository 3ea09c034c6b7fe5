//! JSON extraction for API-backed sources
//!
//! Only the three addressed fields are looked at; the rest of the document can
//! change freely without breaking extraction.

use crate::extract::{ExtractError, PetLinks};
use crate::ConfigError;
use serde_json::Value;

/// Extracts pets from a JSON document addressed by JSON pointers
#[derive(Debug, Clone)]
pub struct StructuredExtractor {
    animals_pointer: String,
    id_pointer: String,
    link_pointer: String,
}

impl StructuredExtractor {
    /// Creates an extractor from RFC 6901 pointers
    ///
    /// `animals_pointer` addresses the array of animals in the document;
    /// `id_pointer` and `link_pointer` are relative to one array element.
    pub fn new(
        animals_pointer: &str,
        id_pointer: &str,
        link_pointer: &str,
    ) -> Result<Self, ConfigError> {
        for pointer in [animals_pointer, id_pointer, link_pointer] {
            if !pointer.is_empty() && !pointer.starts_with('/') {
                return Err(ConfigError::InvalidPattern(format!(
                    "JSON pointer '{}' must be empty or start with '/'",
                    pointer
                )));
            }
        }

        Ok(Self {
            animals_pointer: animals_pointer.to_string(),
            id_pointer: id_pointer.to_string(),
            link_pointer: link_pointer.to_string(),
        })
    }

    /// Parses the body and collects every animal that has an id
    ///
    /// Ids may be strings or numbers; numbers are keyed by their decimal form.
    /// An animal without a link is kept with an empty link. Only a body that
    /// is not JSON at all is an error.
    pub fn extract(&self, body: &[u8]) -> Result<PetLinks, ExtractError> {
        let document: Value = serde_json::from_slice(body)?;
        let mut pets = PetLinks::new();

        let Some(animals) = document
            .pointer(&self.animals_pointer)
            .and_then(Value::as_array)
        else {
            tracing::debug!("No animal list at '{}'", self.animals_pointer);
            return Ok(pets);
        };

        for animal in animals {
            let id = match animal.pointer(&self.id_pointer) {
                Some(Value::String(s)) if !s.is_empty() => s.clone(),
                Some(Value::Number(n)) => n.to_string(),
                _ => continue,
            };
            let link = animal
                .pointer(&self.link_pointer)
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string();
            pets.insert(id, link);
        }

        Ok(pets)
    }
}
