//! pet-crossref: cross-references pet adoption listings across rescue sites
//!
//! This crate fetches listing pages from several rescue organization websites,
//! extracts a pet id → detail link mapping from each one, and merges them into
//! a ranked presence table that surfaces pets missing from some of the sites.

pub mod config;
pub mod crawler;
pub mod extract;
pub mod output;
pub mod report;

use thiserror::Error;

/// Main error type for pet-crossref operations
#[derive(Debug, Error)]
pub enum CrossrefError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Output error: {0}")]
    Output(#[from] output::OutputError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),

    #[error("Invalid extractor pattern: {0}")]
    InvalidPattern(String),
}

/// Errors raised while fetching and extracting a single source page
///
/// Every variant is fatal to its own source only; the coordinator logs it and
/// treats the source as contributing no pets.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Cannot build request for {url}: {message}")]
    Request { url: String, message: String },

    #[error("Network error for {url}: {source}")]
    Network { url: String, source: reqwest::Error },

    #[error("Request timeout for {url}")]
    Timeout { url: String },

    #[error("Unexpected HTTP status {status} for {url}")]
    Status { url: String, status: u16 },

    #[error("Failed to decode body of {url}: {source}")]
    Decode { url: String, source: std::io::Error },

    #[error("Extraction failed for {url}: {source}")]
    Extraction {
        url: String,
        source: extract::ExtractError,
    },

    #[error("Fetch task for {url} did not complete: {message}")]
    Task { url: String, message: String },
}

/// Result type alias for pet-crossref operations
pub type Result<T> = std::result::Result<T, CrossrefError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use config::Config;
pub use crawler::{SourceDescriptor, SourceResult};
pub use extract::{Extractor, PetLinks};
pub use report::{merge_results, PresenceEntry, Report, Site};
