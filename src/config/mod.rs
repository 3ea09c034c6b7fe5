//! Configuration module for pet-crossref
//!
//! This module handles loading, parsing, and validating the TOML source list.
//! When no file is given the compiled-in defaults are used.
//!
//! # Example
//!
//! ```no_run
//! use pet_crossref::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("sources.toml")).unwrap();
//! println!("Request timeout: {}s", config.http.timeout_secs);
//! ```

mod defaults;
mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{Config, ExtractorConfig, HttpConfig, OutputConfig, OutputFormat, SourceEntry};

// Re-export parser functions
pub use defaults::default_config;
pub use parser::{compute_config_hash, load_config, load_config_with_hash, parse_config};
