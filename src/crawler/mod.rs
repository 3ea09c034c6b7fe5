//! Crawler module for fetching source pages
//!
//! This module contains the fetch side of the pipeline, including:
//! - Source descriptors built from the configuration
//! - HTTP fetching with gzip decoding
//! - Concurrent coordination of all sources

mod coordinator;
mod fetcher;
mod source;

pub use coordinator::Coordinator;
pub use fetcher::{build_http_client, decode_body, fetch_source};
pub use source::{site_label, SourceDescriptor, SourceResult};

use crate::config::Config;
use crate::report::{merge_results, Report};

/// Runs a complete crawl and builds the report
///
/// This is the main entry point for a run. It will:
/// 1. Build the HTTP client and source descriptors
/// 2. Fetch every source page concurrently
/// 3. Merge the per-source mappings into a ranked report
///
/// Source failures are logged and leave gaps in the report; only setup
/// errors are returned.
pub async fn crawl(config: &Config) -> crate::Result<Report> {
    let coordinator = Coordinator::new(config)?;
    let results = coordinator.run().await;
    Ok(merge_results(&results, chrono::Local::now()))
}
