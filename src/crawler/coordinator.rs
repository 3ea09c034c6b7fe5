//! Crawler coordinator - fan-out/fan-in over all source pages
//!
//! This module runs one task per source page, waits for every task to finish,
//! and collects the per-source results. A failing page never stops the others;
//! it is logged and carried forward as a failed `SourceResult`.

use crate::config::Config;
use crate::crawler::{build_http_client, fetch_source, SourceDescriptor, SourceResult};
use crate::extract::PetLinks;
use crate::{CrossrefError, FetchError};
use reqwest::Client;
use std::future::Future;
use std::sync::Arc;
use tokio::task::JoinSet;

/// Main crawler coordinator structure
pub struct Coordinator {
    client: Client,
    sources: Vec<Arc<SourceDescriptor>>,
}

impl Coordinator {
    /// Creates a coordinator for every page in the configuration
    ///
    /// # Returns
    ///
    /// * `Ok(Coordinator)` - Client built and sources expanded
    /// * `Err(CrossrefError)` - Invalid extractor or HTTP client setup failure
    pub fn new(config: &Config) -> Result<Self, CrossrefError> {
        let client = build_http_client(&config.http)?;
        let sources = SourceDescriptor::from_config(config)?;
        Ok(Self::with_sources(client, sources))
    }

    /// Creates a coordinator from an existing client and source list
    pub fn with_sources(client: Client, sources: Vec<SourceDescriptor>) -> Self {
        Self {
            client,
            sources: sources.into_iter().map(Arc::new).collect(),
        }
    }

    /// Source pages this coordinator will fetch
    pub fn sources(&self) -> &[Arc<SourceDescriptor>] {
        &self.sources
    }

    /// Fetches every source concurrently and waits for all of them
    ///
    /// Results come back in source order regardless of completion order.
    pub async fn run(&self) -> Vec<SourceResult> {
        self.run_with(|client, source| async move { fetch_source(&client, &source).await })
            .await
    }

    /// Runs `fetch` once per source in its own task
    ///
    /// A task that panics or is cancelled leaves its slot empty, and the
    /// source is reported as a `Task` failure.
    async fn run_with<F, Fut>(&self, fetch: F) -> Vec<SourceResult>
    where
        F: Fn(Client, Arc<SourceDescriptor>) -> Fut,
        Fut: Future<Output = Result<PetLinks, FetchError>> + Send + 'static,
    {
        tracing::info!("Fetching {} source pages", self.sources.len());

        let mut tasks = JoinSet::new();
        for (slot, source) in self.sources.iter().enumerate() {
            let outcome = fetch(self.client.clone(), Arc::clone(source));
            tasks.spawn(async move { (slot, outcome.await) });
        }

        let mut outcomes: Vec<Option<Result<PetLinks, FetchError>>> =
            (0..self.sources.len()).map(|_| None).collect();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok((slot, outcome)) => outcomes[slot] = Some(outcome),
                Err(e) => tracing::error!("Fetch task failed: {}", e),
            }
        }

        let mut results = Vec::with_capacity(self.sources.len());
        for (source, outcome) in self.sources.iter().zip(outcomes) {
            let outcome = outcome.unwrap_or_else(|| {
                Err(FetchError::Task {
                    url: source.url(),
                    message: "task panicked or was cancelled".to_string(),
                })
            });

            match &outcome {
                Ok(pets) => tracing::info!("{}: {} pets", source.url(), pets.len()),
                Err(e) => tracing::error!("{}: {}", source.url(), e),
            }

            results.push(SourceResult::new(Arc::clone(source), outcome));
        }

        let failed = results.iter().filter(|r| !r.is_success()).count();
        if failed > 0 {
            tracing::warn!(
                "{} of {} source pages failed and contribute no pets",
                failed,
                results.len()
            );
        }

        results
    }
}
