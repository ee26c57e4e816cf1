//! Aggregator: fans out over all configured sources and merges the haul
//!
//! Every source is fetched concurrently under the shared worker ceiling.
//! A dead or slow source costs nothing but its own candidates; the batch
//! never aborts. Raw strings are parsed and deduplicated here, so the
//! validation phase sees each `(host, port)` pair exactly once.

use crate::proxy::fetcher::FetchSource;
use crate::proxy::models::ProxyCandidate;
use futures::stream::{self, StreamExt};
use log::{info, warn};
use std::collections::HashSet;
use std::sync::Arc;

pub struct Aggregator {
    fetcher: Arc<dyn FetchSource>,
    max_workers: usize,
}

impl Aggregator {
    pub fn new(fetcher: Arc<dyn FetchSource>, max_workers: usize) -> Self {
        Self {
            fetcher,
            // buffer_unordered(0) would stall the stream
            max_workers: max_workers.max(1),
        }
    }

    /// Fetch every source and return the deduplicated candidate set.
    ///
    /// Completion order is arbitrary; the result only depends on which
    /// fetches succeeded. Returns once every dispatched fetch has resolved.
    pub async fn aggregate(&self, urls: &[String]) -> HashSet<ProxyCandidate> {
        let results = stream::iter(urls)
            .map(|url| {
                let fetcher = Arc::clone(&self.fetcher);
                async move { fetcher.fetch(url).await }
            })
            .buffer_unordered(self.max_workers)
            .collect::<Vec<_>>()
            .await;

        let mut candidates = HashSet::new();
        for result in results {
            match result.error {
                None => {
                    info!(
                        "fetched {} candidates from {}",
                        result.candidates.len(),
                        result.source
                    );
                    candidates.extend(
                        result
                            .candidates
                            .iter()
                            .filter_map(|raw| ProxyCandidate::from_raw(raw)),
                    );
                }
                Some(error) => {
                    warn!("error fetching {}: {}", result.source, error);
                }
            }
        }

        candidates
    }
}
