//! Validator: concurrent liveness + reputation screen over the candidate set
//!
//! Each candidate gets at most two network steps: the liveness probe, then
//! the DNSBL screen only when the probe succeeded — unreachable proxies
//! never hit the blacklist resolvers. Candidates
//! are validated independently under the shared worker ceiling and the
//! accepted set is returned only after every candidate has resolved.

use crate::proxy::checker::ProbeProxy;
use crate::proxy::dnsbl::CheckReputation;
use crate::proxy::models::{ProbeResult, ProxyCandidate};
use futures::stream::{self, StreamExt};
use log::info;
use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::Semaphore;

pub struct ProxyValidator {
    prober: Arc<dyn ProbeProxy>,
    reputation: Arc<dyn CheckReputation>,
    max_workers: usize,
}

impl ProxyValidator {
    pub fn new(
        prober: Arc<dyn ProbeProxy>,
        reputation: Arc<dyn CheckReputation>,
        max_workers: usize,
    ) -> Self {
        Self {
            prober,
            reputation,
            max_workers: max_workers.max(1),
        }
    }

    /// Validate one candidate: probe, then screen only if reachable.
    async fn check_candidate(&self, candidate: ProxyCandidate) -> ProbeResult {
        if !self.prober.probe(&candidate).await {
            return ProbeResult::unreachable(candidate);
        }
        let listings = self.reputation.listing_count(&candidate.host).await;
        ProbeResult::reachable(candidate, listings)
    }

    /// Run the full screen and return the accepted subset.
    ///
    /// Accepts a candidate iff it is reachable and listed on zero
    /// blacklists. Rejections are logged with the reason and dropped.
    pub async fn validate(&self, candidates: HashSet<ProxyCandidate>) -> Vec<ProxyCandidate> {
        let semaphore = Arc::new(Semaphore::new(self.max_workers));

        let results = stream::iter(candidates)
            .map(|candidate| {
                let sem = Arc::clone(&semaphore);
                async move {
                    // Acquire only fails if the semaphore is closed, which
                    // cannot happen while we hold the Arc for the whole run.
                    let _permit = sem.acquire().await.expect("semaphore closed unexpectedly");
                    self.check_candidate(candidate).await
                }
            })
            .buffer_unordered(self.max_workers)
            .collect::<Vec<_>>()
            .await;

        let mut accepted = Vec::new();
        for result in results {
            if result.is_accepted() {
                accepted.push(result.candidate);
            } else if !result.reachable {
                info!("skipping {}: not working", result.candidate);
            } else {
                info!(
                    "skipping {}: listed on {} DNSBLs",
                    result.candidate, result.listings
                );
            }
        }
        accepted
    }
}
