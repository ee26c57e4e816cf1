//! Proxy harvesting pipeline
//!
//! This module provides functionality for:
//! - Fetching proxy lists from remote sources and extracting candidates
//! - Aggregating and deduplicating candidates across all sources
//! - Checking candidate liveness by relaying a test request
//! - Screening live candidates against DNSBL blacklists
//! - Writing the accepted set to a plain-text output file

pub mod aggregator;
pub mod checker;
pub mod dnsbl;
pub mod fetcher;
pub mod models;
pub mod sink;
pub mod validator;

pub use aggregator::Aggregator;
pub use checker::{ProbeProxy, ProxyChecker};
pub use dnsbl::{CheckReputation, DnsblChecker};
pub use fetcher::{FetchSource, SourceFetcher};
pub use models::{FetchError, FetchResult, ProbeResult, ProxyCandidate};
pub use sink::save_accepted;
pub use validator::ProxyValidator;

use crate::config::Config;
use crate::Result;
use log::info;
use std::sync::Arc;

/// Run the whole pipeline with the real network implementations and
/// return the accepted set. Writing the output file is the caller's job.
pub async fn run(config: &Config) -> Result<Vec<ProxyCandidate>> {
    let fetcher = Arc::new(SourceFetcher::new(config.fetch_timeout())?);
    let aggregator = Aggregator::new(fetcher, config.max_workers);

    let urls = config.source_urls();
    info!("fetching {} sources", urls.len());
    let candidates = aggregator.aggregate(&urls).await;
    info!("total unique candidates: {}", candidates.len());

    let prober = Arc::new(ProxyChecker::new(
        config.test_url.clone(),
        config.probe_timeout(),
    ));
    let reputation = Arc::new(DnsblChecker::new(
        config.blacklists.clone(),
        config.dnsbl_timeout(),
    ));
    let validator = ProxyValidator::new(prober, reputation, config.max_workers);

    let total = candidates.len();
    let accepted = validator.validate(candidates).await;
    info!(
        "accepted {} of {} candidates (working and unlisted)",
        accepted.len(),
        total
    );

    Ok(accepted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use std::collections::HashSet;
    use tempfile::tempdir;

    struct TwoSourceFetcher;

    #[async_trait]
    impl FetchSource for TwoSourceFetcher {
        async fn fetch(&self, url: &str) -> FetchResult {
            let raws: Vec<String> = match url {
                "http://a.example/list.txt" => {
                    vec!["5.5.5.5:80", "5.5.5.5:80", "6.6.6.6:1080"]
                }
                _ => vec!["6.6.6.6:1080"],
            }
            .into_iter()
            .map(String::from)
            .collect();
            FetchResult::success(url.to_string(), raws)
        }
    }

    struct OnlyFiveIsLive;

    #[async_trait]
    impl ProbeProxy for OnlyFiveIsLive {
        async fn probe(&self, candidate: &ProxyCandidate) -> bool {
            candidate.host == "5.5.5.5"
        }
    }

    struct AlwaysClean;

    #[async_trait]
    impl CheckReputation for AlwaysClean {
        async fn listing_count(&self, _ip: &str) -> usize {
            0
        }
    }

    #[tokio::test]
    async fn test_pipeline_end_to_end_with_fakes() {
        let aggregator = Aggregator::new(Arc::new(TwoSourceFetcher), 10);
        let candidates = aggregator
            .aggregate(&[
                "http://a.example/list.txt".to_string(),
                "http://b.example/list.txt".to_string(),
            ])
            .await;

        let expected: HashSet<ProxyCandidate> = ["5.5.5.5:80", "6.6.6.6:1080"]
            .iter()
            .map(|raw| ProxyCandidate::from_raw(raw).unwrap())
            .collect();
        assert_eq!(candidates, expected);

        let validator = ProxyValidator::new(Arc::new(OnlyFiveIsLive), Arc::new(AlwaysClean), 10);
        let accepted = validator.validate(candidates).await;
        assert_eq!(accepted.len(), 1);
        assert_eq!(accepted[0].to_string(), "5.5.5.5:80");

        let dir = tempdir().unwrap();
        let path = dir.path().join("proxy.txt");
        save_accepted(&path, &accepted).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "5.5.5.5:80\n");
    }
}
