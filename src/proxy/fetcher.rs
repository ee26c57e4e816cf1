//! Source fetcher: downloads one proxy list and extracts raw candidates
//!
//! Sources are wildly inconsistent (plain text, HTML tables, READMEs), so
//! extraction is a permissive regex sweep over the whole body rather than
//! line parsing. Every failure is folded into a typed `FetchResult`; this
//! boundary never propagates an error.

use crate::proxy::models::{FetchError, FetchResult};
use crate::Result;
use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Client;
use std::time::Duration;

/// Default user agent for source requests
const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

/// Matches anything shaped like IPv4:port. Deliberately loose: digit groups
/// are not range-checked (sources embed junk and the liveness probe weeds
/// it out), and ports are validated later during parsing.
static CANDIDATE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\d{1,3}\.\d{1,3}\.\d{1,3}\.\d{1,3}:\d+").expect("invalid candidate regex")
});

/// Fetches one source URL and returns its raw candidate strings.
///
/// Behind a trait so the aggregator can be driven by fakes in tests.
#[async_trait]
pub trait FetchSource: Send + Sync {
    async fn fetch(&self, url: &str) -> FetchResult;
}

/// HTTP implementation of [`FetchSource`] backed by a shared `reqwest` client.
pub struct SourceFetcher {
    client: Client,
}

impl SourceFetcher {
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .build()?;
        Ok(Self { client })
    }

    /// Extract every `ip:port`-shaped substring, in order of appearance,
    /// duplicates included.
    pub fn extract_candidates(content: &str) -> Vec<String> {
        CANDIDATE_REGEX
            .find_iter(content)
            .map(|m| m.as_str().to_string())
            .collect()
    }
}

#[async_trait]
impl FetchSource for SourceFetcher {
    async fn fetch(&self, url: &str) -> FetchResult {
        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) if e.is_timeout() => {
                return FetchResult::failure(url.to_string(), FetchError::Timeout)
            }
            Err(e) => {
                return FetchResult::failure(url.to_string(), FetchError::Network(e.to_string()))
            }
        };

        let status = response.status();
        if !status.is_success() {
            return FetchResult::failure(url.to_string(), FetchError::HttpStatus(status.as_u16()));
        }

        match response.text().await {
            Ok(body) => FetchResult::success(url.to_string(), Self::extract_candidates(&body)),
            Err(e) if e.is_timeout() => FetchResult::failure(url.to_string(), FetchError::Timeout),
            Err(e) => FetchResult::failure(url.to_string(), FetchError::Network(e.to_string())),
        }
    }
}
