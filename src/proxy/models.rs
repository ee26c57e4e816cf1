//! Data models for harvested proxy candidates

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A scraped, not-yet-verified proxy endpoint.
///
/// The host is kept exactly as it appeared in the source text (no octet
/// normalization), so `"010.0.0.1:80"` and `"10.0.0.1:80"` are two distinct
/// candidates. Identity for deduplication is the exact `(host, port)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProxyCandidate {
    pub host: String,
    pub port: u16,
}

impl ProxyCandidate {
    pub fn new(host: String, port: u16) -> Self {
        Self { host, port }
    }

    /// Parse a raw `a.b.c.d:port` string scraped from a source.
    ///
    /// Splits on the final colon. Returns `None` when the port part is
    /// missing, non-numeric, or out of [1, 65535] — malformed strings are
    /// noise from pattern matching, not errors.
    pub fn from_raw(raw: &str) -> Option<Self> {
        let (host, port) = raw.trim().rsplit_once(':')?;
        let port: u16 = port.parse().ok()?;
        if port == 0 || host.is_empty() {
            return None;
        }
        Some(Self::new(host.to_string(), port))
    }

    /// Proxy URL for the given scheme, e.g. `http://1.2.3.4:8080`.
    pub fn url(&self, scheme: &str) -> String {
        format!("{}://{}:{}", scheme, self.host, self.port)
    }
}

impl fmt::Display for ProxyCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

/// Why fetching a single source failed.
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("request timed out")]
    Timeout,
    #[error("HTTP status {0}")]
    HttpStatus(u16),
    #[error("network error: {0}")]
    Network(String),
}

/// Outcome of fetching one source URL.
///
/// Raw candidate strings are kept in order of appearance, duplicates
/// included; parsing and deduplication happen in the aggregator.
#[derive(Debug, Clone)]
pub struct FetchResult {
    /// URL the fetch was issued against
    pub source: String,
    /// Raw `ip:port` strings extracted from the body
    pub candidates: Vec<String>,
    /// Failure reason if the fetch did not succeed
    pub error: Option<FetchError>,
}

impl FetchResult {
    pub fn success(source: String, candidates: Vec<String>) -> Self {
        Self {
            source,
            candidates,
            error: None,
        }
    }

    pub fn failure(source: String, error: FetchError) -> Self {
        Self {
            source,
            candidates: Vec::new(),
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.error.is_none()
    }
}

/// Outcome of validating one candidate.
#[derive(Debug, Clone)]
pub struct ProbeResult {
    pub candidate: ProxyCandidate,
    /// Whether a test request routed through the candidate returned 200
    pub reachable: bool,
    /// Number of DNSBL domains the host resolved on; only meaningful
    /// when `reachable` is true (the lookup is skipped otherwise)
    pub listings: usize,
}

impl ProbeResult {
    pub fn unreachable(candidate: ProxyCandidate) -> Self {
        Self {
            candidate,
            reachable: false,
            listings: 0,
        }
    }

    pub fn reachable(candidate: ProxyCandidate, listings: usize) -> Self {
        Self {
            candidate,
            reachable: true,
            listings,
        }
    }

    /// Acceptance policy: live and clean on every blacklist.
    pub fn is_accepted(&self) -> bool {
        self.reachable && self.listings == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_from_raw() {
        let c = ProxyCandidate::from_raw("1.2.3.4:80").unwrap();
        assert_eq!(c.host, "1.2.3.4");
        assert_eq!(c.port, 80);
    }

    #[test]
    fn test_candidate_from_raw_bad_port() {
        assert!(ProxyCandidate::from_raw("1.2.3.4:notaport").is_none());
        assert!(ProxyCandidate::from_raw("1.2.3.4:0").is_none());
        assert!(ProxyCandidate::from_raw("1.2.3.4:99999").is_none());
        assert!(ProxyCandidate::from_raw("1.2.3.4").is_none());
        assert!(ProxyCandidate::from_raw(":8080").is_none());
    }

    #[test]
    fn test_candidate_identity_is_textual() {
        let a = ProxyCandidate::from_raw("010.0.0.1:80").unwrap();
        let b = ProxyCandidate::from_raw("10.0.0.1:80").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_candidate_url_and_display() {
        let c = ProxyCandidate::new("1.2.3.4".to_string(), 8080);
        assert_eq!(c.url("http"), "http://1.2.3.4:8080");
        assert_eq!(c.to_string(), "1.2.3.4:8080");
    }

    #[test]
    fn test_fetch_result_success() {
        let r = FetchResult::success(
            "http://example.com/list.txt".to_string(),
            vec!["1.2.3.4:80".to_string()],
        );
        assert!(r.is_success());
        assert_eq!(r.candidates.len(), 1);
    }

    #[test]
    fn test_fetch_result_failure() {
        let r = FetchResult::failure("http://example.com".to_string(), FetchError::Timeout);
        assert!(!r.is_success());
        assert!(r.candidates.is_empty());
        assert_eq!(r.error.unwrap().to_string(), "request timed out");
    }

    #[test]
    fn test_probe_result_acceptance() {
        let c = ProxyCandidate::new("1.2.3.4".to_string(), 80);
        assert!(ProbeResult::reachable(c.clone(), 0).is_accepted());
        assert!(!ProbeResult::reachable(c.clone(), 2).is_accepted());
        assert!(!ProbeResult::unreachable(c).is_accepted());
    }
}
