//! Run configuration
//!
//! All tunables live in one `Config` value that is built once (defaults,
//! a TOML file, or CLI overrides) and passed by reference into the
//! pipeline. Nothing in the pipeline reads global state.

use crate::Result;
use anyhow::Context;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

/// Default URL a candidate proxy must successfully relay a GET to
pub const DEFAULT_TEST_URL: &str = "http://www.google.com";

/// Default timeout for fetching one source list, in seconds
pub const DEFAULT_FETCH_TIMEOUT_SECS: u64 = 30;

/// Default timeout for one proxied liveness probe, in seconds
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 10;

/// Default timeout for one DNSBL lookup, in milliseconds
pub const DEFAULT_DNSBL_TIMEOUT_MS: u64 = 1000;

/// Default ceiling on concurrently in-flight network operations
pub const DEFAULT_MAX_WORKERS: usize = 200;

/// Default output file for the accepted set
pub const DEFAULT_OUTPUT_FILE: &str = "proxy.txt";

/// Free public DNSBL zones used for the reputation screen. These are
/// rate-limited for high volume; swap in a paid feed for serious use.
pub const DEFAULT_BLACKLISTS: [&str; 4] = [
    "zen.spamhaus.org",
    "bl.spamcop.net",
    "dnsbl.sorbs.net",
    "b.barracudacentral.org",
];

/// Pipeline configuration with documented defaults for every field.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// URL used to test whether a candidate actually relays traffic
    pub test_url: String,
    /// Timeout for fetching one source list
    pub fetch_timeout_secs: u64,
    /// Timeout for one proxied test request
    pub probe_timeout_secs: u64,
    /// Timeout for one blacklist lookup
    pub dnsbl_timeout_ms: u64,
    /// Concurrency ceiling shared by the fetch and validation phases
    pub max_workers: usize,
    /// Destination for the accepted set (overwritten each run)
    pub output_file: String,
    /// DNSBL zones to screen live proxies against
    pub blacklists: Vec<String>,
    /// Source lists to harvest, keyed by category label
    pub sources: BTreeMap<String, Vec<String>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            test_url: DEFAULT_TEST_URL.to_string(),
            fetch_timeout_secs: DEFAULT_FETCH_TIMEOUT_SECS,
            probe_timeout_secs: DEFAULT_PROBE_TIMEOUT_SECS,
            dnsbl_timeout_ms: DEFAULT_DNSBL_TIMEOUT_MS,
            max_workers: DEFAULT_MAX_WORKERS,
            output_file: DEFAULT_OUTPUT_FILE.to_string(),
            blacklists: DEFAULT_BLACKLISTS.iter().map(|s| s.to_string()).collect(),
            sources: BTreeMap::new(),
        }
    }
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file; absent fields keep defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {:?}", path))?;
        let config: Config =
            toml::from_str(&content).with_context(|| format!("parsing config file {:?}", path))?;
        Ok(config)
    }

    pub fn with_test_url(mut self, url: String) -> Self {
        self.test_url = url;
        self
    }

    pub fn with_max_workers(mut self, workers: usize) -> Self {
        self.max_workers = workers;
        self
    }

    pub fn with_output_file(mut self, path: String) -> Self {
        self.output_file = path;
        self
    }

    pub fn with_sources(mut self, category: &str, urls: Vec<String>) -> Self {
        self.sources.insert(category.to_string(), urls);
        self
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_secs(self.fetch_timeout_secs)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }

    pub fn dnsbl_timeout(&self) -> Duration {
        Duration::from_millis(self.dnsbl_timeout_ms)
    }

    /// All configured source URLs, in category order then list order.
    pub fn source_urls(&self) -> Vec<String> {
        self.sources.values().flatten().cloned().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_defaults() {
        let config = Config::default();
        assert_eq!(config.test_url, DEFAULT_TEST_URL);
        assert_eq!(config.fetch_timeout(), Duration::from_secs(30));
        assert_eq!(config.probe_timeout(), Duration::from_secs(10));
        assert_eq!(config.dnsbl_timeout(), Duration::from_millis(1000));
        assert_eq!(config.max_workers, 200);
        assert_eq!(config.output_file, "proxy.txt");
        assert_eq!(config.blacklists.len(), 4);
        assert!(config.source_urls().is_empty());
    }

    #[test]
    fn test_config_builder() {
        let config = Config::new()
            .with_test_url("http://example.com".to_string())
            .with_max_workers(50)
            .with_output_file("out.txt".to_string())
            .with_sources("http", vec!["http://a.example/list.txt".to_string()]);

        assert_eq!(config.test_url, "http://example.com");
        assert_eq!(config.max_workers, 50);
        assert_eq!(config.output_file, "out.txt");
        assert_eq!(config.source_urls(), vec!["http://a.example/list.txt"]);
    }

    #[test]
    fn test_config_from_toml() {
        let toml_str = r#"
test_url = "http://httpbin.org/ip"
max_workers = 16

[sources]
http = ["http://a.example/http.txt", "http://b.example/http.txt"]
socks = ["http://c.example/socks.txt"]
"#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.test_url, "http://httpbin.org/ip");
        assert_eq!(config.max_workers, 16);
        // defaults survive for absent fields
        assert_eq!(config.probe_timeout_secs, 10);
        assert_eq!(config.blacklists.len(), 4);
        // categories iterate in key order
        assert_eq!(config.source_urls().len(), 3);
        assert_eq!(config.source_urls()[0], "http://a.example/http.txt");
    }
}
