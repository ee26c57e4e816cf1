//! DNSBL screen: best-effort blacklist reputation for live proxies
//!
//! An IP is queried the DNSBL way — octets reversed, prefixed onto the
//! zone — but the answer is read as a bare signal: if the name resolves
//! at all the IP counts as listed there. This is NOT RFC 5782; a real
//! DNSBL encodes the listing type in the returned address, which this
//! triage deliberately ignores. A failed or timed-out lookup counts as
//! not listed, so a dead resolver silently under-reports.

use async_trait::async_trait;
use futures::future::join_all;
use log::info;
use std::time::Duration;
use tokio::net::lookup_host;

/// Reports how many configured blacklist zones list an IP.
#[async_trait]
pub trait CheckReputation: Send + Sync {
    async fn listing_count(&self, ip: &str) -> usize;
}

pub struct DnsblChecker {
    domains: Vec<String>,
    timeout: Duration,
}

impl DnsblChecker {
    pub fn new(domains: Vec<String>, timeout: Duration) -> Self {
        Self { domains, timeout }
    }

    /// Reverse the octets of a dotted-quad string: `1.2.3.4` → `4.3.2.1`.
    pub fn reverse_octets(ip: &str) -> String {
        ip.rsplit('.').collect::<Vec<_>>().join(".")
    }

    async fn is_listed(&self, reversed_ip: &str, domain: &str) -> bool {
        // lookup_host wants a port; any value works for a pure A lookup
        let query = format!("{}.{}:80", reversed_ip, domain);
        match tokio::time::timeout(self.timeout, lookup_host(query)).await {
            Ok(Ok(mut addrs)) => addrs.next().is_some(),
            _ => false,
        }
    }
}

#[async_trait]
impl CheckReputation for DnsblChecker {
    /// Zone checks are independent and run concurrently; the result is
    /// the count of zones where the reversed name resolved.
    async fn listing_count(&self, ip: &str) -> usize {
        let reversed = Self::reverse_octets(ip);
        let checks = self
            .domains
            .iter()
            .map(|domain| self.is_listed(&reversed, domain));

        let mut listed = 0;
        for (domain, hit) in self.domains.iter().zip(join_all(checks).await) {
            if hit {
                info!("IP {} listed on {}", ip, domain);
                listed += 1;
            }
        }
        listed
    }
}
