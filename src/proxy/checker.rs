//! Liveness checker: routes a test request through a candidate proxy
//!
//! A candidate passes only when a GET against the configured test URL,
//! relayed through the candidate as both HTTP and HTTPS forward proxy,
//! comes back with status 200. One attempt per candidate per run.

use crate::proxy::models::ProxyCandidate;
use crate::Result;
use async_trait::async_trait;
use reqwest::{Client, Proxy as ReqwestProxy, StatusCode};
use std::time::Duration;

/// Reports whether one candidate relays traffic end to end.
#[async_trait]
pub trait ProbeProxy: Send + Sync {
    async fn probe(&self, candidate: &ProxyCandidate) -> bool;
}

/// Real prober backed by per-candidate `reqwest` clients.
#[derive(Debug, Clone)]
pub struct ProxyChecker {
    test_url: String,
    timeout: Duration,
}

impl ProxyChecker {
    pub fn new(test_url: String, timeout: Duration) -> Self {
        Self { test_url, timeout }
    }

    /// Build a client that tunnels everything through the candidate.
    ///
    /// Certificate validation is disabled on purpose: many free proxies
    /// present self-signed or broken certs on the CONNECT path, and this
    /// stage only triages connectivity. Do not reuse this client for
    /// anything that carries sensitive data.
    fn create_client(&self, candidate: &ProxyCandidate) -> Result<Client> {
        let proxy_url = candidate.url("http");
        let client = Client::builder()
            .proxy(ReqwestProxy::http(&proxy_url)?)
            .proxy(ReqwestProxy::https(&proxy_url)?)
            .danger_accept_invalid_certs(true)
            .timeout(self.timeout)
            .build()?;
        Ok(client)
    }
}

#[async_trait]
impl ProbeProxy for ProxyChecker {
    /// Every failure mode collapses to `false`: client build error,
    /// connect failure, timeout, and any status other than 200.
    async fn probe(&self, candidate: &ProxyCandidate) -> bool {
        let client = match self.create_client(candidate) {
            Ok(client) => client,
            Err(_) => return false,
        };

        match tokio::time::timeout(self.timeout, client.get(&self.test_url).send()).await {
            Ok(Ok(response)) => response.status() == StatusCode::OK,
            _ => false,
        }
    }
}
