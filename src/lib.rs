//! Proxy Sift - Proxy Harvester and Screener
//!
//! Harvests candidate proxies from remote lists, verifies each one relays
//! a real HTTP request, screens the live ones against DNSBL blacklists,
//! and keeps only the candidates that are both working and unlisted.

pub mod config;
pub mod proxy;

pub use config::Config;
pub use proxy::*;

/// Application result type
pub type Result<T> = anyhow::Result<T>;
