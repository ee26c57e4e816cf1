use anyhow::bail;
use clap::Parser;
use env_logger::Env;
use proxy_sift::{proxy, Config, Result};
use std::path::PathBuf;

/// Harvest, check, and screen public proxies in one batch run
#[derive(Parser)]
#[command(name = "proxy-sift")]
#[command(about = "Harvests public proxy lists, checks liveness and DNSBL reputation")]
struct Cli {
    /// Path to a TOML config file with source URLs and tunables
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output file for the accepted proxies (overrides config)
    #[arg(short, long)]
    output: Option<String>,

    /// Maximum number of concurrent network operations (overrides config)
    #[arg(short = 'n', long)]
    workers: Option<usize>,

    /// URL to test proxies against (overrides config)
    #[arg(long)]
    test_url: Option<String>,

    /// Timeout in seconds for fetching one source list (overrides config)
    #[arg(long)]
    fetch_timeout: Option<u64>,

    /// Timeout in seconds for one proxied test request (overrides config)
    #[arg(long)]
    probe_timeout: Option<u64>,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    apply_overrides(&mut config, cli);

    if config.source_urls().is_empty() {
        bail!("no proxy source URLs configured; add a [sources] table to the config file");
    }

    let accepted = proxy::run(&config).await?;

    proxy::save_accepted(&config.output_file, &accepted)?;
    println!(
        "Saved {} working clean proxies to {}",
        accepted.len(),
        config.output_file
    );

    Ok(())
}

/// Apply CLI flags on top of the loaded configuration.
fn apply_overrides(config: &mut Config, cli: Cli) {
    if let Some(output) = cli.output {
        config.output_file = output;
    }
    if let Some(workers) = cli.workers {
        config.max_workers = workers;
    }
    if let Some(test_url) = cli.test_url {
        config.test_url = test_url;
    }
    if let Some(fetch_timeout) = cli.fetch_timeout {
        config.fetch_timeout_secs = fetch_timeout;
    }
    if let Some(probe_timeout) = cli.probe_timeout {
        config.probe_timeout_secs = probe_timeout;
    }
}
