use crate::config::{parse_bound, window_from_bounds, OutputFormat, ScrapeConfig};
use crate::scraper::{HttpFetcher, RentalListingScraper};
use chrono::NaiveDateTime;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::error;

mod config;
mod db;
mod domain;
mod output;
mod scraper;

#[cfg(test)]
mod tests;

#[derive(Parser)]
#[command(
    name = "rental_scraper",
    about = "Scrape rental listings from Craigslist-style search results into a table"
)]
struct Cli {
    /// Domain root to scrape, e.g. http://atlanta.craigslist.org (repeatable)
    #[arg(
        short,
        long = "domain",
        env = "RENTAL_SCRAPER_DOMAINS",
        value_delimiter = ',',
        default_value = config::DEFAULT_DOMAIN
    )]
    domains: Vec<String>,

    /// Output file
    #[arg(short, long, default_value = config::DEFAULT_OUTFILE)]
    out: PathBuf,

    /// Output format (default: guessed from the file extension)
    #[arg(long, value_enum)]
    format: Option<OutputFormat>,

    /// Oldest listing time to keep, local to the listing region (YYYY-MM-DD HH:MM)
    #[arg(long, value_parser = parse_bound)]
    earliest: Option<NaiveDateTime>,

    /// Newest listing time to keep (YYYY-MM-DD HH:MM)
    #[arg(long, value_parser = parse_bound)]
    latest: Option<NaiveDateTime>,

    /// Per-request timeout; requests never time out when unset
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Scrape domains on separate threads
    #[arg(long)]
    concurrent_domains: bool,
}

impl Cli {
    fn into_config(self) -> ScrapeConfig {
        ScrapeConfig {
            format: self
                .format
                .unwrap_or_else(|| OutputFormat::from_path(&self.out)),
            domains: self.domains,
            outfile: self.out,
            window: window_from_bounds(self.earliest, self.latest),
            timeout: self.timeout_secs.map(Duration::from_secs),
            concurrent_domains: self.concurrent_domains,
        }
    }
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let config = Cli::parse().into_config();

    let result = HttpFetcher::new(config.timeout)
        .and_then(|fetcher| RentalListingScraper::new(config, fetcher))
        .and_then(|scraper| scraper.run());

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("❌ Scrape failed: {e}");
            ExitCode::FAILURE
        }
    }
}
