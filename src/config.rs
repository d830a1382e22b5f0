use crate::domain::{parse_timestamp, ScrapeWindow};
use crate::scraper::{Result, ScraperError};
use chrono::NaiveDateTime;
use clap::ValueEnum;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

pub const DEFAULT_DOMAIN: &str = "http://atlanta.craigslist.org";
pub const DEFAULT_OUTFILE: &str = "data/listings.csv";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Csv,
    Jsonl,
    Sqlite,
}

impl OutputFormat {
    /// Guesses from the file extension, falling back to CSV.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some("jsonl") | Some("ndjson") => OutputFormat::Jsonl,
            Some("sqlite") | Some("sqlite3") | Some("db") => OutputFormat::Sqlite,
            _ => OutputFormat::Csv,
        }
    }
}

/// Everything a run needs, built when the run is set up.
#[derive(Debug, Clone)]
pub struct ScrapeConfig {
    /// Domain roots such as `http://atlanta.craigslist.org`, scraped in this order.
    /// Bare roots only: site hrefs are absolute paths, so a path on the domain would be lost.
    /// An empty list is a run that writes nothing but the header.
    pub domains: Vec<String>,
    pub outfile: PathBuf,
    pub format: OutputFormat,
    pub window: ScrapeWindow,
    pub timeout: Option<Duration>,
    pub concurrent_domains: bool,
}

impl ScrapeConfig {
    pub fn validate(&self) -> Result<()> {
        for domain in &self.domains {
            let root = Url::parse(domain).map_err(|source| ScraperError::InvalidUrl {
                url: domain.to_string(),
                source,
            })?;
            if root.path() != "/" {
                return Err(ScraperError::Config(format!(
                    "domain {domain} has path {}, expected a bare root",
                    root.path()
                )));
            }
        }
        if self.window.is_inverted() {
            return Err(ScraperError::Config(format!(
                "earliest {} is after latest {}",
                self.window.earliest(),
                self.window.latest()
            )));
        }
        Ok(())
    }
}

/// Builds a window from optional bounds; a missing bound comes from the hour ending now.
pub fn window_from_bounds(
    earliest: Option<NaiveDateTime>,
    latest: Option<NaiveDateTime>,
) -> ScrapeWindow {
    let default = ScrapeWindow::last_hour();
    ScrapeWindow::new(
        earliest.unwrap_or(default.earliest()),
        latest.unwrap_or(default.latest()),
    )
}

/// clap value parser for `--earliest` / `--latest`.
pub fn parse_bound(value: &str) -> std::result::Result<NaiveDateTime, String> {
    parse_timestamp(value).map_err(|e| format!("expected YYYY-MM-DD HH:MM ({e})"))
}
