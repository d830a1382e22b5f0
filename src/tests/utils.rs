// src/tests/utils.rs

use crate::config::{OutputFormat, ScrapeConfig};
use crate::domain::{parse_timestamp, DomainStats, ListingRecord, ScrapeWindow};
use crate::output::RowSink;
use crate::scraper::{Fetch, Result, ScraperError};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::{SystemTime, UNIX_EPOCH};

pub const DOMAIN: &str = "http://rentals.test";

/// Serves canned pages and remembers every url asked for.
#[derive(Default)]
pub struct FakeFetcher {
    pages: HashMap<String, String>,
    requested: Mutex<Vec<String>>,
}

impl FakeFetcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(mut self, url: &str, html: String) -> Self {
        self.pages.insert(url.to_string(), html);
        self
    }

    pub fn requested(&self) -> Vec<String> {
        self.requested.lock().unwrap().clone()
    }
}

impl Fetch for FakeFetcher {
    fn fetch(&self, url: &str) -> Result<String> {
        self.requested.lock().unwrap().push(url.to_string());
        self.pages
            .get(url)
            .cloned()
            .ok_or_else(|| ScraperError::Network(format!("no canned page for {url}")))
    }
}

/// Keeps everything handed to it.
#[derive(Default)]
pub struct RecordingSink {
    pub begun: Vec<String>,
    pub rows: Vec<ListingRecord>,
    pub ended: Vec<DomainStats>,
    pub finished: bool,
}

impl RowSink for RecordingSink {
    fn begin_domain(&mut self, domain: &str) -> Result<()> {
        self.begun.push(domain.to_string());
        Ok(())
    }

    fn write_row(&mut self, record: &ListingRecord) -> Result<()> {
        self.rows.push(record.clone());
        Ok(())
    }

    fn end_domain(&mut self, stats: &DomainStats) -> Result<()> {
        self.ended.push(stats.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.finished = true;
        Ok(())
    }
}

/// A path under the temp dir that no other test will use.
pub fn temp_path(prefix: &str, ext: &str) -> PathBuf {
    std::env::temp_dir().join(format!(
        "{prefix}_{}_{}.{ext}",
        std::process::id(),
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    ))
}

pub fn window(earliest: &str, latest: &str) -> ScrapeWindow {
    ScrapeWindow::new(
        parse_timestamp(earliest).unwrap(),
        parse_timestamp(latest).unwrap(),
    )
}

/// Config for the 10:00 to 11:00 window on 2016-05-04 used throughout the tests.
pub fn test_config(domains: &[&str]) -> ScrapeConfig {
    let outfile = temp_path("rental_scraper", "csv");
    ScrapeConfig {
        domains: domains.iter().map(|d| d.to_string()).collect(),
        format: OutputFormat::Csv,
        outfile,
        window: window("2016-05-04 10:00", "2016-05-04 11:00"),
        timeout: None,
        concurrent_domains: false,
    }
}

pub fn search_url(domain: &str) -> String {
    format!("{domain}/search/apa")
}

pub fn listing_url(domain: &str, pid: &str) -> String {
    format!("{domain}/apa/{pid}.html")
}

/// One `p.row` as it appears on a results page.
pub fn listing_row(pid: &str, dt: &str) -> String {
    listing_row_with(
        pid,
        dt,
        "Sunny 2br near the park",
        "$1200",
        " (midtown)",
        "/ 2br - 900ft",
    )
}

pub fn listing_row_with(
    pid: &str,
    dt: &str,
    title: &str,
    price: &str,
    neighb: &str,
    housing: &str,
) -> String {
    format!(
        r#"
<p class="row" data-pid="{pid}">
  <a href="/apa/{pid}.html" class="i"></a>
  <span class="txt">
    <span class="pl">
      <time datetime="{dt}" title="Wed 04 May">May 4</time>
      <a href="/apa/{pid}.html" data-id="{pid}" class="hdrlnk"><span id="titletextonly">{title}</span></a>
    </span>
    <span class="l2">
      <span class="price">{price}</span>
      <span class="housing">{housing}<sup>2</sup> - </span>
      <span class="pnr"><small>{neighb}</small></span>
    </span>
  </span>
</p>"#
    )
}

pub fn results_page(rows: &[String], next: Option<&str>) -> String {
    let next_link = next
        .map(|href| format!(r#"<a href="{href}" class="button next" title="next page">next &gt;</a>"#))
        .unwrap_or_default();
    format!(
        r#"<html><body>
<div class="content">{}</div>
<span class="buttons">{next_link}</span>
</body></html>"#,
        rows.join("\n")
    )
}

pub fn detail_page(map: Option<(&str, &str, &str)>, map_href: Option<&str>) -> String {
    let map_div = map
        .map(|(lat, lng, acc)| {
            format!(
                r#"<div id="map" class="viewposting" data-latitude="{lat}" data-longitude="{lng}" data-accuracy="{acc}"></div>"#
            )
        })
        .unwrap_or_default();
    let address = map_href
        .map(|href| {
            format!(
                r#"<p class="mapaddress">123 Peachtree St<small>(<a target="_blank" href="{href}">google map</a>)</small></p>"#
            )
        })
        .unwrap_or_default();
    format!("<html><body><section>{map_div}{address}</section></body></html>")
}
