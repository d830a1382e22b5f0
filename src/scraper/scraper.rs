// scraper.rs
use crate::config::ScrapeConfig;
use crate::domain::{DomainStats, Listing, ListingRecord, WindowPosition};
use crate::output::{open_sink, BufferedSink, RowSink};
use crate::scraper::document::{selector, Document};
use crate::scraper::fetcher::Fetch;
use crate::scraper::geolocate::{scrape_lat_lng, DetailSelectors};
use crate::scraper::listing::{parse_listing, ListingSelectors};
use crate::scraper::scraper_error::{Result, ScraperError};
use scraper::Selector;
use std::thread;
use tracing::{debug, info, warn};
use url::Url;

/// Apartment search, relative to the domain root.
pub const SEARCH_PATH: &str = "/search/apa";

struct PageSelectors {
    row: Selector,
    next: Selector,
}

/// Where a domain's crawl stands. Only moves forward; nothing is retried.
enum PageState {
    FetchingPage(Url),
    ScanningListings(Document),
    DomainDone,
}

pub struct RentalListingScraper<F: Fetch> {
    config: ScrapeConfig,
    fetcher: F,
    page_sel: PageSelectors,
    listing_sel: ListingSelectors,
    detail_sel: DetailSelectors,
}

impl<F: Fetch> RentalListingScraper<F> {
    pub fn new(config: ScrapeConfig, fetcher: F) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            config,
            fetcher,
            page_sel: PageSelectors {
                row: selector("p.row")?,
                next: selector(r#"a[title="next page"][href]"#)?,
            },
            listing_sel: ListingSelectors::new()?,
            detail_sel: DetailSelectors::new()?,
        })
    }

    /// Scrapes every configured domain into the sink the config describes.
    pub fn run(&self) -> Result<()> {
        let mut sink = open_sink(self.config.format, &self.config.outfile)?;
        self.run_into(sink.as_mut())?;
        info!("✅ Wrote {}", self.config.outfile.display());
        Ok(())
    }

    pub fn run_into(&self, sink: &mut dyn RowSink) -> Result<()> {
        let window = self.config.window;
        info!(
            "Scraping {} domain(s) for listings between {} and {}",
            self.config.domains.len(),
            window.earliest(),
            window.latest()
        );

        if self.config.concurrent_domains {
            self.run_concurrent(sink)?;
        } else {
            for domain in &self.config.domains {
                self.scrape_domain(domain, sink)?;
            }
        }

        sink.finish()
    }

    /// One thread per domain, each into its own buffer. Buffers are written out
    /// in configured domain order once every domain has finished.
    fn run_concurrent(&self, sink: &mut dyn RowSink) -> Result<()> {
        let buffers: Vec<Result<BufferedSink>> = thread::scope(|s| {
            let handles: Vec<_> = self
                .config
                .domains
                .iter()
                .map(|domain| {
                    s.spawn(move || {
                        let mut buffer = BufferedSink::new();
                        self.scrape_domain(domain, &mut buffer).map(|_| buffer)
                    })
                })
                .collect();

            handles
                .into_iter()
                .map(|h| h.join().unwrap_or_else(|e| std::panic::resume_unwind(e)))
                .collect()
        });

        for buffer in buffers {
            buffer?.replay_into(sink)?;
        }
        Ok(())
    }

    /// Crawls a single domain's search results, newest first, until the listings
    /// fall out of the window or the pages run out.
    ///
    /// Domains share nothing, so this can be called for several domains at once
    /// as long as each call gets its own sink.
    pub fn scrape_domain(&self, domain: &str, sink: &mut dyn RowSink) -> Result<DomainStats> {
        let root = Url::parse(domain).map_err(|source| ScraperError::InvalidUrl {
            url: domain.to_string(),
            source,
        })?;
        let mut stats = DomainStats::new(domain);

        info!("🧵 Starting domain {domain}");
        sink.begin_domain(domain)?;

        let mut state = PageState::FetchingPage(resolve(&root, SEARCH_PATH)?);
        loop {
            state = match state {
                PageState::FetchingPage(url) => {
                    info!("📄 Scraping page {}: {url}", stats.pages_fetched + 1);
                    let html = self.fetcher.fetch(url.as_str())?;
                    stats.pages_fetched += 1;
                    PageState::ScanningListings(Document::parse(&html))
                }
                PageState::ScanningListings(doc) => {
                    self.scan_page(&root, &doc, &mut stats, sink)?
                }
                PageState::DomainDone => break,
            };
        }

        info!(
            "🏁 {domain} done: {} page(s), {} seen, {} too new, {} written",
            stats.pages_fetched, stats.listings_seen, stats.listings_skipped, stats.listings_written
        );
        sink.end_domain(&stats)?;
        Ok(stats)
    }

    fn scan_page(
        &self,
        root: &Url,
        doc: &Document,
        stats: &mut DomainStats,
        sink: &mut dyn RowSink,
    ) -> Result<PageState> {
        let rows = doc.select_all(&self.page_sel.row);
        if rows.is_empty() {
            warn!("No listing rows on page {} of {root}", stats.pages_fetched);
        }

        for item in rows {
            let listing = parse_listing(item, &self.listing_sel)?;
            stats.listings_seen += 1;

            match self.config.window.classify(listing.timestamp) {
                WindowPosition::TooNew => {
                    debug!(pid = %listing.pid, dt = %listing.dt, "newer than window, skipping");
                    stats.listings_skipped += 1;
                }
                WindowPosition::TooOld => {
                    debug!(pid = %listing.pid, dt = %listing.dt, "older than window, domain finished");
                    return Ok(PageState::DomainDone);
                }
                WindowPosition::Within => {
                    let record = self.complete_listing(root, listing)?;
                    sink.write_row(&record)?;
                    stats.listings_written += 1;
                }
            }
        }

        let next = doc
            .select_first(&self.page_sel.next)
            .and_then(|a| a.optional_attr("href"));

        match next {
            Some(href) => Ok(PageState::FetchingPage(resolve(root, href)?)),
            None => Ok(PageState::DomainDone),
        }
    }

    fn complete_listing(&self, root: &Url, mut listing: Listing) -> Result<ListingRecord> {
        listing.url = resolve(root, &listing.url)?.into();
        debug!(pid = %listing.pid, url = %listing.url, "geolocating");

        let geo = scrape_lat_lng(&self.fetcher, &listing.url, &self.detail_sel)?;
        Ok(ListingRecord::new(listing, geo))
    }
}

/// Resolves a site href against the domain root. Absolute hrefs pass through.
fn resolve(root: &Url, href: &str) -> Result<Url> {
    root.join(href).map_err(|source| ScraperError::InvalidUrl {
        url: href.to_string(),
        source,
    })
}
