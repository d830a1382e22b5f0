use chrono::NaiveDateTime;
use serde::Serialize;

/// Output column order, also the CSV header.
pub const COLUMNS: [&str; 12] = [
    "pid", "dt", "url", "title", "price", "neighb", "beds", "sqft", "lat", "lng", "accuracy",
    "address",
];

/// One listing row as read off a search results page.
///
/// `url` is still relative to the domain root here; the controller resolves it
/// once the listing is known to be inside the scrape window.
#[derive(Debug, Clone, PartialEq)]
pub struct Listing {
    pub pid: String,
    pub dt: String,
    pub timestamp: NaiveDateTime,
    pub url: String,
    pub title: String,
    pub price: String,
    pub neighb: String,
    // "0" when the housing string carries no "br" token, which is not the same as zero bedrooms
    pub beds: String,
    pub sqft: String,
}

/// Location data recovered from a listing's detail page. Empty strings when the page has no map.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Geolocation {
    pub lat: String,
    pub lng: String,
    pub accuracy: String,
    pub address: String,
}

/// A finished output row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingRecord {
    pub pid: String,
    pub dt: String,
    pub url: String,
    pub title: String,
    pub price: String,
    pub neighb: String,
    pub beds: String,
    pub sqft: String,
    pub lat: String,
    pub lng: String,
    pub accuracy: String,
    pub address: String,
}

impl ListingRecord {
    /// Combines an extracted listing (with its url already made absolute) and its geolocation.
    pub fn new(listing: Listing, geo: Geolocation) -> Self {
        Self {
            pid: listing.pid,
            dt: listing.dt,
            url: listing.url,
            title: listing.title,
            price: listing.price,
            neighb: listing.neighb,
            beds: listing.beds,
            sqft: listing.sqft,
            lat: geo.lat,
            lng: geo.lng,
            accuracy: geo.accuracy,
            address: geo.address,
        }
    }

    pub fn fields(&self) -> [&str; 12] {
        [
            &self.pid,
            &self.dt,
            &self.url,
            &self.title,
            &self.price,
            &self.neighb,
            &self.beds,
            &self.sqft,
            &self.lat,
            &self.lng,
            &self.accuracy,
            &self.address,
        ]
    }
}

/// Per-domain counters, reported to the sink when a domain finishes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DomainStats {
    pub domain: String,
    pub pages_fetched: usize,
    pub listings_seen: usize,
    pub listings_skipped: usize,
    pub listings_written: usize,
}

impl DomainStats {
    pub fn new(domain: &str) -> Self {
        Self {
            domain: domain.to_string(),
            ..Default::default()
        }
    }
}
