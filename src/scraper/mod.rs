pub mod document;
pub mod fetcher;
pub mod geolocate;
pub mod listing;
mod scraper;
mod scraper_error;

pub use fetcher::{Fetch, HttpFetcher};
pub use self::scraper::RentalListingScraper;
pub use scraper_error::{Result, ScraperError};
