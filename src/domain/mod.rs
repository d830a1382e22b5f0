pub mod listing;
pub mod window;

pub use listing::{DomainStats, Geolocation, Listing, ListingRecord, COLUMNS};
pub use window::{parse_timestamp, ScrapeWindow, WindowPosition};
