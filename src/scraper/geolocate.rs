use crate::domain::Geolocation;
use crate::scraper::document::{selector, Document};
use crate::scraper::fetcher::Fetch;
use crate::scraper::scraper_error::Result;
use scraper::Selector;

/// Precedes the address in the map link, e.g. `https://maps.google.com/?q=loc%3A+123+Main+St`.
const ADDRESS_MARKER: &str = "?q=loc";

pub struct DetailSelectors {
    map: Selector,
    map_link: Selector,
}

impl DetailSelectors {
    pub fn new() -> Result<Self> {
        Ok(Self {
            map: selector("div#map")?,
            map_link: selector("p.mapaddress > small > a[href]")?,
        })
    }
}

/// Fetches a listing's detail page and reads its map coordinates.
///
/// Plenty of listings have no map at all; that gives an empty [`Geolocation`]
/// rather than an error.
pub fn scrape_lat_lng(fetcher: &dyn Fetch, url: &str, sel: &DetailSelectors) -> Result<Geolocation> {
    let html = fetcher.fetch(url)?;
    let doc = Document::parse(&html);
    parse_detail_page(&doc, url, sel)
}

pub fn parse_detail_page(doc: &Document, url: &str, sel: &DetailSelectors) -> Result<Geolocation> {
    let Some(map) = doc.select_first(&sel.map) else {
        return Ok(Geolocation::default());
    };

    let lat = map.required_attr("data-latitude", url)?.to_string();
    let lng = map.required_attr("data-longitude", url)?.to_string();
    let accuracy = map.required_attr("data-accuracy", url)?.to_string();

    let href = doc
        .select_first(&sel.map_link)
        .and_then(|a| a.optional_attr("href"))
        .unwrap_or_default();

    Ok(Geolocation {
        lat,
        lng,
        accuracy,
        address: parse_address(href),
    })
}

/// Decodes the address out of a map search link. Anything without the marker yields `""`.
pub fn parse_address(href: &str) -> String {
    let Some(encoded) = href.split(ADDRESS_MARKER).nth(1) else {
        return String::new();
    };

    // form encoding: '+' is a space, then percent escapes
    let plus_decoded = encoded.replace('+', " ");
    let bytes = urlencoding::decode_binary(plus_decoded.as_bytes());

    String::from_utf8_lossy(&bytes)
        .trim_matches(|c| c == ' ' || c == ':')
        .to_string()
}
