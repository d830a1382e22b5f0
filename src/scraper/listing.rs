use crate::domain::{parse_timestamp, Listing};
use crate::scraper::document::{selector, Node};
use crate::scraper::scraper_error::{Result, ScraperError};
use scraper::Selector;

/// Value returned by [`int_prefix`] when the composite string has no matching token.
pub const MISSING_COUNT: &str = "0";

/// Selectors for the pieces of a `p.row` listing on a results page.
pub struct ListingSelectors {
    line1: Selector,
    line2: Selector,
    time: Selector,
    link: Selector,
    title: Selector,
    price: Selector,
    neighb: Selector,
    housing: Selector,
}

impl ListingSelectors {
    pub fn new() -> Result<Self> {
        Ok(Self {
            line1: selector("span.txt > span.pl")?,
            line2: selector("span.txt > span.l2")?,
            time: selector("time")?,
            link: selector("a[href]")?,
            title: selector("a > span")?,
            price: selector("span.price")?,
            neighb: selector("span.pnr > small")?,
            housing: selector("span.housing")?,
        })
    }
}

/// Reads one listing row.
///
/// pid, both info lines, the timestamp and the link are part of the markup
/// contract; any of them missing fails the whole run.
pub fn parse_listing(item: Node<'_>, sel: &ListingSelectors) -> Result<Listing> {
    let pid = item.required_attr("data-pid", "listing row")?.to_string();
    let context = format!("listing {pid}");

    let line1 = item.required_child(&sel.line1, "line1", &context)?;
    let line2 = item.required_child(&sel.line2, "line2", &context)?;

    let dt = line1
        .select_first(&sel.time)
        .and_then(|t| t.optional_attr("datetime"))
        .ok_or_else(|| ScraperError::missing("datetime", context.as_str()))?
        .to_string();
    let url = line1
        .required_child(&sel.link, "href", &context)?
        .required_attr("href", &context)?
        .to_string();
    let title = line1.optional_text(&sel.title).unwrap_or_default().to_string();

    let price = line2
        .optional_text(&sel.price)
        .unwrap_or_default()
        .trim_matches('$')
        .to_string();
    let neighb = line2
        .optional_text(&sel.neighb)
        .unwrap_or_default()
        .trim_matches(|c| c == ' ' || c == '(' || c == ')')
        .to_string();
    let housing = line2.optional_text(&sel.housing).unwrap_or_default();

    let timestamp = parse_timestamp(&dt).map_err(|source| ScraperError::Timestamp {
        value: dt.clone(),
        source,
    })?;

    Ok(Listing {
        pid,
        dt,
        timestamp,
        url,
        title,
        price,
        neighb,
        beds: int_prefix(housing, "br"), // "1br" .. "8br" or missing
        sqft: int_prefix(housing, "ft"), // "450ft" or missing
    })
}

/// Pulls a labelled count out of a housing string like `"/ 2br - 900ft -"`.
///
/// The first space-separated token containing `label` is returned with the
/// label removed once. The remainder is not checked to be numeric.
pub fn int_prefix(composite: &str, label: &str) -> String {
    composite
        .split(' ')
        .find(|token| token.contains(label))
        .map(|token| token.replacen(label, "", 1))
        .unwrap_or_else(|| MISSING_COUNT.to_string())
}
