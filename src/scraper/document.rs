use crate::scraper::scraper_error::{Result, ScraperError};
use scraper::{ElementRef, Html, Selector};

/// Compiles a CSS selector, turning a bad pattern into an `HtmlParse` error.
pub fn selector(css: &str) -> Result<Selector> {
    Selector::parse(css).map_err(|e| ScraperError::HtmlParse(format!("{css}: {e}")))
}

/// A parsed HTML page.
pub struct Document {
    html: Html,
}

impl Document {
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    /// Every match, in document order.
    pub fn select_all(&self, sel: &Selector) -> Vec<Node<'_>> {
        self.html.select(sel).map(Node).collect()
    }

    pub fn select_first(&self, sel: &Selector) -> Option<Node<'_>> {
        self.html.select(sel).next().map(Node)
    }
}

/// One element of a [`Document`].
///
/// Accessors come in two flavours: `optional_*` returns `None` when the markup
/// lacks the value, `required_*` treats absence as a broken markup contract and
/// fails with [`ScraperError::MissingField`].
#[derive(Clone, Copy)]
pub struct Node<'a>(ElementRef<'a>);

impl<'a> Node<'a> {
    pub fn optional_attr(&self, name: &str) -> Option<&'a str> {
        self.0.value().attr(name)
    }

    pub fn required_attr(&self, name: &'static str, context: &str) -> Result<&'a str> {
        self.optional_attr(name)
            .ok_or_else(|| ScraperError::missing(name, context))
    }

    pub fn select_first(&self, sel: &Selector) -> Option<Node<'a>> {
        self.0.select(sel).next().map(Node)
    }

    pub fn required_child(
        &self,
        sel: &Selector,
        field: &'static str,
        context: &str,
    ) -> Result<Node<'a>> {
        self.select_first(sel)
            .ok_or_else(|| ScraperError::missing(field, context))
    }

    /// First text node of the element itself.
    pub fn text(&self) -> Option<&'a str> {
        self.0.text().next()
    }

    /// First text node of the first match of `sel` below this element.
    pub fn optional_text(&self, sel: &Selector) -> Option<&'a str> {
        self.select_first(sel).and_then(|n| n.text())
    }
}
