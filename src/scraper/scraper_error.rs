use thiserror::Error;

pub type Result<T> = core::result::Result<T, ScraperError>;

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("Network error: {0}")]
    Network(String),

    #[error("HTML parse error: {0}")]
    HtmlParse(String),

    /// A field the listing markup always carries was not found.
    #[error("Missing required field `{field}` in {context}")]
    MissingField {
        field: &'static str,
        context: String,
    },

    #[error("Unparseable listing timestamp {value:?}: {source}")]
    Timestamp {
        value: String,
        source: chrono::ParseError,
    },

    #[error("Invalid url {url:?}: {source}")]
    InvalidUrl {
        url: String,
        source: url::ParseError,
    },

    #[error("Config error: {0}")]
    Config(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<reqwest::Error> for ScraperError {
    fn from(e: reqwest::Error) -> Self {
        ScraperError::Network(e.to_string())
    }
}

impl ScraperError {
    pub(crate) fn missing(field: &'static str, context: impl Into<String>) -> Self {
        ScraperError::MissingField {
            field,
            context: context.into(),
        }
    }
}
