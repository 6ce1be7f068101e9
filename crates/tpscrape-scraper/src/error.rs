use thiserror::Error;

use tpscrape_core::{CountryError, QueryError};

/// A structural extraction failure: an expected anchor node is absent or
/// its content cannot be interpreted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExtractError {
    #[error("{field} not found on page")]
    NotFound { field: &'static str },

    #[error("malformed {field}: \"{value}\"")]
    Malformed { field: &'static str, value: String },
}

#[derive(Debug, Error)]
pub enum ScraperError {
    /// HTTP 403: the site's anti-scraping measure triggered.
    #[error("forbidden access to {url}: too many requests were made to the site")]
    Forbidden { url: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("unexpected HTTP status {status} from {url}")]
    UnexpectedStatus { status: u16, url: String },

    #[error("extraction error: {0}")]
    Extract(#[from] ExtractError),

    #[error("invalid query: {0}")]
    Query(#[from] QueryError),

    #[error(transparent)]
    Country(#[from] CountryError),

    #[error("unknown required attribute \"{0}\"; expected email, phone or address")]
    UnknownAttribute(String),

    #[error("invalid selector {selector:?} in rule table: {reason}")]
    InvalidSelector { selector: String, reason: String },

    #[error("invalid URL \"{url}\": {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("could not read local page {path}: {source}")]
    LocalFile {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl ScraperError {
    /// `true` when the site refused the request with HTTP 403.
    #[must_use]
    pub fn is_forbidden(&self) -> bool {
        matches!(self, ScraperError::Forbidden { .. })
    }
}
