//! Pagination-driven scraping pipelines.
//!
//! Each run is strictly sequential: fetch a page, extract it, then decide
//! whether to fetch the next one. A forbidden response (HTTP 403) is fatal
//! only while the run is still on its first page with nothing gathered.
//! Anywhere later it ends the run early instead, and the outcome records a
//! [`Truncation`] even when that later page left nothing to return.

pub(crate) mod company;
pub(crate) mod reviews;
pub(crate) mod search;

use std::fmt;
use std::path::{Path, PathBuf};

use scraper::Html;
use tpscrape_core::CompanyRecord;

use crate::error::ScraperError;
use crate::fetch::PageFetcher;
use crate::pagination::page_count;
use crate::rules::ExtractionRules;

pub use search::SearchRequest;

/// A non-fatal forbidden response that ended a run before it was complete.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Truncation {
    /// The request the site refused.
    pub url: String,
    /// Items gathered before the refusal.
    pub gathered: usize,
}

impl fmt::Display for Truncation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "forbidden access to {}: too many requests were made to the site; returning the {} items fetched so far",
            self.url, self.gathered
        )
    }
}

/// Items gathered by a run, in site order, plus any truncation.
#[derive(Debug, Clone, PartialEq)]
pub struct ScrapeOutcome<T> {
    pub items: Vec<T>,
    pub truncations: Vec<Truncation>,
}

impl<T> Default for ScrapeOutcome<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            truncations: Vec::new(),
        }
    }
}

impl<T> ScrapeOutcome<T> {
    /// `true` when the run stopped early on a forbidden response.
    #[must_use]
    pub fn is_truncated(&self) -> bool {
        !self.truncations.is_empty()
    }

    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }
}

/// A single company fetched by its detail URL.
#[derive(Debug, Clone, PartialEq)]
pub struct CompanyOutcome {
    pub company: CompanyRecord,
    /// Set when its review run stopped early.
    pub truncation: Option<Truncation>,
}

/// Where a company detail page is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageSource {
    /// A company detail URL, e.g.
    /// `https://www.trustpilot.com/review/www.burgerking.dk?languages=all`.
    Url(String),
    /// A saved detail page. Read as a single page; nothing is fetched.
    File(PathBuf),
}

impl PageSource {
    /// `http(s)://` locations are URLs, anything else a local path.
    #[must_use]
    pub fn detect(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            PageSource::Url(location.to_owned())
        } else {
            PageSource::File(PathBuf::from(location))
        }
    }

    /// The URL later pages hang off. Saved pages have none.
    #[must_use]
    pub fn detail_url(&self) -> Option<&str> {
        match self {
            PageSource::Url(url) => Some(url),
            PageSource::File(_) => None,
        }
    }

    /// Display form recorded as a company's `site_url`.
    pub(crate) fn location(&self) -> String {
        match self {
            PageSource::Url(url) => url.clone(),
            PageSource::File(path) => path.display().to_string(),
        }
    }

    /// Fetches or reads the first page.
    pub(crate) fn load<F: PageFetcher>(&self, fetcher: &F) -> Result<Html, ScraperError> {
        let html = match self {
            PageSource::Url(url) => {
                tracing::debug!(url, "fetching detail page");
                fetcher.fetch(url)?
            }
            PageSource::File(path) => {
                tracing::debug!(path = %path.display(), "reading saved page");
                read_local_page(path)?
            }
        };
        Ok(Html::parse_document(&html))
    }
}

fn read_local_page(path: &Path) -> Result<String, ScraperError> {
    std::fs::read_to_string(path).map_err(|source| ScraperError::LocalFile {
        path: path.display().to_string(),
        source,
    })
}

/// Applies the forbidden policy to a failed fetch.
///
/// A forbidden response while still on the first page with nothing
/// gathered hands `err` back. Anywhere else it yields the [`Truncation`] to
/// record, `gathered` possibly zero. Other errors are always handed back.
pub(crate) fn truncate_on_forbidden(
    err: ScraperError,
    first_page: bool,
    gathered: usize,
) -> Result<Truncation, ScraperError> {
    match err {
        ScraperError::Forbidden { url } if !first_page || gathered > 0 => {
            let truncation = Truncation { url, gathered };
            tracing::warn!(
                url = %truncation.url,
                gathered,
                "forbidden access; returning partial results"
            );
            Ok(truncation)
        }
        other => Err(other),
    }
}

/// Page count of a listing's first page. A missing or unreadable
/// pagination control is read as a single page.
pub(crate) fn total_pages(doc: &Html, rules: &ExtractionRules, url: &str) -> u32 {
    match page_count(doc.root_element(), rules) {
        Ok(pages) => pages,
        Err(e) => {
            tracing::debug!(url, error = %e, "no usable pagination control; single page");
            1
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn forbidden_on_first_page_with_nothing_gathered_is_fatal() {
        let err = ScraperError::Forbidden {
            url: "https://www.trustpilot.com/review/acme.com?languages=all".to_owned(),
        };
        assert!(truncate_on_forbidden(err, true, 0).unwrap_err().is_forbidden());
    }

    #[test]
    fn forbidden_on_first_page_after_gathering_truncates() {
        let err = ScraperError::Forbidden {
            url: "https://www.trustpilot.com/review/acme.com?languages=all".to_owned(),
        };
        let truncation = truncate_on_forbidden(err, true, 3).unwrap();
        assert_eq!(truncation.gathered, 3);
    }

    #[test]
    fn forbidden_on_later_page_truncates_even_with_nothing_gathered() {
        let err = ScraperError::Forbidden {
            url: "https://www.trustpilot.com/search?query=burger&page=2".to_owned(),
        };
        let truncation = truncate_on_forbidden(err, false, 0).unwrap();
        assert_eq!(truncation.gathered, 0);
        assert!(truncation.to_string().contains("page=2"));
    }

    #[test]
    fn other_errors_pass_through() {
        let err = ScraperError::UnexpectedStatus {
            status: 500,
            url: "https://www.trustpilot.com/search?query=burger&page=2".to_owned(),
        };
        assert!(matches!(
            truncate_on_forbidden(err, false, 3),
            Err(ScraperError::UnexpectedStatus { status: 500, .. })
        ));
    }

    #[test]
    fn detects_page_source_kind() {
        let url = PageSource::detect("https://www.trustpilot.com/review/acme.com?languages=all");
        assert_eq!(
            url,
            PageSource::Url("https://www.trustpilot.com/review/acme.com?languages=all".to_owned())
        );
        assert_eq!(
            url.detail_url(),
            Some("https://www.trustpilot.com/review/acme.com?languages=all")
        );

        let file = PageSource::detect("saved/acme.html");
        assert_eq!(file, PageSource::File(PathBuf::from("saved/acme.html")));
        assert_eq!(file.detail_url(), None);
        assert_eq!(file.location(), "saved/acme.html");
    }
}
