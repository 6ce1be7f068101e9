//! Scraper for a public company review site.
//!
//! Walks paginated search results and per-company review listings,
//! extracting fields by class-name fragments and `data-*` flags. All I/O
//! goes through a [`PageFetcher`]; everything else is pure extraction over
//! parsed pages.

pub mod attribute;
pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod pagination;
pub mod pipeline;
pub mod rules;
pub mod urls;

use tpscrape_core::{AppConfig, CompanyRecord, ReviewRecord};

pub use attribute::RequiredAttribute;
pub use config::ScrapeConfig;
pub use error::{ExtractError, ScraperError};
pub use fetch::{HttpFetcher, PageFetcher, RetryPolicy};
pub use pagination::page_count;
pub use pipeline::{CompanyOutcome, PageSource, ScrapeOutcome, SearchRequest, Truncation};
pub use rules::{ExtractionRules, RuleTable};
pub use urls::SiteUrls;

/// Entry point tying a [`PageFetcher`] to a [`ScrapeConfig`].
pub struct Scraper<F> {
    fetcher: F,
    config: ScrapeConfig,
}

impl Scraper<HttpFetcher> {
    /// A scraper fetching over HTTP with settings from `app`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError`] if the rule table does not compile or the
    /// HTTP client cannot be built.
    pub fn from_app_config(app: &AppConfig) -> Result<Self, ScraperError> {
        let config = ScrapeConfig::from_app_config(app)?;
        let fetcher = config.http_fetcher()?;
        Ok(Self::new(fetcher, config))
    }
}

impl<F: PageFetcher> Scraper<F> {
    pub fn new(fetcher: F, config: ScrapeConfig) -> Self {
        Self { fetcher, config }
    }

    #[must_use]
    pub fn config(&self) -> &ScrapeConfig {
        &self.config
    }

    /// Searches companies matching `request`.
    ///
    /// Returns at most `request.max_results` companies in page order, then
    /// node order. Companies appearing on several pages are kept each time.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::Query`] / [`ScraperError::Country`] for invalid
    ///   input, before any request is made.
    /// - [`ScraperError::Forbidden`] when the site refuses a request while
    ///   the run is on its first page with no company gathered. Later
    ///   refusals truncate the outcome.
    /// - Any other fetch failure.
    pub fn search(
        &self,
        request: &SearchRequest,
    ) -> Result<ScrapeOutcome<CompanyRecord>, ScraperError> {
        pipeline::search::search(&self.fetcher, &self.config, request)
    }

    /// Reads up to `count` reviews from a company detail URL or a saved page.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::Forbidden`] when the first page is refused.
    /// - [`ScraperError::LocalFile`] when a saved page cannot be read.
    /// - Any other fetch failure.
    pub fn reviews(
        &self,
        source: &PageSource,
        count: usize,
    ) -> Result<ScrapeOutcome<ReviewRecord>, ScraperError> {
        let doc = source.load(&self.fetcher)?;
        pipeline::reviews::collect_reviews(
            &self.fetcher,
            &self.config.rules,
            &doc,
            source.detail_url(),
            count,
        )
    }

    /// Reads one company from its detail URL or a saved detail page,
    /// optionally with reviews.
    ///
    /// # Errors
    ///
    /// - [`ScraperError::Forbidden`] or another fetch failure on the detail
    ///   page.
    /// - [`ScraperError::LocalFile`] when a saved page cannot be read.
    /// - [`ScraperError::Extract`] when the page lacks the company's name or
    ///   registered URL.
    pub fn company(
        &self,
        source: &PageSource,
        reviews: Option<usize>,
    ) -> Result<CompanyOutcome, ScraperError> {
        pipeline::company::company(&self.fetcher, &self.config, source, reviews)
    }
}
