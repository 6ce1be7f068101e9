use tpscrape_core::{AppConfig, CountryTable, MarkupVersion, DEFAULT_USER_AGENT};

use crate::error::ScraperError;
use crate::fetch::{HttpFetcher, RetryPolicy};
use crate::rules::ExtractionRules;
use crate::urls::SiteUrls;

/// Immutable scraping configuration, built once and shared by every run.
#[derive(Debug)]
pub struct ScrapeConfig {
    pub countries: CountryTable,
    pub rules: ExtractionRules,
    pub urls: SiteUrls,
    pub user_agent: String,
    pub retry: RetryPolicy,
    /// `None` keeps the transport's default timeout.
    pub request_timeout_secs: Option<u64>,
}

impl ScrapeConfig {
    /// Defaults for the public site with rules for `version`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidSelector`] if the rule table does not
    /// compile.
    pub fn new(version: MarkupVersion) -> Result<Self, ScraperError> {
        Ok(Self {
            countries: CountryTable::default(),
            rules: ExtractionRules::new(version)?,
            urls: SiteUrls::default(),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
            retry: RetryPolicy::none(),
            request_timeout_secs: None,
        })
    }

    /// Builds the configuration from environment-derived settings.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidSelector`] if the rule table does not
    /// compile.
    pub fn from_app_config(app: &AppConfig) -> Result<Self, ScraperError> {
        Ok(Self {
            countries: CountryTable::default(),
            rules: ExtractionRules::new(app.markup_version)?,
            urls: SiteUrls::new(&app.site_domain),
            user_agent: app.user_agent.clone(),
            retry: RetryPolicy {
                max_retries: app.max_retries,
                backoff_base_ms: app.retry_backoff_base_ms,
            },
            request_timeout_secs: app.request_timeout_secs,
        })
    }

    /// An HTTP fetcher honouring this configuration's user agent, timeout
    /// and retry policy.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the HTTP client cannot be built.
    pub fn http_fetcher(&self) -> Result<HttpFetcher, ScraperError> {
        HttpFetcher::new(&self.user_agent, self.request_timeout_secs, self.retry)
    }
}
