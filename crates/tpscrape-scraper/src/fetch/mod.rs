//! Page fetching: the only I/O the scraper performs.

mod retry;

use std::time::Duration;

use reqwest::blocking::Client;

use crate::error::ScraperError;

pub use retry::RetryPolicy;

/// Fetches the markup behind a URL.
///
/// Implementations must report HTTP 403 as [`ScraperError::Forbidden`] so the
/// pipelines can tell throttling apart from other transport failures.
pub trait PageFetcher {
    /// # Errors
    ///
    /// - [`ScraperError::Forbidden`] when the site answers 403.
    /// - Any other transport failure, surfaced unchanged.
    fn fetch(&self, url: &str) -> Result<String, ScraperError>;
}

impl<F: PageFetcher + ?Sized> PageFetcher for &F {
    fn fetch(&self, url: &str) -> Result<String, ScraperError> {
        (**self).fetch(url)
    }
}

/// Blocking HTTP fetcher with a fixed browser-like `User-Agent`.
///
/// Non-2xx responses become typed errors: 403 is [`ScraperError::Forbidden`],
/// everything else [`ScraperError::UnexpectedStatus`]. Transient failures are
/// retried only when the [`RetryPolicy`] allows it; the default never retries.
pub struct HttpFetcher {
    client: Client,
    retry: RetryPolicy,
}

impl HttpFetcher {
    /// Creates a fetcher sending `user_agent` with every request.
    ///
    /// `timeout_secs` of `None` keeps the transport's default timeout.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::Http`] if the underlying client cannot be
    /// constructed (e.g., invalid TLS config).
    pub fn new(
        user_agent: &str,
        timeout_secs: Option<u64>,
        retry: RetryPolicy,
    ) -> Result<Self, ScraperError> {
        let mut builder = Client::builder().user_agent(user_agent);
        if let Some(secs) = timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        Ok(Self {
            client: builder.build()?,
            retry,
        })
    }

    fn fetch_once(&self, url: &str) -> Result<String, ScraperError> {
        tracing::debug!(url, "fetching page");
        let response = self
            .client
            .get(url)
            .header(
                reqwest::header::ACCEPT,
                "text/html,application/xhtml+xml;q=0.9,*/*;q=0.8",
            )
            .send()?;
        let status = response.status();

        if status == reqwest::StatusCode::FORBIDDEN {
            return Err(ScraperError::Forbidden {
                url: url.to_owned(),
            });
        }

        if !status.is_success() {
            return Err(ScraperError::UnexpectedStatus {
                status: status.as_u16(),
                url: url.to_owned(),
            });
        }

        Ok(response.text()?)
    }
}

impl PageFetcher for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, ScraperError> {
        retry::retry_with_backoff(self.retry, || self.fetch_once(url))
    }
}
