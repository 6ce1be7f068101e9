//! URL shapes of the review site.

use reqwest::Url;

use tpscrape_core::Country;

use crate::error::ScraperError;

const SEARCH_PATH: &str = "search";
const QUERY_PARAM: &str = "query";
pub(crate) const PAGE_PARAM: &str = "page";

/// Builds search, detail and paged-detail URLs for one site domain.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteUrls {
    scheme: String,
    domain: String,
}

impl Default for SiteUrls {
    fn default() -> Self {
        Self::new("trustpilot.com")
    }
}

impl SiteUrls {
    #[must_use]
    pub fn new(domain: &str) -> Self {
        Self {
            scheme: "https".to_owned(),
            domain: domain.trim_end_matches('/').to_owned(),
        }
    }

    /// `"www.trustpilot.com"` for the US, `"<code>.trustpilot.com"` otherwise.
    #[must_use]
    pub fn host(&self, country: &Country) -> String {
        format!("{}.{}", country.subdomain(), self.domain)
    }

    /// Search results URL. The `page` parameter is omitted for page 1.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidUrl`] if the configured domain does
    /// not form a valid URL.
    pub fn search_url(
        &self,
        country: &Country,
        search_text: &str,
        page: u32,
    ) -> Result<String, ScraperError> {
        let base = format!("{}://{}/{SEARCH_PATH}", self.scheme, self.host(country));
        let mut url = Url::parse(&base).map_err(|e| ScraperError::InvalidUrl {
            url: base.clone(),
            reason: e.to_string(),
        })?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair(QUERY_PARAM, search_text);
            if page != 1 {
                pairs.append_pair(PAGE_PARAM, &page.to_string());
            }
        }
        Ok(url.into())
    }

    /// Detail page URL for a search result's `/review/...` link, asking the
    /// site to show reviews in every language.
    ///
    /// Absolute links are reduced to their path so the page is always read
    /// from the selected locale.
    #[must_use]
    pub fn company_url(&self, country: &Country, href: &str) -> String {
        let path = match Url::parse(href) {
            Ok(url) => url.path().to_owned(),
            Err(_) => href.split(['?', '#']).next().unwrap_or(href).to_owned(),
        };
        format!(
            "{}://{}{path}?languages=all",
            self.scheme,
            self.host(country)
        )
    }
}

/// URL of review page `page` of a company whose detail URL is `detail_url`.
#[must_use]
pub fn paged_company_url(detail_url: &str, page: u32) -> String {
    if page == 1 {
        return detail_url.to_owned();
    }
    let sep = if detail_url.contains('?') { '&' } else { '?' };
    format!("{detail_url}{sep}{PAGE_PARAM}={page}")
}
