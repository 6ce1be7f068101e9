use std::ops::ControlFlow;

use scraper::{ElementRef, Html};
use tpscrape_core::{parse_query, CompanyRecord, Country, SearchQuery};

use crate::attribute::RequiredAttribute;
use crate::config::ScrapeConfig;
use crate::error::ScraperError;
use crate::extract::{extract_company, listing_entry, result_nodes, ListingEntry};
use crate::fetch::PageFetcher;

use super::reviews::collect_reviews;
use super::{total_pages, truncate_on_forbidden, ScrapeOutcome};

const DEFAULT_MAX_RESULTS: usize = 10;

/// Parameters of a company search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Keyword phrase or `field:value` clauses (see [`tpscrape_core::parse_query`]).
    pub query: String,
    /// Country name selecting the site locale, e.g. `"united kingdom"`.
    pub country: String,
    pub max_results: usize,
    /// Every listed attribute must be present for a company to be kept.
    pub required: Vec<RequiredAttribute>,
    /// Reviews to fetch per company. `None` skips reviews entirely.
    pub reviews: Option<usize>,
}

impl SearchRequest {
    /// A request for up to 10 companies, no attribute filter, no reviews.
    #[must_use]
    pub fn new(query: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            country: country.into(),
            max_results: DEFAULT_MAX_RESULTS,
            required: Vec::new(),
            reviews: None,
        }
    }

    #[must_use]
    pub fn with_max_results(mut self, max_results: usize) -> Self {
        self.max_results = max_results;
        self
    }

    #[must_use]
    pub fn with_required(mut self, required: Vec<RequiredAttribute>) -> Self {
        self.required = required;
        self
    }

    #[must_use]
    pub fn with_reviews(mut self, count: usize) -> Self {
        self.reviews = Some(count);
        self
    }
}

/// State of one search run.
struct SearchRun<'a, F> {
    fetcher: &'a F,
    config: &'a ScrapeConfig,
    request: &'a SearchRequest,
    query: SearchQuery,
    country: Country,
    outcome: ScrapeOutcome<CompanyRecord>,
}

/// Runs a company search.
///
/// The query and country are validated before any request is made.
pub(crate) fn search<F: PageFetcher>(
    fetcher: &F,
    config: &ScrapeConfig,
    request: &SearchRequest,
) -> Result<ScrapeOutcome<CompanyRecord>, ScraperError> {
    let query = parse_query(&request.query)?;
    let country = config.countries.resolve(&request.country)?;

    if request.max_results == 0 {
        return Ok(ScrapeOutcome::default());
    }

    SearchRun {
        fetcher,
        config,
        request,
        query,
        country,
        outcome: ScrapeOutcome::default(),
    }
    .run()
}

impl<F: PageFetcher> SearchRun<'_, F> {
    fn run(mut self) -> Result<ScrapeOutcome<CompanyRecord>, ScraperError> {
        let search_text = self.query.search_text();
        let first_url = self.config.urls.search_url(&self.country, &search_text, 1)?;
        tracing::debug!(url = %first_url, query = %self.request.query, "starting search");

        let mut doc = Html::parse_document(&self.fetcher.fetch(&first_url)?);
        let total = total_pages(&doc, &self.config.rules, &first_url);

        let mut page = 1;
        loop {
            if self.collect_page(doc.root_element(), page)?.is_break() {
                break;
            }

            page += 1;
            if page > total || self.outcome.items.len() >= self.request.max_results {
                break;
            }

            let url = self.config.urls.search_url(&self.country, &search_text, page)?;
            tracing::debug!(url, page, total, "fetching search page");
            match self.fetcher.fetch(&url) {
                Ok(html) => doc = Html::parse_document(&html),
                Err(e) => {
                    self.truncate(e, false)?;
                    break;
                }
            }
        }

        tracing::debug!(
            companies = self.outcome.items.len(),
            truncated = self.outcome.is_truncated(),
            "search finished"
        );
        Ok(self.outcome)
    }

    /// Processes the result nodes of one page, limited to the number of
    /// companies still wanted. Breaks when the run was truncated.
    fn collect_page(
        &mut self,
        root: ElementRef<'_>,
        page: u32,
    ) -> Result<ControlFlow<()>, ScraperError> {
        let config = self.config;
        let rules = &config.rules;
        let limit = self
            .request
            .max_results
            .saturating_sub(self.outcome.items.len());

        for node in result_nodes(root, rules, limit) {
            let entry = listing_entry(node, rules);
            if !self.keep_listing(&entry) {
                continue;
            }
            let Some(href) = entry.href.as_deref() else {
                tracing::warn!(name = ?entry.name, "search result without company link; skipped");
                continue;
            };

            let detail_url = config.urls.company_url(&self.country, href);
            let html = match self.fetcher.fetch(&detail_url) {
                Ok(html) => html,
                Err(e) => {
                    self.truncate(e, page == 1)?;
                    return Ok(ControlFlow::Break(()));
                }
            };

            if self.add_company(&entry, &detail_url, &html)?.is_break() {
                return Ok(ControlFlow::Break(()));
            }
        }
        Ok(ControlFlow::Continue(()))
    }

    /// Filters applied before the detail fetch: query clauses and, when the
    /// markup shows attribute icons, required attributes.
    fn keep_listing(&self, entry: &ListingEntry) -> bool {
        if let Some(clauses) = self.query.clauses() {
            if !entry.matches_clauses(clauses) {
                tracing::debug!(name = ?entry.name, "result does not match query clauses");
                return false;
            }
        }
        if entry.has_attributes(&self.request.required) == Some(false) {
            tracing::debug!(name = ?entry.name, "result lacks a required attribute");
            return false;
        }
        true
    }

    fn add_company(
        &mut self,
        entry: &ListingEntry,
        detail_url: &str,
        html: &str,
    ) -> Result<ControlFlow<()>, ScraperError> {
        let config = self.config;
        let rules = &config.rules;
        let doc = Html::parse_document(html);

        let mut company = match extract_company(doc.root_element(), rules, detail_url) {
            Ok(company) => company,
            Err(e) => {
                tracing::warn!(url = detail_url, error = %e, "skipping company without identity");
                return Ok(ControlFlow::Continue(()));
            }
        };

        if company.review_count.is_none() && company.score.is_none() {
            company.review_count = entry.review_count;
            company.score = entry.score;
        }

        if entry.attributes.is_none() && !has_contact_fields(&company, &self.request.required) {
            tracing::debug!(url = detail_url, "company lacks a required attribute");
            return Ok(ControlFlow::Continue(()));
        }

        let Some(count) = self.request.reviews else {
            self.outcome.items.push(company);
            return Ok(ControlFlow::Continue(()));
        };

        // The detail page is the review run's first page, so a refused
        // review page always comes back as a truncation.
        let reviews = collect_reviews(self.fetcher, rules, &doc, Some(detail_url), count)?;
        let truncated = reviews.is_truncated();
        self.outcome.truncations.extend(reviews.truncations);
        company.reviews = Some(reviews.items);
        self.outcome.items.push(company);
        Ok(if truncated {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        })
    }

    fn truncate(&mut self, err: ScraperError, first_page: bool) -> Result<(), ScraperError> {
        let truncation = truncate_on_forbidden(err, first_page, self.outcome.items.len())?;
        self.outcome.truncations.push(truncation);
        Ok(())
    }
}

/// Whether the extracted contact fields cover every required attribute.
fn has_contact_fields(company: &CompanyRecord, required: &[RequiredAttribute]) -> bool {
    required.iter().all(|attribute| match attribute {
        RequiredAttribute::Email => company.email.is_some(),
        RequiredAttribute::Phone => company.phone.is_some(),
        RequiredAttribute::Address => company.address.is_some(),
    })
}
