use crate::config::ScrapeConfig;
use crate::error::ScraperError;
use crate::extract::extract_company;
use crate::fetch::PageFetcher;

use super::reviews::collect_reviews;
use super::{CompanyOutcome, PageSource};

/// Reads one company from its detail page, with up to `reviews` reviews
/// read from that page onwards.
///
/// There is no listing to fall back on, so rating stats missing from the
/// page stay `None`. A saved page is recorded under its path and its
/// reviews come from that page alone.
pub(crate) fn company<F: PageFetcher>(
    fetcher: &F,
    config: &ScrapeConfig,
    source: &PageSource,
    reviews: Option<usize>,
) -> Result<CompanyOutcome, ScraperError> {
    let doc = source.load(fetcher)?;
    let mut company = extract_company(doc.root_element(), &config.rules, &source.location())?;

    let mut truncation = None;
    if let Some(count) = reviews {
        let outcome = collect_reviews(fetcher, &config.rules, &doc, source.detail_url(), count)?;
        truncation = outcome.truncations.into_iter().next();
        company.reviews = Some(outcome.items);
    }

    Ok(CompanyOutcome {
        company,
        truncation,
    })
}
