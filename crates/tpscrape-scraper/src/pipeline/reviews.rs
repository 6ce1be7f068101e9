use scraper::{ElementRef, Html};
use tpscrape_core::ReviewRecord;

use crate::error::ScraperError;
use crate::extract::{extract_review, review_nodes};
use crate::fetch::PageFetcher;
use crate::rules::ExtractionRules;
use crate::urls::paged_company_url;

use super::{total_pages, truncate_on_forbidden, ScrapeOutcome};

/// Collects up to `count` reviews starting from an already parsed first
/// page.
///
/// With a `detail_url`, later pages are fetched as `<detail_url>&page=<n>`
/// up to the first page's pagination count. Without one the first page is
/// the only page. A refused later page always truncates, whatever was
/// gathered before it.
pub(crate) fn collect_reviews<F: PageFetcher>(
    fetcher: &F,
    rules: &ExtractionRules,
    first_page: &Html,
    detail_url: Option<&str>,
    count: usize,
) -> Result<ScrapeOutcome<ReviewRecord>, ScraperError> {
    let mut outcome = ScrapeOutcome::default();
    if count == 0 {
        return Ok(outcome);
    }

    push_reviews(first_page.root_element(), rules, count, &mut outcome.items);

    let Some(detail_url) = detail_url else {
        return Ok(outcome);
    };
    let total = total_pages(first_page, rules, detail_url);

    let mut page = 2;
    while page <= total && outcome.items.len() < count {
        let url = paged_company_url(detail_url, page);
        tracing::debug!(url, page, total, "fetching review page");
        match fetcher.fetch(&url) {
            Ok(html) => {
                let doc = Html::parse_document(&html);
                push_reviews(doc.root_element(), rules, count, &mut outcome.items);
            }
            Err(e) => {
                outcome
                    .truncations
                    .push(truncate_on_forbidden(e, false, outcome.items.len())?);
                break;
            }
        }
        page += 1;
    }

    Ok(outcome)
}

/// Extracts review cards of one page until `items` holds `count` entries.
/// Cards missing a field are skipped.
fn push_reviews(
    root: ElementRef<'_>,
    rules: &ExtractionRules,
    count: usize,
    items: &mut Vec<ReviewRecord>,
) {
    let limit = count.saturating_sub(items.len());
    for card in review_nodes(root, rules, limit) {
        match extract_review(card, rules) {
            Ok(review) => items.push(review),
            Err(e) => tracing::warn!(error = %e, "skipping unreadable review"),
        }
    }
}
