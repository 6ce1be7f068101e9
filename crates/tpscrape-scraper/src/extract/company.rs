//! Company detail page fields.

use scraper::ElementRef;

use tpscrape_core::CompanyRecord;

use crate::error::ExtractError;
use crate::rules::ExtractionRules;

use super::contact::contact_info;
use super::text::{all_text, first, parse_review_count, parse_score, stripped_runs};

/// Review count and score, which the site renders side by side.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RatingStats {
    pub review_count: u64,
    pub score: f64,
}

/// First text run of the display name inside the title heading.
///
/// # Errors
///
/// Returns [`ExtractError::NotFound`] when the heading, its display-name
/// node, or any text inside it is missing.
pub fn company_name(root: ElementRef<'_>, rules: &ExtractionRules) -> Result<String, ExtractError> {
    let not_found = ExtractError::NotFound {
        field: "company name",
    };
    let heading = first(root, &rules.title_heading).ok_or(not_found.clone())?;
    let display = first(heading, &rules.display_name).ok_or(not_found.clone())?;
    stripped_runs(display)
        .first()
        .map(|run| (*run).to_owned())
        .ok_or(not_found)
}

/// The URL the company registered with the site, e.g. `"www.burgerking.dk"`.
///
/// Returned exactly as shown: every text run of the node concatenated, not
/// trimmed and not normalized.
///
/// # Errors
///
/// Returns [`ExtractError::NotFound`] when the node is missing or empty.
pub fn registered_url(root: ElementRef<'_>, rules: &ExtractionRules) -> Result<String, ExtractError> {
    let url = first(root, &rules.website_url)
        .map(all_text)
        .filter(|text| !text.trim().is_empty());
    url.ok_or(ExtractError::NotFound {
        field: "registered url",
    })
}

/// Review count and score of a detail page.
///
/// Returns `Ok(None)` when the page has no review-count node. The detail
/// page of a company whose own site went offline shows a reduced layout
/// without one.
///
/// # Errors
///
/// - [`ExtractError::NotFound`] if the count is present but the score is not.
/// - [`ExtractError::Malformed`] if either value cannot be parsed.
pub fn rating_stats(
    root: ElementRef<'_>,
    rules: &ExtractionRules,
) -> Result<Option<RatingStats>, ExtractError> {
    let Some(count_node) = first(root, &rules.review_count) else {
        return Ok(None);
    };
    let count_text = all_text(count_node);
    let review_count = parse_review_count(&count_text).ok_or_else(|| ExtractError::Malformed {
        field: "review count",
        value: count_text.trim().to_owned(),
    })?;

    let score_node = first(root, &rules.rating).ok_or(ExtractError::NotFound { field: "score" })?;
    let score_text = all_text(score_node);
    let score = parse_score(&score_text).ok_or_else(|| ExtractError::Malformed {
        field: "score",
        value: score_text.trim().to_owned(),
    })?;

    Ok(Some(RatingStats {
        review_count,
        score,
    }))
}

/// Link texts of the category list, or `None` when the page has no list.
#[must_use]
pub fn categories(root: ElementRef<'_>, rules: &ExtractionRules) -> Option<Vec<String>> {
    let list = first(root, &rules.categories_list)?;
    Some(
        list.select(&rules.category_link)
            .map(|link| stripped_runs(link).join(" "))
            .filter(|name| !name.is_empty())
            .collect(),
    )
}

/// Extracts a full [`CompanyRecord`] from a detail page fetched from
/// `site_url`. `reviews` is left `None`.
///
/// Rating stats that cannot be read are logged and left `None`; the caller
/// may backfill them.
///
/// # Errors
///
/// Returns [`ExtractError::NotFound`] when the name or registered URL is
/// missing. Without them the record has no identity.
pub fn extract_company(
    root: ElementRef<'_>,
    rules: &ExtractionRules,
    site_url: &str,
) -> Result<CompanyRecord, ExtractError> {
    let name = company_name(root, rules)?;
    let registered_url = registered_url(root, rules)?;

    let stats = rating_stats(root, rules).unwrap_or_else(|e| {
        tracing::debug!(url = site_url, error = %e, "rating stats unreadable on detail page");
        None
    });
    let contact = contact_info(root, rules);

    Ok(CompanyRecord {
        name,
        registered_url,
        review_count: stats.map(|s| s.review_count),
        score: stats.map(|s| s.score),
        categories: categories(root, rules),
        email: contact.email,
        phone: contact.phone,
        address: contact.address,
        site_url: site_url.to_owned(),
        reviews: None,
    })
}

#[cfg(test)]
#[path = "company_test.rs"]
mod tests;
