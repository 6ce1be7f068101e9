//! Search result (listing) node fields.
//!
//! A result node carries just enough to decide whether the company is worth
//! a detail fetch: its `/review/` link, display name, location, coarse
//! rating text and, on current markup, one icon per registered contact
//! attribute.

use scraper::ElementRef;

use tpscrape_core::QueryClauses;

use crate::attribute::RequiredAttribute;
use crate::rules::ExtractionRules;

use super::text::{collapse_whitespace, first, parse_review_count, parse_score, stripped_runs};

/// Position of the score among the rating text runs
/// (`"TrustScore" "4.4" "|" "2,989" "reviews"`).
const RATING_SCORE_RUN: usize = 1;
const RATING_COUNT_RUN: usize = 3;

/// What a search result shows about one company.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingEntry {
    /// Site-relative detail link, e.g. `"/review/www.burgerking.dk"`.
    pub href: Option<String>,
    pub name: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
    pub score: Option<f64>,
    pub review_count: Option<u64>,
    /// Attributes whose icon the node shows. `None` when the markup shows no
    /// icons at all, so presence cannot be judged from the listing.
    pub attributes: Option<Vec<RequiredAttribute>>,
}

impl ListingEntry {
    /// `Some(true)` when every attribute in `required` has its icon, `None`
    /// when the listing cannot tell.
    #[must_use]
    pub fn has_attributes(&self, required: &[RequiredAttribute]) -> Option<bool> {
        let shown = self.attributes.as_ref()?;
        Some(required.iter().all(|attribute| shown.contains(attribute)))
    }

    /// Case-insensitive substring match of the listing against the query's
    /// field clauses.
    ///
    /// A `country` clause (alone or with `city`) requires the listing to show
    /// a location.
    #[must_use]
    pub fn matches_clauses(&self, clauses: &QueryClauses) -> bool {
        if let Some(wanted) = clauses.name.as_deref() {
            if !contains_ignore_case(self.name.as_deref(), wanted) {
                return false;
            }
        }
        if let Some(wanted) = clauses.city.as_deref() {
            if !contains_ignore_case(self.city.as_deref(), wanted) {
                return false;
            }
        }
        if let Some(wanted) = clauses.country.as_deref() {
            if !contains_ignore_case(self.country.as_deref(), wanted) {
                return false;
            }
        }
        true
    }
}

fn contains_ignore_case(haystack: Option<&str>, needle: &str) -> bool {
    haystack.is_some_and(|h| h.to_lowercase().contains(&needle.to_lowercase()))
}

/// Result nodes of a search page, in document order, at most `limit`.
#[must_use]
pub fn result_nodes<'a>(
    root: ElementRef<'a>,
    rules: &ExtractionRules,
    limit: usize,
) -> Vec<ElementRef<'a>> {
    root.select(&rules.result_node).take(limit).collect()
}

/// Reads every listing field of one result node.
#[must_use]
pub fn listing_entry(node: ElementRef<'_>, rules: &ExtractionRules) -> ListingEntry {
    let link = match &rules.result_link {
        Some(selector) => first(node, selector),
        None => Some(node),
    };
    let href = link
        .and_then(|a| a.value().attr("href"))
        .map(str::to_owned);

    let name = first(node, &rules.result_name)
        .map(|n| stripped_runs(n).join(" "))
        .filter(|n| !n.is_empty());

    let location = first(node, &rules.result_location).map(stripped_runs);
    let city = location
        .as_ref()
        .and_then(|runs| runs.first())
        .map(|run| (*run).to_owned());
    let country = location
        .as_ref()
        .and_then(|runs| runs.last())
        .map(|run| (*run).to_owned());

    let rating_runs = rules
        .result_rating_text
        .as_ref()
        .and_then(|selector| first(node, selector))
        .map(stripped_runs)
        .unwrap_or_default();
    let score = rating_runs
        .get(RATING_SCORE_RUN)
        .and_then(|run| parse_score(run));
    let review_count = rating_runs
        .get(RATING_COUNT_RUN)
        .and_then(|run| parse_review_count(run));

    let attributes = rules.attribute_icons.map(|icons| {
        let paths: Vec<String> = node
            .select(&rules.icon_path)
            .filter_map(|path| path.value().attr("d"))
            .map(collapse_whitespace)
            .collect();
        RequiredAttribute::ALL
            .into_iter()
            .filter(|attribute| paths.iter().any(|d| d == icons.path_for(*attribute)))
            .collect()
    });

    ListingEntry {
        href,
        name,
        city,
        country,
        score,
        review_count,
        attributes,
    }
}

#[cfg(test)]
#[path = "listing_test.rs"]
mod tests;
