//! Review card fields. All of them are required.

use chrono::{DateTime, NaiveDateTime, SubsecRound, Utc};
use scraper::ElementRef;

use tpscrape_core::country::title_case;
use tpscrape_core::ReviewRecord;

use crate::error::ExtractError;
use crate::rules::ExtractionRules;

use super::text::{all_text, first};

const PROFILE_PREFIX: &str = "/users/";
const MICROSECOND_DIGITS: u16 = 6;

/// Review cards of a detail page, in document order, at most `limit`.
#[must_use]
pub fn review_nodes<'a>(
    root: ElementRef<'a>,
    rules: &ExtractionRules,
    limit: usize,
) -> Vec<ElementRef<'a>> {
    root.select(&rules.review_card).take(limit).collect()
}

fn author_name(card: ElementRef<'_>, rules: &ExtractionRules) -> Result<String, ExtractError> {
    let name = first(card, &rules.author_name)
        .map(|node| all_text(node).trim().to_owned())
        .filter(|name| !name.is_empty())
        .ok_or(ExtractError::NotFound {
            field: "author name",
        })?;
    Ok(title_case(&name))
}

fn author_id(card: ElementRef<'_>, rules: &ExtractionRules) -> Result<String, ExtractError> {
    let href = first(card, &rules.author_link)
        .and_then(|link| link.value().attr("href"))
        .ok_or(ExtractError::NotFound { field: "author id" })?;
    Ok(href.strip_prefix(PROFILE_PREFIX).unwrap_or(href).to_owned())
}

fn star_rating(card: ElementRef<'_>, rules: &ExtractionRules) -> Result<f64, ExtractError> {
    let alt = first(card, &rules.star_rating_image)
        .and_then(|img| img.value().attr("alt"))
        .ok_or(ExtractError::NotFound {
            field: "star rating",
        })?;
    alt.chars()
        .find(|c| ('0'..='5').contains(c))
        .and_then(|c| c.to_digit(10))
        .map(f64::from)
        .ok_or_else(|| ExtractError::Malformed {
            field: "star rating",
            value: alt.to_owned(),
        })
}

/// Parses a review timestamp. Accepts RFC 3339 (`2024-01-01T17:41:57.000Z`)
/// or a naive ISO 8601 date-time, which is taken as UTC. Precision beyond
/// microseconds is dropped.
///
/// # Errors
///
/// Returns [`ExtractError::Malformed`] for anything else.
pub fn parse_review_date(raw: &str) -> Result<DateTime<Utc>, ExtractError> {
    let raw = raw.trim();
    let parsed = DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|_| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f").map(|naive| naive.and_utc())
        })
        .map_err(|_| ExtractError::Malformed {
            field: "review date",
            value: raw.to_owned(),
        })?;
    Ok(parsed.trunc_subsecs(MICROSECOND_DIGITS))
}

fn review_date(card: ElementRef<'_>, rules: &ExtractionRules) -> Result<DateTime<Utc>, ExtractError> {
    let raw = first(card, &rules.review_date)
        .and_then(|node| node.value().attr("datetime"))
        .ok_or(ExtractError::NotFound {
            field: "review date",
        })?;
    parse_review_date(raw)
}

/// Review body, or the review title when the body is missing. Inline markup
/// splits the text into several runs; they are joined without separators.
fn content(card: ElementRef<'_>, rules: &ExtractionRules) -> Result<Vec<u8>, ExtractError> {
    let node = first(card, &rules.review_text)
        .or_else(|| first(card, &rules.review_title))
        .ok_or(ExtractError::NotFound {
            field: "review content",
        })?;
    Ok(all_text(node).into_bytes())
}

/// Extracts one review card.
///
/// # Errors
///
/// Returns the first [`ExtractError`] among the card's fields.
pub fn extract_review(
    card: ElementRef<'_>,
    rules: &ExtractionRules,
) -> Result<ReviewRecord, ExtractError> {
    Ok(ReviewRecord {
        author_name: author_name(card, rules)?,
        author_id: author_id(card, rules)?,
        star_rating: star_rating(card, rules)?,
        date: review_date(card, rules)?,
        content: content(card, rules)?,
    })
}

#[cfg(test)]
#[path = "review_test.rs"]
mod tests;
