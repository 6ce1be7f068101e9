//! Total page count of a paginated listing.
//!
//! Search results and review listings share one pagination control:
//!
//! ```text
//! <nav class="pagination_pagination__x">
//!   <a name="pagination-button-previous">…</a>
//!   <a href="/search?query=burger" name="pagination-button-1">1</a>
//!   <a href="/search?query=burger&page=2" name="pagination-button-2">2</a>
//!   …
//!   <a href="/search?query=burger&page=12" name="pagination-button-last">12</a>
//!   <a href="/search?query=burger&page=2" name="pagination-button-next">…</a>
//! </nav>
//! ```
//!
//! Listings with only a few pages drop the "last" button; the highest
//! numbered button then sits right before "next".

use scraper::ElementRef;

use crate::error::ExtractError;
use crate::rules::ExtractionRules;
use crate::urls::PAGE_PARAM;

/// Returns the number of pages of the listing rooted at `root` (always ≥ 1).
///
/// A control whose link has no `page` parameter points at the first page,
/// so the listing has a single page.
///
/// # Errors
///
/// - [`ExtractError::NotFound`] when there is no pagination control. Callers
///   treat that as a single-page listing.
/// - [`ExtractError::Malformed`] when the `page` parameter is not a positive
///   integer.
pub fn page_count(root: ElementRef<'_>, rules: &ExtractionRules) -> Result<u32, ExtractError> {
    let nav = root
        .select(&rules.pagination_nav)
        .next()
        .ok_or(ExtractError::NotFound { field: "pagination" })?;

    let last = nav.select(&rules.pagination_last).next().or_else(|| {
        let buttons: Vec<ElementRef<'_>> = nav.children().filter_map(ElementRef::wrap).collect();
        buttons.len().checked_sub(2).map(|i| buttons[i])
    });

    let Some(page) = last
        .and_then(|button| button.value().attr("href"))
        .and_then(|href| extract_query_param(href, PAGE_PARAM))
    else {
        return Ok(1);
    };

    match page.parse::<u32>() {
        Ok(n) if n >= 1 => Ok(n),
        _ => Err(ExtractError::Malformed {
            field: "pagination",
            value: page,
        }),
    }
}

/// Raw value of `param` in a pagination link such as
/// `/review/acme.com?languages=all&page=7#reviews`.
///
/// Keys match exactly, so `page` never picks up `pageSize`. The value is
/// returned undecoded with any `#fragment` cut off; an empty value counts
/// as absent.
fn extract_query_param(href: &str, param: &str) -> Option<String> {
    let (_, query) = href.split_once('?')?;
    let query = query.split('#').next().unwrap_or(query);

    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find(|(key, value)| *key == param && !value.is_empty())
        .map(|(_, value)| value.to_owned())
}
