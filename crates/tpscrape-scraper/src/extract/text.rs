//! Text-level helpers shared by the extractors.

use scraper::{ElementRef, Selector};

/// Thousands separators seen across locales: `2,989`, `2.989`, `2 989`
/// with a no-break, narrow no-break or thin space.
const THOUSANDS_SEPARATORS: [char; 5] = ['.', ',', '\u{00A0}', '\u{202F}', '\u{2009}'];

pub(crate) fn first<'a>(scope: ElementRef<'a>, selector: &Selector) -> Option<ElementRef<'a>> {
    scope.select(selector).next()
}

/// Text runs of `element` with surrounding whitespace removed, empty runs
/// dropped.
pub(crate) fn stripped_runs(element: ElementRef<'_>) -> Vec<&str> {
    element
        .text()
        .map(str::trim)
        .filter(|run| !run.is_empty())
        .collect()
}

/// Every text run of `element` concatenated, untouched.
pub(crate) fn all_text(element: ElementRef<'_>) -> String {
    element.text().collect()
}

/// Collapses every whitespace run to a single space and trims the ends.
pub(crate) fn collapse_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Parses a review count such as `"2,989"`, `"1.234 total"` or
/// `"12\u{202f}345"`.
///
/// Reads the digit run starting at the first ASCII digit, skipping
/// thousands separators inside it.
pub(crate) fn parse_review_count(raw: &str) -> Option<u64> {
    let start = raw.find(|c: char| c.is_ascii_digit())?;
    let digits: String = raw[start..]
        .chars()
        .take_while(|c| c.is_ascii_digit() || THOUSANDS_SEPARATORS.contains(c))
        .filter(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

/// Parses a score, accepting `,` as the decimal separator (`"4,4"`).
pub(crate) fn parse_score(raw: &str) -> Option<f64> {
    raw.trim().replace(',', ".").parse().ok()
}

#[cfg(test)]
#[path = "text_test.rs"]
mod tests;
