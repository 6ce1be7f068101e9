//! Contact block classification.
//!
//! The detail page lists a company's contact data as unlabelled lines inside
//! one `address` element. Each line is classified on its own: a leading
//! digit run is a phone number, an e-mail pattern is an e-mail, and anything
//! else is taken as the address. Malformed phone or e-mail lines therefore
//! end up as the address.

use std::sync::LazyLock;

use regex::Regex;
use scraper::ElementRef;

use crate::rules::ExtractionRules;

use super::text::{first, stripped_runs};

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?\d[\d-]+").expect("valid phone regex"));

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[A-Za-z0-9]+([._-][A-Za-z0-9]+)*@[A-Za-z0-9-]+(\.[A-Za-z]{2,})+")
        .expect("valid email regex")
});

/// Separator used when a contact line is split across several text runs.
const LINE_JOIN: &str = ",";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContactKind {
    Phone,
    Email,
    Address,
}

/// Contact fields of a company. Each is `None` when the page showed none.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactInfo {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

impl ContactInfo {
    fn slot(&mut self, kind: ContactKind) -> &mut Option<String> {
        match kind {
            ContactKind::Phone => &mut self.phone,
            ContactKind::Email => &mut self.email,
            ContactKind::Address => &mut self.address,
        }
    }
}

/// Phone is tested before e-mail; address is the catch-all.
#[must_use]
pub fn classify_line(line: &str) -> ContactKind {
    if PHONE_RE.is_match(line) {
        ContactKind::Phone
    } else if EMAIL_RE.is_match(line) {
        ContactKind::Email
    } else {
        ContactKind::Address
    }
}

/// Classifies `lines` in order. A later line of the same kind replaces an
/// earlier one.
pub fn classify_contact_lines<'a, I>(lines: I) -> ContactInfo
where
    I: IntoIterator<Item = &'a str>,
{
    let mut info = ContactInfo::default();
    for line in lines {
        *info.slot(classify_line(line)) = Some(line.to_owned());
    }
    info
}

/// Reads the contact block from the first side card holding an `address`
/// element. No such card yields an empty [`ContactInfo`].
#[must_use]
pub fn contact_info(root: ElementRef<'_>, rules: &ExtractionRules) -> ContactInfo {
    let Some(block) = root
        .select(&rules.side_column)
        .find_map(|card| first(card, &rules.contact_block))
    else {
        return ContactInfo::default();
    };

    let lines: Vec<String> = block
        .select(&rules.contact_line)
        .map(|li| stripped_runs(li).join(LINE_JOIN))
        .filter(|line| !line.is_empty())
        .collect();

    classify_contact_lines(lines.iter().map(String::as_str))
}

#[cfg(test)]
#[path = "contact_test.rs"]
mod tests;
