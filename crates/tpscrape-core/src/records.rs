use std::borrow::Cow;

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};

/// A company as scraped from its detail page on the review site.
///
/// `name`, `registered_url` and `site_url` are always populated. Every other
/// field is `None` when the page did not show it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyRecord {
    pub name: String,
    /// The site's identifier for the company, e.g. `"www.burgerking.dk"` or
    /// `"burgerking.no"`. Kept exactly as displayed; never normalized.
    pub registered_url: String,
    pub review_count: Option<u64>,
    /// Aggregate score, typically `0.0..=5.0`.
    pub score: Option<f64>,
    pub categories: Option<Vec<String>>,
    pub email: Option<String>,
    pub phone: Option<String>,
    /// Free-form address line, fragments joined with `,`. When present the
    /// last fragment is the country.
    pub address: Option<String>,
    /// Fully qualified detail-page URL the record was scraped from.
    pub site_url: String,
    /// Reviews in site order. `None` unless reviews were requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reviews: Option<Vec<ReviewRecord>>,
}

impl CompanyRecord {
    /// Returns the last comma-separated fragment of the address.
    #[must_use]
    pub fn country(&self) -> Option<&str> {
        self.address_fragments()?.last().copied()
    }

    /// Returns the second-to-last comma-separated fragment of the address,
    /// if the address has at least two fragments.
    #[must_use]
    pub fn city(&self) -> Option<&str> {
        let fragments = self.address_fragments()?;
        if fragments.len() < 2 {
            return None;
        }
        fragments.get(fragments.len() - 2).copied()
    }

    fn address_fragments(&self) -> Option<Vec<&str>> {
        let address = self.address.as_deref()?;
        let fragments: Vec<&str> = address
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        if fragments.is_empty() {
            None
        } else {
            Some(fragments)
        }
    }
}

/// A single review left on a company's detail page.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReviewRecord {
    pub author_name: String,
    /// Opaque profile identifier, e.g. `"56bd70ff98f61d001203539e"`.
    pub author_id: String,
    /// Whole-star rating in `0.0..=5.0`.
    pub star_rating: f64,
    pub date: DateTime<Utc>,
    /// UTF-8 bytes of the review body as published.
    #[serde(serialize_with = "serialize_lossy_utf8")]
    pub content: Vec<u8>,
}

impl ReviewRecord {
    /// Returns the review body as text, replacing invalid UTF-8 sequences.
    #[must_use]
    pub fn content_text(&self) -> Cow<'_, str> {
        String::from_utf8_lossy(&self.content)
    }
}

fn serialize_lossy_utf8<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    serializer.serialize_str(&String::from_utf8_lossy(bytes))
}

#[cfg(test)]
#[path = "records_test.rs"]
mod tests;
