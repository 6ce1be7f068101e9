//! Field extraction over parsed pages.
//!
//! Every function takes an already-parsed scope ([`scraper::ElementRef`])
//! and the compiled [`ExtractionRules`](crate::rules::ExtractionRules). No
//! function here performs I/O. Required anchors that are missing surface as
//! [`ExtractError::NotFound`](crate::error::ExtractError::NotFound);
//! optional fields come back as `None`.

pub mod company;
pub mod contact;
pub mod listing;
pub mod review;
pub(crate) mod text;

pub use company::{categories, company_name, extract_company, rating_stats, registered_url, RatingStats};
pub use contact::{classify_contact_lines, classify_line, contact_info, ContactInfo, ContactKind};
pub use listing::{listing_entry, result_nodes, ListingEntry};
pub use review::{extract_review, parse_review_date, review_nodes};
