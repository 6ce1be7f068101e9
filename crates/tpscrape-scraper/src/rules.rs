//! Versioned extraction rule tables.
//!
//! The review site generates class names like `styles_websiteUrl__a1b2c`,
//! where only the semantic fragment before the hash is stable. Every rule
//! below matches on that fragment (`[class*="..."]`) or on a `data-*` flag
//! attribute. When the markup drifts, add a [`RuleTable`] for the new
//! revision; extraction code never changes.

use scraper::Selector;

use tpscrape_core::MarkupVersion;

use crate::attribute::RequiredAttribute;
use crate::error::ScraperError;

/// SVG `path` data of the icons a search result shows next to each contact
/// attribute the company registered. Stored whitespace-normalized.
#[derive(Debug, Clone, Copy)]
pub struct AttributeIcons {
    pub email: &'static str,
    pub phone: &'static str,
    pub address: &'static str,
}

impl AttributeIcons {
    #[must_use]
    pub fn path_for(&self, attribute: RequiredAttribute) -> &'static str {
        match attribute {
            RequiredAttribute::Email => self.email,
            RequiredAttribute::Phone => self.phone,
            RequiredAttribute::Address => self.address,
        }
    }
}

/// Raw selector strings for one markup revision.
#[derive(Debug, Clone, Copy)]
pub struct RuleTable {
    // search results
    pub result_node: &'static str,
    /// `None` when the result node is itself the `/review/` link.
    pub result_link: Option<&'static str>,
    pub result_name: &'static str,
    pub result_location: &'static str,
    /// Coarse "TrustScore 4.4 | 2,989 reviews" text. Absent on old markup.
    pub result_rating_text: Option<&'static str>,
    /// Absent when result nodes carry no attribute icons.
    pub attribute_icons: Option<AttributeIcons>,

    // company detail page
    pub title_heading: &'static str,
    pub display_name: &'static str,
    pub website_url: &'static str,
    pub review_count: &'static str,
    pub rating: &'static str,
    pub side_column: &'static str,
    pub contact_block: &'static str,
    pub contact_line: &'static str,
    pub categories_list: &'static str,
    pub category_link: &'static str,

    // pagination
    pub pagination_nav: &'static str,
    pub pagination_last: &'static str,

    // reviews
    pub review_card: &'static str,
    pub author_name: &'static str,
    pub author_link: &'static str,
    pub star_rating_image: &'static str,
    pub review_date: &'static str,
    pub review_text: &'static str,
    pub review_title: &'static str,
}

const CURRENT_ICONS: AttributeIcons = AttributeIcons {
    email: "M0 2.5h16v11H0v-11Zm1.789 1L8 9.173 14.211 3.5H1.79ZM15 4.134l-7 6.393-7-6.393V12.5h14V4.134Z",
    phone: concat!(
        "m4.622.933.04.057.003.006L6.37 3.604l.002.003a1.7 1.7 0 0 1-.442 2.29l-.036.029",
        "c-.392.325-.627.519-.652.85-.026.364.206 1.09 1.562 2.445 1.356 1.357 2.073 1.58 ",
        "2.426 1.55.318-.027.503-.252.816-.632l.057-.069a1.7 1.7 0 0 1 2.29-.442l.003.002 ",
        "2.608 1.705.006.004c.204.141.454.37.649.645.188.267.376.655.31 1.09-.031.213-.147.495",
        "-.305.774a4.534 4.534 0 0 1-.715.941C14.323 15.422 13.377 16 12.1 16c-1.236 0-2.569",
        "-.483-3.877-1.246-1.315-.768-2.642-1.84-3.877-3.075C3.112 10.444 2.033 9.118 1.26 ",
        "7.8.49 6.49 0 5.15 0 3.9c0-1.274.52-2.215 1.144-2.845C1.751.442 2.478.098 2.954.03",
        "c.507-.072.896.088 1.182.327.224.187.387.43.486.576Zm-1.127.191a.46.46 0 0 0-.4-.104",
        "c-.223.032-.758.25-1.24.738C1.393 2.227 1 2.924 1 3.9c0 1.001.398 2.161 1.122 3.394",
        ".72 1.226 1.74 2.486 2.932 3.678 1.19 1.19 2.45 2.204 3.673 2.918 1.23.718 2.384 ",
        "1.11 3.373 1.11.949 0 1.652-.422 2.138-.914.245-.247.43-.508.556-.73.134-.237.181",
        "-.393.186-.43.01-.065-.014-.19-.139-.366a1.737 1.737 0 0 0-.396-.396l-2.59-1.693a",
        ".7.7 0 0 0-.946.19l-.011.017-.013.016-.08.098c-.261.33-.723.91-1.491.975-.841.07",
        "-1.85-.47-3.218-1.838-1.369-1.37-1.912-2.381-1.85-3.225.056-.783.638-1.25.97-1.517",
        "l.09-.072.016-.013.016-.011a.7.7 0 0 0 .191-.946l-1.694-2.59-.051-.076c-.104-.152",
        "-.182-.265-.29-.355Z",
    ),
    address: "M8 4a2.5 2.5 0 1 0 0 5 2.5 2.5 0 0 0 0-5ZM4.5 6.5a3.5 3.5 0 1 1 7 0 3.5 3.5 0 0 1-7 0Z",
};

const CURRENT: RuleTable = RuleTable {
    result_node: r#"[class*="businessUnitResult"]"#,
    result_link: Some(r#"a[href*="/review/"]"#),
    result_name: r#"[class*="styles_displayName"]"#,
    result_location: r#"[class*="styles_location"]"#,
    result_rating_text: Some(r#"[class*="ratingText"]"#),
    attribute_icons: Some(CURRENT_ICONS),

    title_heading: r#"h1[class*="title_title"]"#,
    display_name: r#"[class*="title_displayName"]"#,
    website_url: r#"[class*="styles_websiteUrl"]"#,
    review_count: r#"[data-reviews-count-typography="true"]"#,
    rating: r#"[data-rating-typography="true"]"#,
    side_column: r#"[class*="styles_sideColumnCard"][class*="paper_paper"]"#,
    contact_block: "address",
    contact_line: r#"li[class*="styles_contactInfoElement"]"#,
    categories_list: r#"[class*="styles_categoriesList"]"#,
    category_link: r#"a[href*="/categories/"]"#,

    pagination_nav: r#"nav[class*="pagination_pagination"]"#,
    pagination_last: r#"[name="pagination-button-last"]"#,

    review_card: r#"[class*="styles_reviewCardInner"]"#,
    author_name: r#"[data-consumer-name-typography="true"]"#,
    author_link: r#"[data-consumer-profile-link="true"]"#,
    star_rating_image: r#"[class*="star-rating"] img"#,
    review_date: r#"[data-service-review-date-time-ago="true"]"#,
    review_text: r#"[data-service-review-text-typography="true"]"#,
    review_title: r#"h2[data-service-review-title-typography="true"]"#,
};

const LEGACY_2023: RuleTable = RuleTable {
    result_node: r#"a[href*="/review/"]"#,
    result_link: None,
    result_name: r#"p[class*="styles_displayName"]"#,
    result_rating_text: None,
    attribute_icons: None,
    ..CURRENT
};

impl RuleTable {
    #[must_use]
    pub fn for_version(version: MarkupVersion) -> &'static RuleTable {
        match version {
            MarkupVersion::Current => &CURRENT,
            MarkupVersion::Legacy2023 => &LEGACY_2023,
        }
    }
}

/// A [`RuleTable`] compiled into selectors, built once per scraper.
#[derive(Debug)]
pub struct ExtractionRules {
    pub version: MarkupVersion,
    pub result_node: Selector,
    pub result_link: Option<Selector>,
    pub result_name: Selector,
    pub result_location: Selector,
    pub result_rating_text: Option<Selector>,
    pub attribute_icons: Option<AttributeIcons>,
    pub icon_path: Selector,

    pub title_heading: Selector,
    pub display_name: Selector,
    pub website_url: Selector,
    pub review_count: Selector,
    pub rating: Selector,
    pub side_column: Selector,
    pub contact_block: Selector,
    pub contact_line: Selector,
    pub categories_list: Selector,
    pub category_link: Selector,

    pub pagination_nav: Selector,
    pub pagination_last: Selector,

    pub review_card: Selector,
    pub author_name: Selector,
    pub author_link: Selector,
    pub star_rating_image: Selector,
    pub review_date: Selector,
    pub review_text: Selector,
    pub review_title: Selector,
}

fn compile(selector: &'static str) -> Result<Selector, ScraperError> {
    Selector::parse(selector).map_err(|e| ScraperError::InvalidSelector {
        selector: selector.to_owned(),
        reason: e.to_string(),
    })
}

impl ExtractionRules {
    /// Compiles the rule table for `version`.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidSelector`] if any selector in the table
    /// does not parse.
    pub fn new(version: MarkupVersion) -> Result<Self, ScraperError> {
        Self::from_table(version, RuleTable::for_version(version))
    }

    /// Compiles an arbitrary rule table.
    ///
    /// # Errors
    ///
    /// Returns [`ScraperError::InvalidSelector`] if any selector in the table
    /// does not parse.
    pub fn from_table(version: MarkupVersion, table: &RuleTable) -> Result<Self, ScraperError> {
        Ok(Self {
            version,
            result_node: compile(table.result_node)?,
            result_link: table.result_link.map(compile).transpose()?,
            result_name: compile(table.result_name)?,
            result_location: compile(table.result_location)?,
            result_rating_text: table.result_rating_text.map(compile).transpose()?,
            attribute_icons: table.attribute_icons,
            icon_path: compile("path[d]")?,

            title_heading: compile(table.title_heading)?,
            display_name: compile(table.display_name)?,
            website_url: compile(table.website_url)?,
            review_count: compile(table.review_count)?,
            rating: compile(table.rating)?,
            side_column: compile(table.side_column)?,
            contact_block: compile(table.contact_block)?,
            contact_line: compile(table.contact_line)?,
            categories_list: compile(table.categories_list)?,
            category_link: compile(table.category_link)?,

            pagination_nav: compile(table.pagination_nav)?,
            pagination_last: compile(table.pagination_last)?,

            review_card: compile(table.review_card)?,
            author_name: compile(table.author_name)?,
            author_link: compile(table.author_link)?,
            star_rating_image: compile(table.star_rating_image)?,
            review_date: compile(table.review_date)?,
            review_text: compile(table.review_text)?,
            review_title: compile(table.review_title)?,
        })
    }
}
