//! Scrape command handlers for the CLI.
//!
//! Results are printed to stdout as pretty JSON. Truncated runs still print
//! what was gathered; the scraper has already warned about the refusal.

use anyhow::Context;
use tpscrape_core::{title_case, AppConfig, CountryTable};
use tpscrape_scraper::{PageSource, RequiredAttribute, Scraper, SearchRequest};

fn build_scraper(config: &AppConfig) -> anyhow::Result<Scraper<tpscrape_scraper::HttpFetcher>> {
    Scraper::from_app_config(config).context("failed to build scraper")
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Search companies and print them.
///
/// # Errors
///
/// Returns an error for an invalid query or country, or when the site
/// refuses the first request.
pub(crate) fn run_search(
    config: &AppConfig,
    query: &str,
    country: &str,
    count: usize,
    required: Vec<RequiredAttribute>,
    reviews: Option<usize>,
) -> anyhow::Result<()> {
    let scraper = build_scraper(config)?;

    let mut request = SearchRequest::new(query, country)
        .with_max_results(count)
        .with_required(required);
    if let Some(reviews) = reviews {
        request = request.with_reviews(reviews);
    }

    let outcome = scraper
        .search(&request)
        .with_context(|| format!("search for \"{query}\" failed"))?;
    tracing::info!(
        companies = outcome.items.len(),
        truncated = outcome.is_truncated(),
        "search complete"
    );
    print_json(&outcome.items)
}

/// Read one company from a URL or saved page and print it.
///
/// # Errors
///
/// Returns an error when the detail page cannot be fetched or read, or
/// lacks the company's identity.
pub(crate) fn run_company(
    config: &AppConfig,
    source: &str,
    reviews: Option<usize>,
) -> anyhow::Result<()> {
    let scraper = build_scraper(config)?;
    let outcome = scraper
        .company(&PageSource::detect(source), reviews)
        .with_context(|| format!("failed to scrape company from {source}"))?;
    tracing::info!(
        company = %outcome.company.name,
        truncated = outcome.truncation.is_some(),
        "company complete"
    );
    print_json(&outcome.company)
}

/// Fetch reviews from a URL or saved page and print them.
///
/// # Errors
///
/// Returns an error when the first page cannot be fetched or read.
pub(crate) fn run_reviews(config: &AppConfig, source: &str, count: usize) -> anyhow::Result<()> {
    let scraper = build_scraper(config)?;
    let outcome = scraper
        .reviews(&PageSource::detect(source), count)
        .with_context(|| format!("failed to read reviews from {source}"))?;
    tracing::info!(
        reviews = outcome.items.len(),
        truncated = outcome.is_truncated(),
        "reviews complete"
    );
    print_json(&outcome.items)
}

/// Print every selectable country with its locale code.
pub(crate) fn run_countries() {
    for country in CountryTable::default().iter() {
        println!("{} ({})", title_case(country.name), country.code);
    }
}
