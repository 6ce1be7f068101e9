mod scrape;

use clap::{Parser, Subcommand};
use tpscrape_scraper::RequiredAttribute;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "tpscrape")]
#[command(about = "Scrape companies and reviews from Trustpilot")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search companies by keywords or `city:`, `country:`, `name:` clauses
    Search {
        /// Keyword phrase, or clauses such as "city: Oslo, country: Norway"
        query: String,
        /// Maximum number of companies to return
        #[arg(long, default_value = "10")]
        count: usize,
        /// Site locale to search, e.g. "united kingdom" (defaults to config)
        #[arg(long)]
        country: Option<String>,
        /// Comma-separated attributes every company must have
        #[arg(long, value_delimiter = ',')]
        require: Vec<RequiredAttribute>,
        /// Also fetch up to N reviews per company
        #[arg(long)]
        reviews: Option<usize>,
    },
    /// Read one company from a detail page URL or a saved HTML page
    Company {
        /// `https://...` detail page URL or path to a saved page
        source: String,
        /// Also fetch up to N reviews
        #[arg(long)]
        reviews: Option<usize>,
    },
    /// Fetch reviews from a detail page URL or a saved HTML page
    Reviews {
        /// `https://...` detail page URL or path to a saved page
        source: String,
        /// Maximum number of reviews to return
        #[arg(long, default_value = "20")]
        count: usize,
    },
    /// List the countries accepted by `--country`
    Countries,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = tpscrape_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Search {
            query,
            count,
            country,
            require,
            reviews,
        } => {
            let country = country.unwrap_or_else(|| config.default_country.clone());
            scrape::run_search(&config, &query, &country, count, require, reviews)
        }
        Commands::Company { source, reviews } => scrape::run_company(&config, &source, reviews),
        Commands::Reviews { source, count } => scrape::run_reviews(&config, &source, count),
        Commands::Countries => {
            scrape::run_countries();
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests;
