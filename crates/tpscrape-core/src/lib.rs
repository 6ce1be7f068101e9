pub mod app_config;
pub mod config;
pub mod country;
pub mod query;
pub mod records;

pub use app_config::{AppConfig, MarkupVersion};
pub use config::{load_app_config, load_app_config_from_env, DEFAULT_USER_AGENT};
pub use country::{title_case, Country, CountryError, CountryTable};
pub use query::{parse_query, QueryClauses, QueryError, QueryField, SearchQuery};
pub use records::{CompanyRecord, ReviewRecord};

use thiserror::Error;

/// Every setting has a default, so only a present but unusable value fails.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },
}
