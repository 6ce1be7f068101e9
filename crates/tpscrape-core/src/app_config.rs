use std::fmt;
use std::str::FromStr;

/// Revision of the review site's front-end markup that extraction rules
/// target. The site's generated class names drift; each revision pins one
/// set of class-name fragments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MarkupVersion {
    /// Result cards carry `businessUnitResult` and attribute icons.
    #[default]
    Current,
    /// Result entries are bare `/review/` links with no icons or rating text.
    Legacy2023,
}

impl fmt::Display for MarkupVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MarkupVersion::Current => write!(f, "current"),
            MarkupVersion::Legacy2023 => write!(f, "legacy-2023"),
        }
    }
}

impl FromStr for MarkupVersion {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "current" => Ok(MarkupVersion::Current),
            "legacy-2023" => Ok(MarkupVersion::Legacy2023),
            other => Err(format!(
                "unknown markup version \"{other}\"; expected \"current\" or \"legacy-2023\""
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub log_level: String,
    pub user_agent: String,
    pub markup_version: MarkupVersion,
    pub site_domain: String,
    pub default_country: String,
    pub max_retries: u32,
    pub retry_backoff_base_ms: u64,
    /// `None` leaves the transport's default timeout in place.
    pub request_timeout_secs: Option<u64>,
}
