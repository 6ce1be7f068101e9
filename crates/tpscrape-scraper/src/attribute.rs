use std::fmt;
use std::str::FromStr;

use crate::error::ScraperError;

/// Contact attribute a company must have registered to be kept in results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RequiredAttribute {
    Email,
    Phone,
    Address,
}

impl RequiredAttribute {
    pub const ALL: [RequiredAttribute; 3] = [
        RequiredAttribute::Email,
        RequiredAttribute::Phone,
        RequiredAttribute::Address,
    ];
}

impl fmt::Display for RequiredAttribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequiredAttribute::Email => write!(f, "email"),
            RequiredAttribute::Phone => write!(f, "phone"),
            RequiredAttribute::Address => write!(f, "address"),
        }
    }
}

impl FromStr for RequiredAttribute {
    type Err = ScraperError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "email" => Ok(RequiredAttribute::Email),
            "phone" => Ok(RequiredAttribute::Phone),
            "address" => Ok(RequiredAttribute::Address),
            _ => Err(ScraperError::UnknownAttribute(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_attributes() {
        assert_eq!(
            "email".parse::<RequiredAttribute>().unwrap(),
            RequiredAttribute::Email
        );
        assert_eq!(
            " Phone ".parse::<RequiredAttribute>().unwrap(),
            RequiredAttribute::Phone
        );
        assert_eq!(
            "ADDRESS".parse::<RequiredAttribute>().unwrap(),
            RequiredAttribute::Address
        );
    }

    #[test]
    fn rejects_unknown_attribute() {
        let err = "fax".parse::<RequiredAttribute>().unwrap_err();
        assert!(matches!(err, ScraperError::UnknownAttribute(ref a) if a == "fax"));
    }

    #[test]
    fn display_round_trips() {
        for attribute in RequiredAttribute::ALL {
            assert_eq!(
                attribute.to_string().parse::<RequiredAttribute>().unwrap(),
                attribute
            );
        }
    }
}
