//! Country names accepted by the scraper and the site locale each one selects.
//!
//! Search results and visible reviews differ between locales, so every run
//! targets exactly one of these.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CountryError {
    #[error("the country \"{name}\" is not available; the available countries are {available}")]
    Unknown { name: String, available: String },
}

/// One selectable country and its site locale code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Country {
    /// Lowercase human-readable name, e.g. `"united kingdom"`.
    pub name: &'static str,
    /// Locale code used as the site's subdomain, e.g. `"uk"`.
    pub code: &'static str,
}

impl Country {
    /// Subdomain of the site for this locale. The US locale lives on `www`.
    #[must_use]
    pub fn subdomain(&self) -> &'static str {
        if self.code == "us" {
            "www"
        } else {
            self.code
        }
    }
}

const COUNTRIES: &[Country] = &[
    Country { name: "united states", code: "us" },
    Country { name: "united kingdom", code: "uk" },
    Country { name: "espana", code: "es" },
    Country { name: "danmark", code: "dk" },
    Country { name: "osterreich", code: "at" },
    Country { name: "schweiz", code: "ch" },
    Country { name: "deutschland", code: "de" },
    Country { name: "australia", code: "au" },
    Country { name: "canada", code: "ca" },
    Country { name: "ireland", code: "ie" },
    Country { name: "new zealand", code: "nz" },
    Country { name: "suomi", code: "fi" },
    Country { name: "belgique", code: "fr-be" },
    Country { name: "belgie", code: "nl-be" },
    Country { name: "france", code: "fr" },
    Country { name: "italia", code: "it" },
    Country { name: "japan", code: "jp" },
    Country { name: "norge", code: "no" },
    Country { name: "nederland", code: "nl" },
    Country { name: "polska", code: "pl" },
    Country { name: "brasil", code: "br" },
    Country { name: "portugal", code: "pt" },
    Country { name: "sverige", code: "se" },
];

/// Closed set of countries the scraper can target.
#[derive(Debug, Clone)]
pub struct CountryTable {
    countries: &'static [Country],
}

impl Default for CountryTable {
    fn default() -> Self {
        Self {
            countries: COUNTRIES,
        }
    }
}

impl CountryTable {
    /// Looks up a country by name, ignoring case and surrounding whitespace.
    ///
    /// # Errors
    ///
    /// Returns [`CountryError::Unknown`] with the list of valid names when
    /// `name` is not in the table.
    pub fn resolve(&self, name: &str) -> Result<Country, CountryError> {
        let wanted = name.trim().to_lowercase();
        self.countries
            .iter()
            .find(|c| c.name == wanted)
            .copied()
            .ok_or_else(|| CountryError::Unknown {
                name: name.to_string(),
                available: self.pretty_list(),
            })
    }

    #[must_use]
    pub fn iter(&self) -> impl Iterator<Item = &Country> {
        self.countries.iter()
    }

    /// Human-readable listing: `"United States, United Kingdom, ... and Sverige"`.
    #[must_use]
    pub fn pretty_list(&self) -> String {
        let names: Vec<String> = self.countries.iter().map(|c| title_case(c.name)).collect();
        match names.split_last() {
            None => String::new(),
            Some((last, [])) => last.clone(),
            Some((last, rest)) => format!("{} and {last}", rest.join(", ")),
        }
    }
}

/// Uppercases every letter that follows a non-letter and lowercases the rest.
#[must_use]
pub fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_letter = false;
    for ch in s.chars() {
        if ch.is_alphabetic() {
            if prev_is_letter {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(ch);
            prev_is_letter = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_case_insensitively() {
        let table = CountryTable::default();
        let country = table.resolve("  United Kingdom ").unwrap();
        assert_eq!(country.code, "uk");
        assert_eq!(country.subdomain(), "uk");
    }

    #[test]
    fn us_locale_uses_www_subdomain() {
        let country = CountryTable::default().resolve("united states").unwrap();
        assert_eq!(country.code, "us");
        assert_eq!(country.subdomain(), "www");
    }

    #[test]
    fn belgian_locales_are_distinct() {
        let table = CountryTable::default();
        assert_eq!(table.resolve("belgique").unwrap().code, "fr-be");
        assert_eq!(table.resolve("belgie").unwrap().code, "nl-be");
    }

    #[test]
    fn unknown_country_lists_valid_names() {
        let err = CountryTable::default().resolve("atlantis").unwrap_err();
        let message = err.to_string();
        assert!(message.contains("atlantis"));
        assert!(message.contains("United States, United Kingdom, Espana"));
        assert!(message.ends_with("Portugal and Sverige"));
    }

    #[test]
    fn table_holds_twenty_three_countries() {
        assert_eq!(CountryTable::default().iter().count(), 23);
    }

    #[test]
    fn title_case_capitalizes_each_word() {
        assert_eq!(title_case("new zealand"), "New Zealand");
        assert_eq!(title_case("JOHN o'neil"), "John O'Neil");
    }
}
