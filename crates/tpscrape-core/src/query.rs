//! Search query parsing.
//!
//! A query is either a bare keyword phrase (`"burger"`) or a comma-separated
//! list of `field:value` clauses over the fields `city`, `country` and
//! `name` (`"city: Los Angeles, country: United States, name: Burger"`).
//! Whitespace around `:` and `,` is not significant.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

const CLAUSE_SEP: char = ',';
const FIELD_SEP: char = ':';

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryError {
    #[error("a query cannot be empty")]
    Empty,

    #[error("malformed query clause \"{0}\": expected `field:value`")]
    MalformedClause(String),

    #[error("unknown query field \"{0}\"; the only fields that can be searched for are city, country, name")]
    UnknownField(String),

    #[error("field \"{0}\" cannot be searched for twice in the same query")]
    DuplicateField(QueryField),

    #[error("a query restricted to a city must also include the city's country")]
    CityWithoutCountry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryField {
    City,
    Country,
    Name,
}

impl fmt::Display for QueryField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            QueryField::City => write!(f, "city"),
            QueryField::Country => write!(f, "country"),
            QueryField::Name => write!(f, "name"),
        }
    }
}

impl FromStr for QueryField {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "city" => Ok(QueryField::City),
            "country" => Ok(QueryField::Country),
            "name" => Ok(QueryField::Name),
            other => Err(QueryError::UnknownField(other.to_string())),
        }
    }
}

/// Field restrictions parsed from a clause query.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryClauses {
    pub city: Option<String>,
    pub country: Option<String>,
    pub name: Option<String>,
}

impl QueryClauses {
    #[must_use]
    pub fn get(&self, field: QueryField) -> Option<&str> {
        match field {
            QueryField::City => self.city.as_deref(),
            QueryField::Country => self.country.as_deref(),
            QueryField::Name => self.name.as_deref(),
        }
    }

    fn slot(&mut self, field: QueryField) -> &mut Option<String> {
        match field {
            QueryField::City => &mut self.city,
            QueryField::Country => &mut self.country,
            QueryField::Name => &mut self.name,
        }
    }

    /// Text sent to the site's search box for this clause set.
    ///
    /// The country clause only narrows results after the fact; sending it
    /// along with a city floods the results with companies from other
    /// cities. A query holding nothing but a country searches for it.
    #[must_use]
    pub fn search_text(&self) -> String {
        let terms: Vec<&str> = [self.city.as_deref(), self.name.as_deref()]
            .into_iter()
            .flatten()
            .collect();
        if terms.is_empty() {
            self.country.clone().unwrap_or_default()
        } else {
            terms.join(" ")
        }
    }
}

impl fmt::Display for QueryClauses {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for field in [QueryField::City, QueryField::Country, QueryField::Name] {
            if let Some(value) = self.get(field) {
                if !first {
                    write!(f, "{CLAUSE_SEP} ")?;
                }
                write!(f, "{field}{FIELD_SEP} {value}")?;
                first = false;
            }
        }
        Ok(())
    }
}

/// A validated search query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchQuery {
    Keywords(String),
    Clauses(QueryClauses),
}

impl SearchQuery {
    #[must_use]
    pub fn search_text(&self) -> String {
        match self {
            SearchQuery::Keywords(text) => text.clone(),
            SearchQuery::Clauses(clauses) => clauses.search_text(),
        }
    }

    #[must_use]
    pub fn clauses(&self) -> Option<&QueryClauses> {
        match self {
            SearchQuery::Keywords(_) => None,
            SearchQuery::Clauses(clauses) => Some(clauses),
        }
    }
}

impl FromStr for SearchQuery {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse_query(s)
    }
}

/// Parses a query string.
///
/// # Errors
///
/// - [`QueryError::Empty`] for an empty or whitespace-only query.
/// - [`QueryError::MalformedClause`] when a clause lacks exactly one `:` or
///   has an empty field or value.
/// - [`QueryError::UnknownField`] for fields other than city, country, name.
/// - [`QueryError::DuplicateField`] when a field repeats.
/// - [`QueryError::CityWithoutCountry`] when `city` appears without `country`.
pub fn parse_query(query: &str) -> Result<SearchQuery, QueryError> {
    let query = query.trim();
    if query.is_empty() {
        return Err(QueryError::Empty);
    }

    if !query.contains(FIELD_SEP) {
        return Ok(SearchQuery::Keywords(query.to_string()));
    }

    let mut clauses = QueryClauses::default();
    for clause in query.split(CLAUSE_SEP) {
        let mut parts = clause.split(FIELD_SEP);
        let (Some(field), Some(value), None) = (parts.next(), parts.next(), parts.next()) else {
            return Err(QueryError::MalformedClause(clause.trim().to_string()));
        };
        let (field, value) = (field.trim(), value.trim());
        if field.is_empty() || value.is_empty() {
            return Err(QueryError::MalformedClause(clause.trim().to_string()));
        }

        let field: QueryField = field.parse()?;
        let slot = clauses.slot(field);
        if slot.is_some() {
            return Err(QueryError::DuplicateField(field));
        }
        *slot = Some(value.to_string());
    }

    if clauses.city.is_some() && clauses.country.is_none() {
        return Err(QueryError::CityWithoutCountry);
    }

    Ok(SearchQuery::Clauses(clauses))
}

#[cfg(test)]
#[path = "query_test.rs"]
mod tests;
