use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::ValidationError;

const MAX_QUERY_LEN: usize = 120;

/// User-supplied ticker or company name, trimmed and length-bounded.
///
/// Free-form on purpose: the provider accepts "GOOGL" and "Apple Inc." alike,
/// so no ticker grammar is enforced here.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Query(String);

impl Query {
    pub fn parse(input: &str) -> Result<Self, ValidationError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyQuery);
        }

        let len = trimmed.chars().count();
        if len > MAX_QUERY_LEN {
            return Err(ValidationError::QueryTooLong {
                len,
                max: MAX_QUERY_LEN,
            });
        }

        Ok(Self(trimmed.to_owned()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for Query {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Query {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl TryFrom<&str> for Query {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::parse(value)
    }
}

impl From<Query> for String {
    fn from(value: Query) -> Self {
        value.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trims_surrounding_whitespace() {
        let query = Query::parse("  Apple Inc. ").expect("query should parse");
        assert_eq!(query.as_str(), "Apple Inc.");
    }

    #[test]
    fn rejects_empty_query() {
        let err = Query::parse("   ").expect_err("must fail");
        assert!(matches!(err, ValidationError::EmptyQuery));
    }

    #[test]
    fn rejects_overlong_query() {
        let err = Query::parse(&"x".repeat(200)).expect_err("must fail");
        assert!(matches!(err, ValidationError::QueryTooLong { .. }));
    }
}
