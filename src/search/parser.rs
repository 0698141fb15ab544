//! Query Parser
//!
//! Consumes the token sequence and emits the ordered clause list, validating
//! field-specific value syntax. Date fields must be ISO-8601 calendar dates,
//! score bounds must be base-10 integers; text fields are taken as-is and
//! normalized later by the compiler.

use super::tokenizer::tokenize;
use super::types::{Clause, FieldName, QueryClause, SearchError, TokenKind};
use chrono::NaiveDate;

/// Parses a raw query string into an ordered clause list.
///
/// Aborts on the first syntax or validation error; a partial clause list is
/// never returned.
pub fn parse_query(raw: &str) -> Result<Vec<QueryClause>, SearchError> {
    let tokens = tokenize(raw)?;
    let mut clauses = Vec::new();
    let mut exclude_next = false;

    for token in tokens {
        let clause = match token.kind {
            TokenKind::Exclude => {
                exclude_next = true;
                continue;
            }
            TokenKind::Word(text) | TokenKind::Phrase(text) => Clause::FreeText(text),
            TokenKind::Field { name, value } => parse_field(name, &value)?,
        };

        clauses.push(QueryClause {
            clause,
            exclude: exclude_next,
        });
        exclude_next = false;
    }

    Ok(clauses)
}

/// Dispatches a field clause to its value validator.
fn parse_field(name: FieldName, value: &str) -> Result<Clause, SearchError> {
    match name {
        FieldName::Tag => Ok(Clause::Tag(value.to_string())),
        FieldName::Author => Ok(Clause::Author(value.to_string())),
        FieldName::Title => Ok(Clause::Title(value.to_string())),
        FieldName::Before => Ok(Clause::Before(parse_date(name, value)?)),
        FieldName::After => Ok(Clause::After(parse_date(name, value)?)),
        FieldName::ScoreGte => Ok(Clause::ScoreGte(parse_score(name, value)?)),
        FieldName::ScoreLte => Ok(Clause::ScoreLte(parse_score(name, value)?)),
    }
}

/// Comparison granularity is the calendar date, not time-of-day.
fn parse_date(name: FieldName, value: &str) -> Result<NaiveDate, SearchError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| SearchError::InvalidFieldValue {
        field: name.as_str().to_string(),
        value: value.to_string(),
        expected: "an ISO-8601 date (YYYY-MM-DD)",
    })
}

fn parse_score(name: FieldName, value: &str) -> Result<i64, SearchError> {
    value.parse().map_err(|_| SearchError::InvalidFieldValue {
        field: name.as_str().to_string(),
        value: value.to_string(),
        expected: "a base-10 integer",
    })
}
