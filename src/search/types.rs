//! Search Data Types
//!
//! Defines the token and clause representations produced by the query
//! pipeline, the error taxonomy, the `Searchable` document contract and the
//! DTOs for the search API.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The closed set of field keywords recognized in `field:value` clauses.
///
/// Matching against raw input is case-insensitive; adding a field here is a
/// compile-time-checked change because the parser and compiler both match
/// exhaustively on this enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldName {
    Tag,
    Author,
    Title,
    Before,
    After,
    ScoreGte,
    ScoreLte,
}

impl FieldName {
    /// Looks a raw keyword up in the recognized-field table.
    ///
    /// Returns `None` for anything unrecognized, which the tokenizer then
    /// treats as literal word text rather than an error.
    pub fn lookup(raw: &str) -> Option<Self> {
        match raw.to_ascii_lowercase().as_str() {
            "tag" => Some(Self::Tag),
            "author" => Some(Self::Author),
            "title" => Some(Self::Title),
            "before" => Some(Self::Before),
            "after" => Some(Self::After),
            "score_gte" => Some(Self::ScoreGte),
            "score_lte" => Some(Self::ScoreLte),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tag => "tag",
            Self::Author => "author",
            Self::Title => "title",
            Self::Before => "before",
            Self::After => "after",
            Self::ScoreGte => "score_gte",
            Self::ScoreLte => "score_lte",
        }
    }
}

/// One lexical unit of a query string. Tokens only live for the duration of
/// a single parse.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    /// Byte offset into the raw query where the token starts, for error
    /// reporting.
    pub position: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// A bare word, including unrecognized `word:rest` text.
    Word(String),
    /// A double-quoted span with the quotes stripped and interior
    /// whitespace preserved.
    Phrase(String),
    /// A recognized `field:value` clause with a not-yet-validated value.
    Field { name: FieldName, value: String },
    /// A `-` glued to the front of the following token.
    Exclude,
}

/// One parsed unit of a search query: a typed field value.
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    Tag(String),
    Author(String),
    Title(String),
    Before(NaiveDate),
    After(NaiveDate),
    ScoreGte(i64),
    ScoreLte(i64),
    FreeText(String),
}

/// A clause together with its exclusion flag. The parser emits these in
/// input order; order is preserved through compilation for determinism even
/// though final result semantics are order-independent.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryClause {
    pub clause: Clause,
    pub exclude: bool,
}

/// A compiled, field-specific boolean test over one document.
///
/// Text payloads are lowercased at compile time so matching is a plain
/// comparison. This is a data enum rather than a closure so compiled filter
/// lists have structural equality and compilation is testably idempotent.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    TagEquals(String),
    AuthorEquals(String),
    TitleContains(String),
    TextContains(String),
    PostedBefore(NaiveDate),
    PostedAfter(NaiveDate),
    ScoreAtLeast(i64),
    ScoreAtMost(i64),
}

/// A predicate paired with its exclusion flag; the unit the store
/// collaborator consumes.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchFilter {
    pub predicate: Predicate,
    pub exclude: bool,
}

/// The document contract the search core evaluates predicates against.
///
/// Any entity exposing these six attributes can be searched; predicates are
/// pure functions of a single document, never of the candidate set.
pub trait Searchable {
    fn title(&self) -> &str;
    fn body(&self) -> &str;
    fn tags(&self) -> &[String];
    fn author(&self) -> &str;
    fn posted_on(&self) -> NaiveDate;
    fn score(&self) -> i64;
}

/// Coarse classification of a `SearchError`, used for the API error code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Syntax,
    Validation,
    MissingParameter,
}

/// Everything that can go wrong between a raw query string and a compiled
/// filter list. The first error aborts the whole compilation; no partial
/// clause list is ever returned.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    #[error("unterminated quote starting at position {position}")]
    UnterminatedQuote { position: usize },

    #[error("field `{field}` has an empty value at position {position}")]
    EmptyFieldValue { field: String, position: usize },

    #[error("invalid value `{value}` for field `{field}`: expected {expected}")]
    InvalidFieldValue {
        field: String,
        value: String,
        expected: &'static str,
    },

    #[error("no query string supplied, use ?query=")]
    MissingQuery,
}

impl SearchError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::UnterminatedQuote { .. } | Self::EmptyFieldValue { .. } => ErrorKind::Syntax,
            Self::InvalidFieldValue { .. } => ErrorKind::Validation,
            Self::MissingQuery => ErrorKind::MissingParameter,
        }
    }

    /// The stable machine-readable code surfaced in the API error body.
    pub fn code(&self) -> &'static str {
        match self.kind() {
            ErrorKind::Syntax => "search_query_syntax",
            ErrorKind::Validation => "search_query_validation",
            ErrorKind::MissingParameter => "search_query_missing",
        }
    }
}

/// Response returned by the post and comment search endpoints.
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse<T> {
    pub query: String,
    pub total_count: usize,
    pub count: usize,
    pub results: Vec<T>,
}
