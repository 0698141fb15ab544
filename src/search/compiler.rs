//! Filter Compiler
//!
//! Maps each parsed clause to a predicate paired with its exclusion flag.
//! Compilation is pure and stateless: validation already happened in the
//! parser, so it cannot fail, and the output list has the same length and
//! order as the clause list.

use super::types::{Clause, Predicate, QueryClause, SearchFilter, Searchable};

/// Compiles an ordered clause list into an ordered filter list, one filter
/// per clause. Text payloads are lowercased here so matching is a plain
/// comparison.
pub fn compile_filters(clauses: &[QueryClause]) -> Vec<SearchFilter> {
    clauses
        .iter()
        .map(|qc| SearchFilter {
            predicate: compile_clause(&qc.clause),
            exclude: qc.exclude,
        })
        .collect()
}

fn compile_clause(clause: &Clause) -> Predicate {
    match clause {
        Clause::Tag(text) => Predicate::TagEquals(text.to_lowercase()),
        Clause::Author(text) => Predicate::AuthorEquals(text.to_lowercase()),
        Clause::Title(text) => Predicate::TitleContains(text.to_lowercase()),
        Clause::FreeText(text) => Predicate::TextContains(text.to_lowercase()),
        Clause::Before(date) => Predicate::PostedBefore(*date),
        Clause::After(date) => Predicate::PostedAfter(*date),
        Clause::ScoreGte(bound) => Predicate::ScoreAtLeast(*bound),
        Clause::ScoreLte(bound) => Predicate::ScoreAtMost(*bound),
    }
}

impl Predicate {
    /// Evaluates this predicate against one document.
    ///
    /// Tag and author matching is exact (case-insensitive); title and free
    /// text match as substrings; date comparisons are strict.
    pub fn matches<D: Searchable + ?Sized>(&self, doc: &D) -> bool {
        match self {
            Predicate::TagEquals(wanted) => {
                doc.tags().iter().any(|tag| tag.to_lowercase() == *wanted)
            }
            Predicate::AuthorEquals(wanted) => doc.author().to_lowercase() == *wanted,
            Predicate::TitleContains(needle) => doc.title().to_lowercase().contains(needle),
            Predicate::TextContains(needle) => {
                doc.title().to_lowercase().contains(needle)
                    || doc.body().to_lowercase().contains(needle)
            }
            Predicate::PostedBefore(date) => doc.posted_on() < *date,
            Predicate::PostedAfter(date) => doc.posted_on() > *date,
            Predicate::ScoreAtLeast(bound) => doc.score() >= *bound,
            Predicate::ScoreAtMost(bound) => doc.score() <= *bound,
        }
    }
}
