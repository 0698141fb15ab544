//! Search Service Module
//!
//! The core component responsible for turning free-text query strings into
//! ordered filter lists applied against posts and comments.
//!
//! ## Pipeline
//! Raw string → **tokenizer** (token sequence) → **parser** (ordered clause
//! list with validated values) → **filter compiler** (predicate/exclude
//! pairs) → the storage layer's candidate executor, which folds the filters
//! over the document set.
//!
//! The whole pipeline is pure, synchronous and request-local: it performs no
//! I/O, holds no locks, and any number of queries may compile concurrently.
//!
//! ## Submodules
//! - **`tokenizer`**: Splits the raw query into words, quoted phrases, field
//!   clauses and exclusion markers.
//! - **`parser`**: Validates field values (dates, integers) and emits the
//!   clause list.
//! - **`compiler`**: Maps clauses one-to-one onto document predicates.
//! - **`handlers`**: HTTP endpoints for post and comment search.
//! - **`types`**: Tokens, clauses, predicates, the `Searchable` contract and
//!   the error taxonomy.

pub mod compiler;
pub mod handlers;
pub mod parser;
pub mod tokenizer;
pub mod types;

#[cfg(test)]
mod tests;
