//! Forum Content Backend Library
//!
//! This library crate defines the core modules that make up the forum backend.
//! It serves as the foundation for the binary executable (`main.rs`).
//!
//! ## Architecture Modules
//! The system is composed of five loosely coupled subsystems:
//!
//! - **`search`**: The core query processing logic. Turns a free-text query string
//!   into an ordered list of inclusion/exclusion filters via a tokenizer, a parser
//!   and a filter compiler.
//! - **`storage`**: The state layer. Implements an in-memory entity store
//!   (`MemoryStore`) plus the candidate-set executor that applies compiled filters.
//! - **`content`**: Posts and comments, their CRUD endpoints, tagset replacement
//!   and comment soft-deletion.
//! - **`engagement`**: Tags and votes, including vote application to document
//!   scores and the tag validation pattern.
//! - **`moderation`**: Bans and invites, including active-ban checks and
//!   per-creator invite listings.

pub mod api;
pub mod content;
pub mod engagement;
pub mod moderation;
pub mod search;
pub mod storage;
