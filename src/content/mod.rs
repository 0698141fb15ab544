//! Content Module
//!
//! Posts and comments: the documents the rest of the backend tags, votes on
//! and searches.
//!
//! ## Responsibilities
//! - **CRUD**: Create, list, fetch, update and delete posts and comments.
//! - **Tagsets**: Replace a post's full tag set from a comma-separated list,
//!   with the validation rules the original interface enforced.
//! - **Soft deletion**: Deleted comments stay stored but are never served.

pub mod handlers;
pub mod types;
