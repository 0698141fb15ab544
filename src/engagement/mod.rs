//! Engagement Module
//!
//! Tags and votes: the lightweight records users attach to posts and
//! comments.
//!
//! ## Responsibilities
//! - **Tags**: CRUD over tag rows plus the validation pattern endpoint
//!   clients use to pre-validate tag text.
//! - **Votes**: Vote recording and application of signed vote power to the
//!   target document's score.

pub mod handlers;
pub mod types;
