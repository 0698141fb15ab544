//! Moderation Module
//!
//! Bans ("disinvites" in the interface) and invite codes.
//!
//! ## Responsibilities
//! - **Bans**: CRUD over ban records plus the active-ban check used at
//!   login time.
//! - **Invites**: Invite code creation and listing, including a creator's
//!   view of their own codes.

pub mod handlers;
pub mod types;
