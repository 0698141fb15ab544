//! Storage Module
//!
//! Implements the in-memory state layer and the filter executor.
//!
//! ## Core Concepts
//! - **Entities**: Anything with a stable string id and a creation timestamp
//!   (posts, comments, tags, votes, bans, invites).
//! - **MemoryStore**: A concurrent map of id to entity. Listings come back
//!   newest-first, the ordering the forum presents by default.
//! - **Candidates**: An ordered working set of searchable documents that the
//!   compiled filter list progressively narrows.

pub mod collection;
pub mod memory;
