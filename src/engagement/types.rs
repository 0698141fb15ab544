//! Engagement Data Types
//!
//! Tag and vote entities plus their request DTOs and the tag validation
//! pattern.

use crate::storage::memory::Entity;
use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Pattern every stored tag text must match: no commas or semicolons (they
/// delimit tagset update strings), length capped so tags fit on a line.
pub const TAG_TEXT_PATTERN: &str = r"^[^,;]{1,60}$";

pub fn tag_text_valid(text: &str) -> bool {
    Regex::new(TAG_TEXT_PATTERN).unwrap().is_match(text)
}

/// A tag on a post, comment, or other taggable item.
///
/// Tag text is stored case-sensitively and searched case-insensitively.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    pub id: String,
    pub author: String,
    pub document_id: String,
    /// What kind of media was tagged ("post", "comment").
    pub doc_type: String,
    pub created_at: DateTime<Utc>,
    pub text: String,
}

/// A vote on a post, comment, or other votable item.
///
/// `vote_type` follows the original's `smallUpvote` naming scheme; anything
/// containing `Downvote` counts against the target's score. `power` is the
/// number of points the vote is worth.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vote {
    pub id: String,
    pub author: String,
    pub document_id: String,
    pub voted_at: DateTime<Utc>,
    pub vote_type: String,
    pub power: i64,
}

impl Vote {
    /// The signed score delta this vote applies to its target.
    pub fn signed_power(&self) -> i64 {
        if self.vote_type.contains("Downvote") {
            -self.power
        } else {
            self.power
        }
    }
}

impl Entity for Tag {
    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Entity for Vote {
    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.voted_at
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateTagRequest {
    pub author: String,
    pub document_id: String,
    pub doc_type: Option<String>,
    pub text: String,
}

/// Listing filters matching the original's filterable tag fields.
#[derive(Debug, Deserialize)]
pub struct TagListParams {
    pub document_id: Option<String>,
    pub author: Option<String>,
    pub text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TagValidationResponse {
    pub pattern: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateVoteRequest {
    pub author: String,
    pub document_id: String,
    pub vote_type: Option<String>,
    pub power: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct VoteListParams {
    pub document_id: Option<String>,
    pub author: Option<String>,
}
