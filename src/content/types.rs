//! Content Data Types
//!
//! The post and comment entities plus the request DTOs for their endpoints.

use crate::storage::memory::Entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A forum post.
///
/// `posted_at` is the time the post became available, as opposed to draft
/// creation. `url` is a link submitted to create a link post, not the post's
/// own address. Scores default to 1 (the author's implicit upvote).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: String,
    pub posted_at: DateTime<Utc>,
    pub author: String,
    pub title: String,
    pub url: Option<String>,
    pub slug: String,
    pub body: String,
    pub base_score: i64,
    pub vote_count: i64,
    pub comment_count: i64,
    pub view_count: i64,
    pub draft: bool,
}

/// A comment on a post, optionally replying to another comment.
///
/// `is_deleted` hides the comment from every listing and search without
/// destroying the record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub author: String,
    pub post_id: String,
    pub parent_comment_id: Option<String>,
    pub posted_at: DateTime<Utc>,
    pub base_score: i64,
    pub body: String,
    pub is_deleted: bool,
}

impl Entity for Post {
    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.posted_at
    }
}

impl Entity for Comment {
    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.posted_at
    }
}

#[derive(Debug, Deserialize)]
pub struct CreatePostRequest {
    pub author: String,
    pub title: String,
    pub body: String,
    pub url: Option<String>,
    pub slug: Option<String>,
    #[serde(default)]
    pub draft: bool,
}

/// Partial update; absent fields keep their current value. `author` names
/// the caller and must match the post's author.
#[derive(Debug, Deserialize)]
pub struct UpdatePostRequest {
    pub author: String,
    pub title: Option<String>,
    pub body: Option<String>,
    pub url: Option<String>,
    pub draft: Option<bool>,
}

#[derive(Debug, Deserialize)]
pub struct CreateCommentRequest {
    pub author: String,
    pub post_id: String,
    pub parent_comment_id: Option<String>,
    pub body: String,
}

/// Identifies the caller on endpoints where only the author may act.
#[derive(Debug, Deserialize)]
pub struct AuthorParam {
    pub author: String,
}

#[derive(Debug, Deserialize)]
pub struct CommentListParams {
    pub post_id: Option<String>,
}

/// Replaces a post's tag set with the tags in a comma-separated list.
/// No commas or semicolons inside individual tags.
#[derive(Debug, Deserialize)]
pub struct UpdateTagsetRequest {
    pub author: String,
    pub tags: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct TagsetResponse {
    pub post_id: String,
    /// Comma-joined tag texts, the wire format the original service used.
    pub tags: String,
}
