use super::types::{
    CreateTagRequest, CreateVoteRequest, Tag, TagListParams, TagValidationResponse,
    TAG_TEXT_PATTERN, Vote, VoteListParams, tag_text_valid,
};
use crate::api::{DeleteResponse, ErrorBody};
use crate::content::types::{Comment, Post};
use crate::storage::memory::MemoryStore;
use axum::extract::{Extension, Path, Query};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

pub async fn handle_list_tags(
    Query(params): Query<TagListParams>,
    Extension(tags): Extension<Arc<MemoryStore<Tag>>>,
) -> Json<Vec<Tag>> {
    let matching = tags
        .all()
        .into_iter()
        .filter(|tag| match &params.document_id {
            Some(document_id) => &tag.document_id == document_id,
            None => true,
        })
        .filter(|tag| match &params.author {
            Some(author) => &tag.author == author,
            None => true,
        })
        .filter(|tag| match &params.text {
            Some(text) => &tag.text == text,
            None => true,
        })
        .collect();
    Json(matching)
}

pub async fn handle_create_tag(
    Extension(tags): Extension<Arc<MemoryStore<Tag>>>,
    Json(req): Json<CreateTagRequest>,
) -> Response {
    if !tag_text_valid(&req.text) {
        return ErrorBody::respond(
            StatusCode::BAD_REQUEST,
            "tag_invalid_text",
            format!("The tag '{}' does not match the tag validation pattern", req.text),
            "user",
        )
        .into_response();
    }

    let tag = Tag {
        id: Uuid::new_v4().to_string(),
        author: req.author,
        document_id: req.document_id,
        doc_type: req.doc_type.unwrap_or_else(|| "post".to_string()),
        created_at: Utc::now(),
        text: req.text,
    };

    tags.insert(tag.clone());

    (StatusCode::CREATED, Json(tag)).into_response()
}

pub async fn handle_delete_tag(
    Path(id): Path<String>,
    Extension(tags): Extension<Arc<MemoryStore<Tag>>>,
) -> Response {
    match tags.remove(&id) {
        Some(_) => (
            StatusCode::OK,
            Json(DeleteResponse {
                id,
                status: "deleted".to_string(),
            }),
        )
            .into_response(),
        None => ErrorBody::respond(
            StatusCode::NOT_FOUND,
            "tag_not_found",
            format!("No tag with id {}", id),
            "client",
        )
        .into_response(),
    }
}

/// Returns the tag validation regex so clients can check tag text before
/// submitting it.
pub async fn handle_tag_validation() -> Json<TagValidationResponse> {
    Json(TagValidationResponse {
        pattern: TAG_TEXT_PATTERN.to_string(),
    })
}

pub async fn handle_list_votes(
    Query(params): Query<VoteListParams>,
    Extension(votes): Extension<Arc<MemoryStore<Vote>>>,
) -> Json<Vec<Vote>> {
    let matching = votes
        .all()
        .into_iter()
        .filter(|vote| match &params.document_id {
            Some(document_id) => &vote.document_id == document_id,
            None => true,
        })
        .filter(|vote| match &params.author {
            Some(author) => &vote.author == author,
            None => true,
        })
        .collect();
    Json(matching)
}

/// Records a vote and applies its signed power to the target's score.
///
/// The target may be a post or a comment; an unknown document id is
/// rejected so scores can't drift from phantom votes.
pub async fn handle_create_vote(
    Extension(posts): Extension<Arc<MemoryStore<Post>>>,
    Extension(comments): Extension<Arc<MemoryStore<Comment>>>,
    Extension(votes): Extension<Arc<MemoryStore<Vote>>>,
    Json(req): Json<CreateVoteRequest>,
) -> Response {
    let vote = Vote {
        id: Uuid::new_v4().to_string(),
        author: req.author,
        document_id: req.document_id,
        voted_at: Utc::now(),
        vote_type: req.vote_type.unwrap_or_else(|| "smallUpvote".to_string()),
        power: req.power.unwrap_or(1),
    };
    let delta = vote.signed_power();

    let applied_to_post = posts
        .update(&vote.document_id, |post| {
            post.base_score += delta;
            post.vote_count += 1;
        })
        .is_some();
    let applied = applied_to_post
        || comments
            .update(&vote.document_id, |comment| comment.base_score += delta)
            .is_some();

    if !applied {
        return ErrorBody::respond(
            StatusCode::NOT_FOUND,
            "vote_document_not_found",
            format!("No post or comment with id {}", vote.document_id),
            "client",
        )
        .into_response();
    }

    votes.insert(vote.clone());
    tracing::debug!(
        "Vote {} on {} worth {}",
        vote.vote_type,
        vote.document_id,
        delta
    );

    (StatusCode::CREATED, Json(vote)).into_response()
}

pub async fn handle_get_vote(
    Path(id): Path<String>,
    Extension(votes): Extension<Arc<MemoryStore<Vote>>>,
) -> Response {
    match votes.get(&id) {
        Some(vote) => (StatusCode::OK, Json(vote)).into_response(),
        None => ErrorBody::respond(
            StatusCode::NOT_FOUND,
            "vote_not_found",
            format!("No vote with id {}", id),
            "client",
        )
        .into_response(),
    }
}
