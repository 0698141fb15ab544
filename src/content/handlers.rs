use super::types::{
    AuthorParam, Comment, CommentListParams, CreateCommentRequest, CreatePostRequest, Post,
    TagsetResponse, UpdatePostRequest, UpdateTagsetRequest,
};
use crate::api::{DeleteResponse, ErrorBody};
use crate::engagement::types::{Tag, tag_text_valid};
use crate::storage::memory::MemoryStore;
use axum::extract::{Extension, Path, Query};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

pub async fn handle_list_posts(
    Extension(posts): Extension<Arc<MemoryStore<Post>>>,
) -> Json<Vec<Post>> {
    Json(posts.all())
}

pub async fn handle_create_post(
    Extension(posts): Extension<Arc<MemoryStore<Post>>>,
    Json(req): Json<CreatePostRequest>,
) -> (StatusCode, Json<Post>) {
    let slug = req.slug.unwrap_or_else(|| slugify(&req.title));
    let post = Post {
        id: Uuid::new_v4().to_string(),
        posted_at: Utc::now(),
        author: req.author,
        title: req.title,
        url: req.url,
        slug,
        body: req.body,
        base_score: 1,
        vote_count: 0,
        comment_count: 0,
        view_count: 0,
        draft: req.draft,
    };

    posts.insert(post.clone());
    tracing::debug!("Created post {} by {}", post.id, post.author);

    (StatusCode::CREATED, Json(post))
}

pub async fn handle_get_post(
    Path(id): Path<String>,
    Extension(posts): Extension<Arc<MemoryStore<Post>>>,
) -> Response {
    // A fetch counts as a view.
    match posts.update(&id, |post| post.view_count += 1) {
        Some(post) => (StatusCode::OK, Json(post)).into_response(),
        None => post_not_found(&id).into_response(),
    }
}

pub async fn handle_update_post(
    Path(id): Path<String>,
    Extension(posts): Extension<Arc<MemoryStore<Post>>>,
    Json(req): Json<UpdatePostRequest>,
) -> Response {
    let Some(existing) = posts.get(&id) else {
        return post_not_found(&id).into_response();
    };
    if existing.author != req.author {
        return not_the_author(&req.author, &existing.author).into_response();
    }

    let updated = posts.update(&id, |post| {
        if let Some(title) = req.title {
            post.title = title;
        }
        if let Some(body) = req.body {
            post.body = body;
        }
        if let Some(url) = req.url {
            post.url = Some(url);
        }
        if let Some(draft) = req.draft {
            post.draft = draft;
        }
    });

    match updated {
        Some(post) => (StatusCode::OK, Json(post)).into_response(),
        None => post_not_found(&id).into_response(),
    }
}

pub async fn handle_delete_post(
    Path(id): Path<String>,
    Query(params): Query<AuthorParam>,
    Extension(posts): Extension<Arc<MemoryStore<Post>>>,
    Extension(tags): Extension<Arc<MemoryStore<Tag>>>,
) -> Response {
    let Some(existing) = posts.get(&id) else {
        return post_not_found(&id).into_response();
    };
    if existing.author != params.author {
        return not_the_author(&params.author, &existing.author).into_response();
    }

    posts.remove(&id);
    for tag in tags.all() {
        if tag.document_id == id {
            tags.remove(&tag.id);
        }
    }
    tracing::debug!("Deleted post {}", id);

    (
        StatusCode::OK,
        Json(DeleteResponse {
            id,
            status: "deleted".to_string(),
        }),
    )
        .into_response()
}

/// Returns the post's tags as one comma-joined string, the wire format the
/// original interface exposed.
pub async fn handle_get_tagset(
    Path(id): Path<String>,
    Extension(posts): Extension<Arc<MemoryStore<Post>>>,
    Extension(tags): Extension<Arc<MemoryStore<Tag>>>,
) -> Response {
    if !posts.contains(&id) {
        return post_not_found(&id).into_response();
    }

    let mut texts: Vec<String> = tags
        .all()
        .into_iter()
        .filter(|tag| tag.document_id == id)
        .map(|tag| tag.text)
        .collect();
    texts.reverse(); // `all()` is newest-first; tagsets read in creation order

    (
        StatusCode::OK,
        Json(TagsetResponse {
            post_id: id,
            tags: texts.join(","),
        }),
    )
        .into_response()
}

/// Replaces the post's entire tag set with the tags in the request's
/// comma-separated list.
///
/// Bad update strings are rejected before any existing tag is touched.
pub async fn handle_update_tagset(
    Path(id): Path<String>,
    Extension(posts): Extension<Arc<MemoryStore<Post>>>,
    Extension(tags): Extension<Arc<MemoryStore<Tag>>>,
    Json(req): Json<UpdateTagsetRequest>,
) -> Response {
    if req.tags.contains(';') {
        return ErrorBody::respond(
            StatusCode::BAD_REQUEST,
            "tagset_semicolon",
            "Semicolons are not allowed in the update string.",
            "user",
        )
        .into_response();
    }

    let new_texts: Vec<&str> = req.tags.split(',').collect();
    if new_texts.iter().any(|text| text.is_empty()) {
        return ErrorBody::respond(
            StatusCode::BAD_REQUEST,
            "tagset_empty_tag",
            "You've repeated a comma in your update string, implying you're \
             allowing commas in tags. Commas are not allowed to appear in a tag string.",
            "user",
        )
        .into_response();
    }
    if let Some(bad) = new_texts.iter().find(|text| !tag_text_valid(text)) {
        return ErrorBody::respond(
            StatusCode::BAD_REQUEST,
            "tagset_invalid_tag",
            format!("The tag '{}' does not match the tag validation pattern", bad),
            "user",
        )
        .into_response();
    }

    let Some(post) = posts.get(&id) else {
        return post_not_found(&id).into_response();
    };
    if post.author != req.author {
        return not_the_author(&req.author, &post.author).into_response();
    }

    for tag in tags.all() {
        if tag.document_id == id {
            tags.remove(&tag.id);
        }
    }
    for text in &new_texts {
        tags.insert(Tag {
            id: Uuid::new_v4().to_string(),
            author: req.author.clone(),
            document_id: id.clone(),
            doc_type: "post".to_string(),
            created_at: Utc::now(),
            text: text.to_string(),
        });
    }
    tracing::debug!("Replaced tagset on post {} with {} tags", id, new_texts.len());

    (
        StatusCode::OK,
        Json(TagsetResponse {
            post_id: id,
            tags: req.tags,
        }),
    )
        .into_response()
}

pub async fn handle_list_comments(
    Query(params): Query<CommentListParams>,
    Extension(comments): Extension<Arc<MemoryStore<Comment>>>,
) -> Json<Vec<Comment>> {
    let visible = comments
        .all()
        .into_iter()
        .filter(|comment| !comment.is_deleted)
        .filter(|comment| match &params.post_id {
            Some(post_id) => &comment.post_id == post_id,
            None => true,
        })
        .collect();
    Json(visible)
}

pub async fn handle_create_comment(
    Extension(posts): Extension<Arc<MemoryStore<Post>>>,
    Extension(comments): Extension<Arc<MemoryStore<Comment>>>,
    Json(req): Json<CreateCommentRequest>,
) -> Response {
    if !posts.contains(&req.post_id) {
        return post_not_found(&req.post_id).into_response();
    }

    let comment = Comment {
        id: Uuid::new_v4().to_string(),
        author: req.author,
        post_id: req.post_id.clone(),
        parent_comment_id: req.parent_comment_id,
        posted_at: Utc::now(),
        base_score: 1,
        body: req.body,
        is_deleted: false,
    };

    comments.insert(comment.clone());
    posts.update(&req.post_id, |post| post.comment_count += 1);

    (StatusCode::CREATED, Json(comment)).into_response()
}

pub async fn handle_get_comment(
    Path(id): Path<String>,
    Extension(comments): Extension<Arc<MemoryStore<Comment>>>,
) -> Response {
    match comments.get(&id) {
        Some(comment) if !comment.is_deleted => {
            (StatusCode::OK, Json(comment)).into_response()
        }
        _ => comment_not_found(&id).into_response(),
    }
}

/// Soft-deletes a comment. The record stays stored but disappears from every
/// listing and search.
pub async fn handle_delete_comment(
    Path(id): Path<String>,
    Query(params): Query<AuthorParam>,
    Extension(comments): Extension<Arc<MemoryStore<Comment>>>,
) -> Response {
    let Some(comment) = comments.get(&id) else {
        return comment_not_found(&id).into_response();
    };
    if comment.is_deleted {
        return comment_not_found(&id).into_response();
    }
    if comment.author != params.author {
        return ErrorBody::respond(
            StatusCode::FORBIDDEN,
            "comment_not_author",
            "Only a comment's author can delete their comment",
            "client",
        )
        .into_response();
    }

    comments.update(&id, |comment| comment.is_deleted = true);

    (
        StatusCode::OK,
        Json(DeleteResponse {
            id,
            status: "deleted".to_string(),
        }),
    )
        .into_response()
}

fn post_not_found(id: &str) -> (StatusCode, Json<ErrorBody>) {
    ErrorBody::respond(
        StatusCode::NOT_FOUND,
        "post_not_found",
        format!("No post with id {}", id),
        "client",
    )
}

fn comment_not_found(id: &str) -> (StatusCode, Json<ErrorBody>) {
    ErrorBody::respond(
        StatusCode::NOT_FOUND,
        "comment_not_found",
        format!("No comment with id {}", id),
        "client",
    )
}

fn not_the_author(caller: &str, author: &str) -> (StatusCode, Json<ErrorBody>) {
    ErrorBody::respond(
        StatusCode::FORBIDDEN,
        "post_not_author",
        format!("User {} is not the author of this post ({})", caller, author),
        "client",
    )
}

/// Derives a URL slug from a title: lowercase alphanumeric runs joined by
/// dashes, capped at the slug column width the original schema used.
fn slugify(title: &str) -> String {
    let mut slug = String::new();
    let mut last_dash = true;
    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if !last_dash {
            slug.push('-');
            last_dash = true;
        }
        if slug.len() >= 60 {
            break;
        }
    }
    slug.trim_end_matches('-').to_string()
}
