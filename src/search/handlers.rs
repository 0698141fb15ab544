use super::compiler::compile_filters;
use super::parser::parse_query;
use super::types::{ErrorKind, SearchError, SearchResponse, Searchable};
use crate::api::ErrorBody;
use crate::content::types::{Comment, Post};
use crate::engagement::types::Tag;
use crate::storage::collection::Candidates;
use crate::storage::memory::MemoryStore;
use axum::extract::{Extension, Query};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::NaiveDate;
use serde::Deserialize;
use std::sync::Arc;

/// The query string arrives in a parameter literally named `query`; its
/// absence is a missing-parameter error, distinct from a parse failure.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub query: Option<String>,
}

/// A document joined with its tag texts for the duration of one search.
struct Candidate<T> {
    item: T,
    tags: Vec<String>,
}

impl Searchable for Candidate<Post> {
    fn title(&self) -> &str {
        &self.item.title
    }

    fn body(&self) -> &str {
        &self.item.body
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn author(&self) -> &str {
        &self.item.author
    }

    fn posted_on(&self) -> NaiveDate {
        self.item.posted_at.date_naive()
    }

    fn score(&self) -> i64 {
        self.item.base_score
    }
}

impl Searchable for Candidate<Comment> {
    // Comments have no title; title clauses simply never match them.
    fn title(&self) -> &str {
        ""
    }

    fn body(&self) -> &str {
        &self.item.body
    }

    fn tags(&self) -> &[String] {
        &self.tags
    }

    fn author(&self) -> &str {
        &self.item.author
    }

    fn posted_on(&self) -> NaiveDate {
        self.item.posted_at.date_naive()
    }

    fn score(&self) -> i64 {
        self.item.base_score
    }
}

/// Search posts with a query string, `?query=`.
///
/// See the tokenizer and parser for the search syntax rules.
pub async fn handle_search_posts(
    Query(params): Query<SearchParams>,
    Extension(posts): Extension<Arc<MemoryStore<Post>>>,
    Extension(tags): Extension<Arc<MemoryStore<Tag>>>,
) -> Response {
    let Some(raw) = params.query else {
        return search_error(&SearchError::MissingQuery);
    };
    let filters = match parse_query(&raw).map(|clauses| compile_filters(&clauses)) {
        Ok(filters) => filters,
        Err(err) => return search_error(&err),
    };

    let candidates: Vec<Candidate<Post>> = posts
        .all()
        .into_iter()
        .map(|post| {
            let tags = tags_for(&tags, &post.id);
            Candidate { item: post, tags }
        })
        .collect();
    let total_count = candidates.len();

    let results: Vec<Post> = Candidates::new(candidates)
        .apply(&filters)
        .into_inner()
        .into_iter()
        .map(|candidate| candidate.item)
        .collect();

    tracing::debug!(
        "Post search '{}': {} of {} candidates matched",
        raw,
        results.len(),
        total_count
    );

    Json(SearchResponse {
        query: raw,
        total_count,
        count: results.len(),
        results,
    })
    .into_response()
}

/// Search comments with a query string, `?query=`. Soft-deleted comments
/// are never candidates.
pub async fn handle_search_comments(
    Query(params): Query<SearchParams>,
    Extension(comments): Extension<Arc<MemoryStore<Comment>>>,
    Extension(tags): Extension<Arc<MemoryStore<Tag>>>,
) -> Response {
    let Some(raw) = params.query else {
        return search_error(&SearchError::MissingQuery);
    };
    let filters = match parse_query(&raw).map(|clauses| compile_filters(&clauses)) {
        Ok(filters) => filters,
        Err(err) => return search_error(&err),
    };

    let candidates: Vec<Candidate<Comment>> = comments
        .all()
        .into_iter()
        .filter(|comment| !comment.is_deleted)
        .map(|comment| {
            let tags = tags_for(&tags, &comment.id);
            Candidate {
                item: comment,
                tags,
            }
        })
        .collect();
    let total_count = candidates.len();

    let results: Vec<Comment> = Candidates::new(candidates)
        .apply(&filters)
        .into_inner()
        .into_iter()
        .map(|candidate| candidate.item)
        .collect();

    Json(SearchResponse {
        query: raw,
        total_count,
        count: results.len(),
        results,
    })
    .into_response()
}

fn tags_for(tags: &MemoryStore<Tag>, document_id: &str) -> Vec<String> {
    tags.all()
        .into_iter()
        .filter(|tag| tag.document_id == document_id)
        .map(|tag| tag.text)
        .collect()
}

fn search_error(err: &SearchError) -> Response {
    let blame = match err.kind() {
        ErrorKind::Syntax | ErrorKind::Validation => "user",
        ErrorKind::MissingParameter => "client",
    };
    ErrorBody::respond(StatusCode::BAD_REQUEST, err.code(), err.to_string(), blame)
        .into_response()
}
