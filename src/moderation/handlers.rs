use super::types::{
    ActiveBanParams, ActiveBanResponse, Ban, CreateBanRequest, CreateInviteRequest, Invite,
    InviteListParams,
};
use crate::api::{DeleteResponse, ErrorBody};
use crate::storage::memory::MemoryStore;
use axum::extract::{Extension, Path, Query};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

pub async fn handle_list_bans(
    Extension(bans): Extension<Arc<MemoryStore<Ban>>>,
) -> Json<Vec<Ban>> {
    Json(bans.all())
}

pub async fn handle_create_ban(
    Extension(bans): Extension<Arc<MemoryStore<Ban>>>,
    Json(req): Json<CreateBanRequest>,
) -> (StatusCode, Json<Ban>) {
    let ban = Ban {
        id: Uuid::new_v4().to_string(),
        user: req.user,
        created_at: Utc::now(),
        reason: req.reason,
        ban_message: req.ban_message,
        until: req.until,
        appeal_on: req.appeal_on,
    };

    bans.insert(ban.clone());
    tracing::info!("Banned {} until {}", ban.user, ban.until);

    (StatusCode::CREATED, Json(ban))
}

pub async fn handle_get_ban(
    Path(id): Path<String>,
    Extension(bans): Extension<Arc<MemoryStore<Ban>>>,
) -> Response {
    match bans.get(&id) {
        Some(ban) => (StatusCode::OK, Json(ban)).into_response(),
        None => ban_not_found(&id).into_response(),
    }
}

pub async fn handle_delete_ban(
    Path(id): Path<String>,
    Extension(bans): Extension<Arc<MemoryStore<Ban>>>,
) -> Response {
    match bans.remove(&id) {
        Some(ban) => {
            tracing::info!("Lifted ban on {}", ban.user);
            (
                StatusCode::OK,
                Json(DeleteResponse {
                    id,
                    status: "deleted".to_string(),
                }),
            )
                .into_response()
        }
        None => ban_not_found(&id).into_response(),
    }
}

/// Whether a user is currently banned. When several bans overlap, the one
/// lasting the longest wins.
pub async fn handle_active_ban(
    Query(params): Query<ActiveBanParams>,
    Extension(bans): Extension<Arc<MemoryStore<Ban>>>,
) -> Json<ActiveBanResponse> {
    let now = Utc::now();
    let active = bans
        .all()
        .into_iter()
        .filter(|ban| ban.user == params.user && ban.is_active(now))
        .max_by_key(|ban| ban.until);

    Json(match active {
        Some(ban) => ActiveBanResponse {
            user: params.user,
            banned: true,
            ban_message: Some(ban.ban_message),
            until: Some(ban.until),
        },
        None => ActiveBanResponse {
            user: params.user,
            banned: false,
            ban_message: None,
            until: None,
        },
    })
}

/// Lists invites; with `?creator=` this is a user's view of their own codes.
pub async fn handle_list_invites(
    Query(params): Query<InviteListParams>,
    Extension(invites): Extension<Arc<MemoryStore<Invite>>>,
) -> Json<Vec<Invite>> {
    let matching = invites
        .all()
        .into_iter()
        .filter(|invite| match &params.creator {
            Some(creator) => &invite.creator == creator,
            None => true,
        })
        .collect();
    Json(matching)
}

pub async fn handle_create_invite(
    Extension(invites): Extension<Arc<MemoryStore<Invite>>>,
    Json(req): Json<CreateInviteRequest>,
) -> (StatusCode, Json<Invite>) {
    let invite = Invite {
        id: Uuid::new_v4().to_string(),
        code: Uuid::new_v4().to_string(),
        creator: req.creator,
        created_at: Utc::now(),
        used_by: None,
    };

    invites.insert(invite.clone());

    (StatusCode::CREATED, Json(invite))
}

pub async fn handle_get_invite(
    Path(id): Path<String>,
    Extension(invites): Extension<Arc<MemoryStore<Invite>>>,
) -> Response {
    match invites.get(&id) {
        Some(invite) => (StatusCode::OK, Json(invite)).into_response(),
        None => ErrorBody::respond(
            StatusCode::NOT_FOUND,
            "invite_not_found",
            format!("No invite with id {}", id),
            "client",
        )
        .into_response(),
    }
}

fn ban_not_found(id: &str) -> (StatusCode, Json<ErrorBody>) {
    ErrorBody::respond(
        StatusCode::NOT_FOUND,
        "ban_not_found",
        format!("No ban with id {}", id),
        "client",
    )
}
