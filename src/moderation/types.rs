//! Moderation Data Types

use crate::storage::memory::Entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A ban on a user, shown as a "disinvite" in the interface.
///
/// `reason` appears in the mod log; `ban_message` is what the banned user
/// sees when they try to log in. The user is considered unbanned once
/// `until` has passed, and may message the mods from `appeal_on`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ban {
    pub id: String,
    pub user: String,
    pub created_at: DateTime<Utc>,
    pub reason: String,
    pub ban_message: String,
    pub until: DateTime<Utc>,
    pub appeal_on: DateTime<Utc>,
}

impl Ban {
    /// A ban is active while `until` is still in the future.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.until > now
    }
}

/// An invite code a user hands out to bring someone onto the forum.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invite {
    pub id: String,
    pub code: String,
    pub creator: String,
    pub created_at: DateTime<Utc>,
    pub used_by: Option<String>,
}

impl Entity for Ban {
    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

impl Entity for Invite {
    fn id(&self) -> &str {
        &self.id
    }

    fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateBanRequest {
    pub user: String,
    pub reason: String,
    pub ban_message: String,
    pub until: DateTime<Utc>,
    pub appeal_on: DateTime<Utc>,
}

#[derive(Debug, Deserialize)]
pub struct ActiveBanParams {
    pub user: String,
}

/// Answer to "is this user currently banned?".
#[derive(Debug, Serialize, Deserialize)]
pub struct ActiveBanResponse {
    pub user: String,
    pub banned: bool,
    pub ban_message: Option<String>,
    pub until: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct CreateInviteRequest {
    pub creator: String,
}

#[derive(Debug, Deserialize)]
pub struct InviteListParams {
    pub creator: Option<String>,
}
