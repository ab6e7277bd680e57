use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::modules::user::schema::PublicProfile;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SendFriendRequestBody {
    pub receiver_id: Uuid,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestDirection {
    Sent,
    Received,
}

/// A pending request as listed for a user, carrying the counterpart's profile.
#[derive(Debug, Clone, Serialize)]
pub struct PendingRequestView {
    pub id: Uuid,
    pub direction: RequestDirection,
    pub user: PublicProfile,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Flat join row backing [`PendingRequestView`].
#[derive(FromRow)]
pub struct PendingRequestRow {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FriendshipState {
    Friends,
    RequestSent,
    RequestReceived,
    None,
}

#[derive(Debug, Clone, Serialize)]
pub struct FriendshipStatusResponse {
    pub status: FriendshipState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<Uuid>,
}
