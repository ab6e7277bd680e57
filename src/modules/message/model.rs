use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;
use validator::Validate;

use crate::modules::message::schema::MessageEntity;
use crate::modules::user::schema::PublicProfile;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct SendMessageBody {
    pub receiver_id: Uuid,
    #[validate(length(min = 1, message = "Message content cannot be empty"))]
    pub content: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct ConversationQuery {
    #[validate(range(min = 1, max = 100, message = "Limit must be between 1 and 100"))]
    pub limit: Option<i64>,
    /// Message id; only messages older than it are returned.
    pub before: Option<Uuid>,
}

pub struct InsertMessage {
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub content: String,
}

/// One conversation-list entry: the counterpart, their latest message in
/// either direction, and how many of their messages are still unread.
#[derive(Debug, Clone, Serialize)]
pub struct ConversationSummary {
    pub user: PublicProfile,
    pub last_message: MessageEntity,
    pub unread_count: i64,
}

/// Flat join row backing [`ConversationSummary`].
#[derive(FromRow)]
pub struct ConversationSummaryRow {
    pub id: Uuid,
    pub sender_id: Uuid,
    pub receiver_id: Uuid,
    pub content: String,
    pub is_read: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub user_id: Uuid,
    pub username: String,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub unread_count: i64,
}
