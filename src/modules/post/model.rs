use serde::{Deserialize, Serialize};
use sqlx::prelude::FromRow;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePostBody {
    #[validate(length(max = 5000, message = "Post content is too long"))]
    pub content: Option<String>,
    #[validate(url(message = "Invalid image URL"))]
    pub image_url: Option<String>,
}

/// Missing field = keep, `null` = clear, value = replace.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdatePostBody {
    #[serde(default, deserialize_with = "crate::utils::double_option")]
    pub content: Option<Option<String>>,
    #[serde(default, deserialize_with = "crate::utils::double_option")]
    pub image_url: Option<Option<String>>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateCommentBody {
    #[validate(length(min = 1, max = 2000, message = "Comment content cannot be empty"))]
    pub content: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct FeedQuery {
    #[validate(range(min = 1, max = 100, message = "Limit must be between 1 and 100"))]
    pub limit: Option<i64>,
    #[validate(range(min = 0, message = "Offset cannot be negative"))]
    pub offset: Option<i64>,
}

pub struct InsertPost {
    pub user_id: Uuid,
    pub content: Option<String>,
    pub image_url: Option<String>,
}

pub struct UpdatePost {
    pub content: Option<Option<String>>,
    pub image_url: Option<Option<String>>,
}

pub struct InsertComment {
    pub user_id: Uuid,
    pub post_id: Uuid,
    pub content: String,
}

/// A post as rendered for a viewer: author profile plus derived counts and
/// whether the viewer has liked it.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct PostDetail {
    pub id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub avatar_url: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub likes_count: i64,
    pub comments_count: i64,
    pub liked_by_user: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct CommentView {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub username: String,
    pub avatar_url: Option<String>,
    pub content: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
