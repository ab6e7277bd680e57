use uuid::Uuid;

use crate::api::error;
use crate::modules::message::model::{ConversationSummaryRow, InsertMessage};
use crate::modules::message::schema::MessageEntity;

#[async_trait::async_trait]
pub trait MessageRepository {
    async fn create(&self, message: &InsertMessage) -> Result<MessageEntity, error::SystemError>;

    async fn find_by_id(
        &self,
        message_id: &Uuid,
    ) -> Result<Option<MessageEntity>, error::SystemError>;

    async fn mark_read(&self, message_id: &Uuid) -> Result<MessageEntity, error::SystemError>;

    /// Returns a newest-first page of the bidirectional history between the
    /// two users, after marking every unread message from `other_id` to
    /// `user_id` as read. Both steps run as one transactional unit, so the
    /// returned rows already carry the updated read-state.
    async fn fetch_conversation_and_mark_read(
        &self,
        user_id: &Uuid,
        other_id: &Uuid,
        limit: i64,
        before: Option<&Uuid>,
    ) -> Result<Vec<MessageEntity>, error::SystemError>;

    /// Rank-1 message per counterpart plus that counterpart's unread count,
    /// ordered by recency.
    async fn conversation_list(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<ConversationSummaryRow>, error::SystemError>;
}
