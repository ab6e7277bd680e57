use std::sync::Arc;

use uuid::Uuid;

use crate::{
    api::error,
    modules::{
        friend::repository::FriendshipRepository,
        message::{
            model::{ConversationSummary, InsertMessage},
            repository::MessageRepository,
            schema::MessageEntity,
        },
        user::{repository::UserRepository, schema::PublicProfile},
    },
};

use super::model::ConversationSummaryRow;

const DEFAULT_PAGE_SIZE: i64 = 50;

#[derive(Clone)]
pub struct MessageService<M, F, U>
where
    M: MessageRepository + Send + Sync,
    F: FriendshipRepository + Send + Sync,
    U: UserRepository + Send + Sync,
{
    message_repo: Arc<M>,
    friend_repo: Arc<F>,
    user_repo: Arc<U>,
}

impl<M, F, U> MessageService<M, F, U>
where
    M: MessageRepository + Send + Sync,
    F: FriendshipRepository + Send + Sync,
    U: UserRepository + Send + Sync,
{
    pub fn with_dependencies(message_repo: Arc<M>, friend_repo: Arc<F>, user_repo: Arc<U>) -> Self {
        MessageService { message_repo, friend_repo, user_repo }
    }

    pub async fn send_message(
        &self,
        sender_id: Uuid,
        receiver_id: Uuid,
        content: String,
    ) -> Result<MessageEntity, error::SystemError> {
        let content = content.trim().to_string();
        if content.is_empty() {
            return Err(error::SystemError::bad_request("Message content cannot be empty"));
        }

        if self.user_repo.find_by_id(&sender_id).await?.is_none()
            || self.user_repo.find_by_id(&receiver_id).await?.is_none()
        {
            return Err(error::SystemError::not_found("User not found"));
        }

        if self.friend_repo.find_friendship(&sender_id, &receiver_id).await?.is_none() {
            return Err(error::SystemError::forbidden("You can only message your friends"));
        }

        self.message_repo.create(&InsertMessage { sender_id, receiver_id, content }).await
    }

    pub async fn mark_message_as_read(
        &self,
        user_id: Uuid,
        message_id: Uuid,
    ) -> Result<MessageEntity, error::SystemError> {
        let message = self
            .message_repo
            .find_by_id(&message_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Message not found"))?;

        if message.receiver_id != user_id {
            return Err(error::SystemError::forbidden(
                "You can only mark your own messages as read",
            ));
        }

        if message.is_read {
            return Err(error::SystemError::bad_request("Message is already read"));
        }

        self.message_repo.mark_read(&message_id).await
    }

    /// Newest-first page of the conversation with `other_id`. Viewing the
    /// conversation is what counts as reading it: unread messages from the
    /// counterpart are flipped to read in the same call, and the returned rows
    /// reflect that.
    pub async fn get_conversation(
        &self,
        user_id: Uuid,
        other_id: Uuid,
        limit: Option<i64>,
        before: Option<Uuid>,
    ) -> Result<Vec<MessageEntity>, error::SystemError> {
        if self.user_repo.find_by_id(&other_id).await?.is_none() {
            return Err(error::SystemError::not_found("User not found"));
        }

        let limit = limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, 100);

        self.message_repo
            .fetch_conversation_and_mark_read(&user_id, &other_id, limit, before.as_ref())
            .await
    }

    pub async fn get_conversation_list(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<ConversationSummary>, error::SystemError> {
        let rows = self.message_repo.conversation_list(&user_id).await?;
        Ok(rows.into_iter().map(summary_from_row).collect())
    }
}

fn summary_from_row(row: ConversationSummaryRow) -> ConversationSummary {
    ConversationSummary {
        user: PublicProfile {
            id: row.user_id,
            username: row.username,
            avatar_url: row.avatar_url,
            bio: row.bio,
        },
        last_message: MessageEntity {
            id: row.id,
            sender_id: row.sender_id,
            receiver_id: row.receiver_id,
            content: row.content,
            is_read: row.is_read,
            created_at: row.created_at,
        },
        unread_count: row.unread_count,
    }
}
