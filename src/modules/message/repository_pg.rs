use uuid::Uuid;

use crate::{
    api::error,
    modules::message::{
        model::{ConversationSummaryRow, InsertMessage},
        repository::MessageRepository,
        schema::MessageEntity,
    },
};

#[derive(Clone)]
pub struct MessageRepositoryPg {
    pool: sqlx::PgPool,
}

impl MessageRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl MessageRepository for MessageRepositoryPg {
    async fn create(&self, message: &InsertMessage) -> Result<MessageEntity, error::SystemError> {
        let id = Uuid::now_v7();
        let message = sqlx::query_as::<_, MessageEntity>(
            r#"
            INSERT INTO messages (id, sender_id, receiver_id, content, is_read)
            VALUES ($1, $2, $3, $4, FALSE)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(message.sender_id)
        .bind(message.receiver_id)
        .bind(&message.content)
        .fetch_one(&self.pool)
        .await?;

        Ok(message)
    }

    async fn find_by_id(
        &self,
        message_id: &Uuid,
    ) -> Result<Option<MessageEntity>, error::SystemError> {
        let message = sqlx::query_as::<_, MessageEntity>("SELECT * FROM messages WHERE id = $1")
            .bind(message_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(message)
    }

    async fn mark_read(&self, message_id: &Uuid) -> Result<MessageEntity, error::SystemError> {
        let message = sqlx::query_as::<_, MessageEntity>(
            "UPDATE messages SET is_read = TRUE WHERE id = $1 RETURNING *",
        )
        .bind(message_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| error::SystemError::not_found("Message not found"))?;

        Ok(message)
    }

    async fn fetch_conversation_and_mark_read(
        &self,
        user_id: &Uuid,
        other_id: &Uuid,
        limit: i64,
        before: Option<&Uuid>,
    ) -> Result<Vec<MessageEntity>, error::SystemError> {
        let mut tx = self.pool.begin().await?;

        sqlx::query(
            r#"
            UPDATE messages
            SET is_read = TRUE
            WHERE receiver_id = $1
              AND sender_id = $2
              AND is_read = FALSE
            "#,
        )
        .bind(user_id)
        .bind(other_id)
        .execute(&mut *tx)
        .await?;

        // has index on (sender_id, receiver_id, created_at DESC)
        let messages = sqlx::query_as::<_, MessageEntity>(
            r#"
            SELECT *
            FROM messages m
            WHERE (
                    (m.sender_id = $1 AND m.receiver_id = $2)
                 OR (m.sender_id = $2 AND m.receiver_id = $1)
              )
              AND (
                    $3::uuid IS NULL
                 OR (m.created_at, m.id) < (SELECT created_at, id FROM messages WHERE id = $3)
              )
            ORDER BY m.created_at DESC, m.id DESC
            LIMIT $4
            "#,
        )
        .bind(user_id)
        .bind(other_id)
        .bind(before)
        .bind(limit)
        .fetch_all(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(messages)
    }

    async fn conversation_list(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<ConversationSummaryRow>, error::SystemError> {
        let rows = sqlx::query_as::<_, ConversationSummaryRow>(
            r#"
            SELECT
                t.id,
                t.sender_id,
                t.receiver_id,
                t.content,
                t.is_read,
                t.created_at,
                u.id AS user_id,
                u.username,
                u.avatar_url,
                u.bio,
                (
                    SELECT COUNT(*)
                    FROM messages um
                    WHERE um.sender_id = t.counterpart_id
                      AND um.receiver_id = $1
                      AND um.is_read = FALSE
                ) AS unread_count
            FROM (
                SELECT
                    m.*,
                    CASE WHEN m.sender_id = $1 THEN m.receiver_id ELSE m.sender_id END
                        AS counterpart_id,
                    ROW_NUMBER() OVER (
                        PARTITION BY
                            CASE WHEN m.sender_id = $1 THEN m.receiver_id ELSE m.sender_id END
                        ORDER BY m.created_at DESC
                    ) AS rn
                FROM messages m
                WHERE m.sender_id = $1
                   OR m.receiver_id = $1
            ) t
            JOIN users u ON u.id = t.counterpart_id
            WHERE t.rn = 1
            ORDER BY t.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows)
    }
}
