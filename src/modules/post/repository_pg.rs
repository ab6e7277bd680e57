use uuid::Uuid;

use crate::{
    api::error,
    modules::post::{
        model::{CommentView, InsertComment, InsertPost, PostDetail, UpdatePost},
        repository::{CommentRepository, LikeRepository, PostRepo, PostRepository},
        schema::{CommentEntity, PostEntity},
    },
};

const POST_DETAIL_COLUMNS: &str = r#"
    p.id,
    p.user_id,
    u.username,
    u.avatar_url,
    p.content,
    p.image_url,
    (SELECT COUNT(*) FROM likes l WHERE l.post_id = p.id) AS likes_count,
    (SELECT COUNT(*) FROM comments c WHERE c.post_id = p.id) AS comments_count,
    EXISTS(
        SELECT 1 FROM likes l WHERE l.post_id = p.id AND l.user_id = $1
    ) AS liked_by_user,
    p.created_at,
    p.updated_at
"#;

#[derive(Clone)]
pub struct PostRepositoryPg {
    pool: sqlx::PgPool,
}

impl PostRepositoryPg {
    pub fn new(pool: sqlx::PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait::async_trait]
impl PostRepository for PostRepositoryPg {
    async fn create_post(&self, post: &InsertPost) -> Result<PostEntity, error::SystemError> {
        let id = Uuid::now_v7();
        let post = sqlx::query_as::<_, PostEntity>(
            r#"
            INSERT INTO posts (id, user_id, content, image_url)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(post.user_id)
        .bind(&post.content)
        .bind(&post.image_url)
        .fetch_one(&self.pool)
        .await?;

        Ok(post)
    }

    async fn find_post_by_id(
        &self,
        post_id: &Uuid,
    ) -> Result<Option<PostEntity>, error::SystemError> {
        let post = sqlx::query_as::<_, PostEntity>("SELECT * FROM posts WHERE id = $1")
            .bind(post_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(post)
    }

    async fn find_post_detail(
        &self,
        post_id: &Uuid,
        viewer_id: &Uuid,
    ) -> Result<Option<PostDetail>, error::SystemError> {
        let sql = format!(
            r#"
            SELECT {POST_DETAIL_COLUMNS}
            FROM posts p
            JOIN users u ON u.id = p.user_id
            WHERE p.id = $2
            "#
        );

        let post = sqlx::query_as::<_, PostDetail>(&sql)
            .bind(viewer_id)
            .bind(post_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(post)
    }

    async fn list_feed(
        &self,
        viewer_id: &Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PostDetail>, error::SystemError> {
        let sql = format!(
            r#"
            SELECT {POST_DETAIL_COLUMNS}
            FROM posts p
            JOIN users u ON u.id = p.user_id
            ORDER BY p.created_at DESC
            LIMIT $2 OFFSET $3
            "#
        );

        let posts = sqlx::query_as::<_, PostDetail>(&sql)
            .bind(viewer_id)
            .bind(limit)
            .bind(offset)
            .fetch_all(&self.pool)
            .await?;

        Ok(posts)
    }

    async fn list_posts_by_user(
        &self,
        author_id: &Uuid,
        viewer_id: &Uuid,
    ) -> Result<Vec<PostDetail>, error::SystemError> {
        let sql = format!(
            r#"
            SELECT {POST_DETAIL_COLUMNS}
            FROM posts p
            JOIN users u ON u.id = p.user_id
            WHERE p.user_id = $2
            ORDER BY p.created_at DESC
            "#
        );

        let posts = sqlx::query_as::<_, PostDetail>(&sql)
            .bind(viewer_id)
            .bind(author_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(posts)
    }

    async fn update_post(
        &self,
        post_id: &Uuid,
        patch: &UpdatePost,
    ) -> Result<PostEntity, error::SystemError> {
        let post = sqlx::query_as::<_, PostEntity>(
            r#"
            UPDATE posts
            SET
                content    = CASE WHEN $2::boolean THEN $3 ELSE content END,
                image_url  = CASE WHEN $4::boolean THEN $5 ELSE image_url END,
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(post_id)
        .bind(patch.content.is_some()) // $2: was content provided?
        .bind(patch.content.as_ref().and_then(|v| v.as_ref())) // $3: Option<&String>
        .bind(patch.image_url.is_some()) // $4: was image_url provided?
        .bind(patch.image_url.as_ref().and_then(|v| v.as_ref())) // $5: Option<&String>
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| error::SystemError::not_found("Post not found"))?;

        Ok(post)
    }

    async fn delete_post(&self, post_id: &Uuid) -> Result<bool, error::SystemError> {
        let rows = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(post_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows > 0)
    }
}

#[async_trait::async_trait]
impl CommentRepository for PostRepositoryPg {
    async fn create_comment(
        &self,
        comment: &InsertComment,
    ) -> Result<CommentEntity, error::SystemError> {
        let id = Uuid::now_v7();
        let comment = sqlx::query_as::<_, CommentEntity>(
            r#"
            INSERT INTO comments (id, user_id, post_id, content)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(comment.user_id)
        .bind(comment.post_id)
        .bind(&comment.content)
        .fetch_one(&self.pool)
        .await?;

        Ok(comment)
    }

    async fn find_comment_by_id(
        &self,
        comment_id: &Uuid,
    ) -> Result<Option<CommentEntity>, error::SystemError> {
        let comment = sqlx::query_as::<_, CommentEntity>("SELECT * FROM comments WHERE id = $1")
            .bind(comment_id)
            .fetch_optional(&self.pool)
            .await?;

        Ok(comment)
    }

    async fn list_comments(
        &self,
        post_id: &Uuid,
    ) -> Result<Vec<CommentView>, error::SystemError> {
        let comments = sqlx::query_as::<_, CommentView>(
            r#"
            SELECT
                c.id,
                c.post_id,
                c.user_id,
                u.username,
                u.avatar_url,
                c.content,
                c.created_at
            FROM comments c
            JOIN users u ON u.id = c.user_id
            WHERE c.post_id = $1
            ORDER BY c.created_at ASC
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(comments)
    }

    async fn delete_comment(&self, comment_id: &Uuid) -> Result<bool, error::SystemError> {
        let rows = sqlx::query("DELETE FROM comments WHERE id = $1")
            .bind(comment_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows > 0)
    }
}

#[async_trait::async_trait]
impl LikeRepository for PostRepositoryPg {
    async fn like_exists(
        &self,
        post_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<bool, error::SystemError> {
        let row: (bool,) = sqlx::query_as(
            "SELECT EXISTS(SELECT 1 FROM likes WHERE post_id = $1 AND user_id = $2)",
        )
        .bind(post_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.0)
    }

    async fn create_like(
        &self,
        post_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<(), error::SystemError> {
        sqlx::query("INSERT INTO likes (post_id, user_id) VALUES ($1, $2)")
            .bind(post_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete_like(
        &self,
        post_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<bool, error::SystemError> {
        let rows = sqlx::query("DELETE FROM likes WHERE post_id = $1 AND user_id = $2")
            .bind(post_id)
            .bind(user_id)
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(rows > 0)
    }
}

impl PostRepo for PostRepositoryPg {}
