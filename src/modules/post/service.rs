use std::sync::Arc;

use uuid::Uuid;

use crate::{
    api::error,
    modules::{
        post::{
            model::{
                CommentView, CreatePostBody, InsertComment, InsertPost, PostDetail, UpdatePost,
                UpdatePostBody,
            },
            repository::PostRepo,
            schema::{CommentEntity, PostEntity},
        },
        user::repository::UserRepository,
    },
};

const DEFAULT_FEED_SIZE: i64 = 20;

fn normalized(content: Option<String>) -> Option<String> {
    content.map(|c| c.trim().to_string()).filter(|c| !c.is_empty())
}

#[derive(Clone)]
pub struct PostService<P, U>
where
    P: PostRepo + Send + Sync,
    U: UserRepository + Send + Sync,
{
    post_repo: Arc<P>,
    user_repo: Arc<U>,
}

impl<P, U> PostService<P, U>
where
    P: PostRepo + Send + Sync,
    U: UserRepository + Send + Sync,
{
    pub fn with_dependencies(post_repo: Arc<P>, user_repo: Arc<U>) -> Self {
        PostService { post_repo, user_repo }
    }

    pub async fn create_post(
        &self,
        user_id: Uuid,
        body: CreatePostBody,
    ) -> Result<PostEntity, error::SystemError> {
        let content = normalized(body.content);

        if content.is_none() && body.image_url.is_none() {
            return Err(error::SystemError::bad_request("Post must have content or an image"));
        }

        self.post_repo
            .create_post(&InsertPost { user_id, content, image_url: body.image_url })
            .await
    }

    pub async fn get_post(
        &self,
        viewer_id: Uuid,
        post_id: Uuid,
    ) -> Result<PostDetail, error::SystemError> {
        self.post_repo
            .find_post_detail(&post_id, &viewer_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Post not found"))
    }

    pub async fn get_feed(
        &self,
        viewer_id: Uuid,
        limit: Option<i64>,
        offset: Option<i64>,
    ) -> Result<Vec<PostDetail>, error::SystemError> {
        let limit = limit.unwrap_or(DEFAULT_FEED_SIZE).clamp(1, 100);
        let offset = offset.unwrap_or(0).max(0);

        self.post_repo.list_feed(&viewer_id, limit, offset).await
    }

    pub async fn get_user_posts(
        &self,
        author_id: Uuid,
        viewer_id: Uuid,
    ) -> Result<Vec<PostDetail>, error::SystemError> {
        if self.user_repo.find_by_id(&author_id).await?.is_none() {
            return Err(error::SystemError::not_found("User not found"));
        }

        self.post_repo.list_posts_by_user(&author_id, &viewer_id).await
    }

    pub async fn update_post(
        &self,
        user_id: Uuid,
        post_id: Uuid,
        body: UpdatePostBody,
    ) -> Result<PostEntity, error::SystemError> {
        let post = self
            .post_repo
            .find_post_by_id(&post_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Post not found"))?;

        if post.user_id != user_id {
            return Err(error::SystemError::forbidden("You can only edit your own posts"));
        }

        let patch = UpdatePost {
            content: body.content.map(normalized),
            image_url: body.image_url,
        };

        // The content-or-image invariant must still hold after the patch.
        let next_content = patch.content.as_ref().unwrap_or(&post.content);
        let next_image = patch.image_url.as_ref().unwrap_or(&post.image_url);
        if next_content.is_none() && next_image.is_none() {
            return Err(error::SystemError::bad_request("Post must have content or an image"));
        }

        self.post_repo.update_post(&post_id, &patch).await
    }

    pub async fn delete_post(
        &self,
        user_id: Uuid,
        post_id: Uuid,
    ) -> Result<(), error::SystemError> {
        let post = self
            .post_repo
            .find_post_by_id(&post_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Post not found"))?;

        if post.user_id != user_id {
            return Err(error::SystemError::forbidden("You can only delete your own posts"));
        }

        self.post_repo.delete_post(&post_id).await?;
        Ok(())
    }

    pub async fn create_comment(
        &self,
        user_id: Uuid,
        post_id: Uuid,
        content: String,
    ) -> Result<CommentEntity, error::SystemError> {
        let content = content.trim().to_string();
        if content.is_empty() {
            return Err(error::SystemError::bad_request("Comment content cannot be empty"));
        }

        if self.post_repo.find_post_by_id(&post_id).await?.is_none() {
            return Err(error::SystemError::not_found("Post not found"));
        }

        self.post_repo.create_comment(&InsertComment { user_id, post_id, content }).await
    }

    pub async fn get_comments(
        &self,
        post_id: Uuid,
    ) -> Result<Vec<CommentView>, error::SystemError> {
        if self.post_repo.find_post_by_id(&post_id).await?.is_none() {
            return Err(error::SystemError::not_found("Post not found"));
        }

        self.post_repo.list_comments(&post_id).await
    }

    pub async fn delete_comment(
        &self,
        user_id: Uuid,
        comment_id: Uuid,
    ) -> Result<(), error::SystemError> {
        let comment = self
            .post_repo
            .find_comment_by_id(&comment_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Comment not found"))?;

        if comment.user_id != user_id {
            return Err(error::SystemError::forbidden("You can only delete your own comments"));
        }

        self.post_repo.delete_comment(&comment_id).await?;
        Ok(())
    }

    pub async fn like_post(&self, user_id: Uuid, post_id: Uuid) -> Result<(), error::SystemError> {
        if self.post_repo.find_post_by_id(&post_id).await?.is_none() {
            return Err(error::SystemError::not_found("Post not found"));
        }

        if self.post_repo.like_exists(&post_id, &user_id).await? {
            return Err(error::SystemError::conflict("Post already liked"));
        }

        self.post_repo.create_like(&post_id, &user_id).await
    }

    pub async fn unlike_post(
        &self,
        user_id: Uuid,
        post_id: Uuid,
    ) -> Result<(), error::SystemError> {
        if self.post_repo.find_post_by_id(&post_id).await?.is_none() {
            return Err(error::SystemError::not_found("Post not found"));
        }

        let deleted = self.post_repo.delete_like(&post_id, &user_id).await?;
        if !deleted {
            return Err(error::SystemError::bad_request("Post is not liked"));
        }

        Ok(())
    }
}
