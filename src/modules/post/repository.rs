use uuid::Uuid;

use crate::api::error;
use crate::modules::post::model::{
    CommentView, InsertComment, InsertPost, PostDetail, UpdatePost,
};
use crate::modules::post::schema::{CommentEntity, PostEntity};

#[async_trait::async_trait]
pub trait PostRepository {
    async fn create_post(&self, post: &InsertPost) -> Result<PostEntity, error::SystemError>;

    async fn find_post_by_id(
        &self,
        post_id: &Uuid,
    ) -> Result<Option<PostEntity>, error::SystemError>;

    /// The post with author profile and derived counts, from the viewer's
    /// perspective (`liked_by_user`).
    async fn find_post_detail(
        &self,
        post_id: &Uuid,
        viewer_id: &Uuid,
    ) -> Result<Option<PostDetail>, error::SystemError>;

    async fn list_feed(
        &self,
        viewer_id: &Uuid,
        limit: i64,
        offset: i64,
    ) -> Result<Vec<PostDetail>, error::SystemError>;

    async fn list_posts_by_user(
        &self,
        author_id: &Uuid,
        viewer_id: &Uuid,
    ) -> Result<Vec<PostDetail>, error::SystemError>;

    async fn update_post(
        &self,
        post_id: &Uuid,
        patch: &UpdatePost,
    ) -> Result<PostEntity, error::SystemError>;

    async fn delete_post(&self, post_id: &Uuid) -> Result<bool, error::SystemError>;
}

#[async_trait::async_trait]
pub trait CommentRepository {
    async fn create_comment(
        &self,
        comment: &InsertComment,
    ) -> Result<CommentEntity, error::SystemError>;

    async fn find_comment_by_id(
        &self,
        comment_id: &Uuid,
    ) -> Result<Option<CommentEntity>, error::SystemError>;

    /// Comments for a post with author profile, oldest first.
    async fn list_comments(
        &self,
        post_id: &Uuid,
    ) -> Result<Vec<CommentView>, error::SystemError>;

    async fn delete_comment(&self, comment_id: &Uuid) -> Result<bool, error::SystemError>;
}

#[async_trait::async_trait]
pub trait LikeRepository {
    async fn like_exists(
        &self,
        post_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<bool, error::SystemError>;

    async fn create_like(&self, post_id: &Uuid, user_id: &Uuid)
        -> Result<(), error::SystemError>;

    async fn delete_like(
        &self,
        post_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<bool, error::SystemError>;
}

pub trait PostRepo: PostRepository + CommentRepository + LikeRepository + Send + Sync {}
