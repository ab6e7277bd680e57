use actix_web::{delete, get, patch, post, web, HttpRequest};
use uuid::Uuid;

use crate::{
    api::{error, success},
    middlewares::get_claims,
    modules::{
        post::{
            model::{
                CommentView, CreateCommentBody, CreatePostBody, FeedQuery, PostDetail,
                UpdatePostBody,
            },
            repository_pg::PostRepositoryPg,
            schema::{CommentEntity, PostEntity},
            service::PostService,
        },
        user::repository_pg::UserRepositoryPg,
    },
    utils::{ValidatedJson, ValidatedQuery},
};

pub type PostSvc = PostService<PostRepositoryPg, UserRepositoryPg>;

#[post("/")]
pub async fn create_post(
    post_service: web::Data<PostSvc>,
    body: ValidatedJson<CreatePostBody>,
    req: HttpRequest,
) -> Result<success::Success<PostEntity>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let post = post_service.create_post(user_id, body.0).await?;

    Ok(success::Success::created(Some(post)).message("Post created successfully"))
}

#[get("/")]
pub async fn get_feed(
    post_service: web::Data<PostSvc>,
    query: ValidatedQuery<FeedQuery>,
    req: HttpRequest,
) -> Result<success::Success<Vec<PostDetail>>, error::Error> {
    let viewer_id = get_claims(&req)?.sub;
    let posts = post_service.get_feed(viewer_id, query.0.limit, query.0.offset).await?;

    Ok(success::Success::ok(Some(posts)).message("Feed retrieved successfully"))
}

#[get("/user/{user_id}")]
pub async fn get_user_posts(
    post_service: web::Data<PostSvc>,
    author_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<Vec<PostDetail>>, error::Error> {
    let viewer_id = get_claims(&req)?.sub;
    let posts = post_service.get_user_posts(*author_id, viewer_id).await?;

    Ok(success::Success::ok(Some(posts)).message("Posts retrieved successfully"))
}

#[get("/{post_id}")]
pub async fn get_post(
    post_service: web::Data<PostSvc>,
    post_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<PostDetail>, error::Error> {
    let viewer_id = get_claims(&req)?.sub;
    let post = post_service.get_post(viewer_id, *post_id).await?;

    Ok(success::Success::ok(Some(post)).message("Post retrieved successfully"))
}

#[patch("/{post_id}")]
pub async fn update_post(
    post_service: web::Data<PostSvc>,
    post_id: web::Path<Uuid>,
    body: ValidatedJson<UpdatePostBody>,
    req: HttpRequest,
) -> Result<success::Success<PostEntity>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let post = post_service.update_post(user_id, *post_id, body.0).await?;

    Ok(success::Success::ok(Some(post)).message("Post updated successfully"))
}

#[delete("/{post_id}")]
pub async fn delete_post(
    post_service: web::Data<PostSvc>,
    post_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    post_service.delete_post(user_id, *post_id).await?;
    Ok(success::Success::no_content())
}

#[post("/{post_id}/comments")]
pub async fn create_comment(
    post_service: web::Data<PostSvc>,
    post_id: web::Path<Uuid>,
    body: ValidatedJson<CreateCommentBody>,
    req: HttpRequest,
) -> Result<success::Success<CommentEntity>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let comment = post_service.create_comment(user_id, *post_id, body.0.content).await?;

    Ok(success::Success::created(Some(comment)).message("Comment created successfully"))
}

#[get("/{post_id}/comments")]
pub async fn get_comments(
    post_service: web::Data<PostSvc>,
    post_id: web::Path<Uuid>,
) -> Result<success::Success<Vec<CommentView>>, error::Error> {
    let comments = post_service.get_comments(*post_id).await?;

    Ok(success::Success::ok(Some(comments)).message("Comments retrieved successfully"))
}

#[delete("/comments/{comment_id}")]
pub async fn delete_comment(
    post_service: web::Data<PostSvc>,
    comment_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    post_service.delete_comment(user_id, *comment_id).await?;
    Ok(success::Success::no_content())
}

#[post("/{post_id}/like")]
pub async fn like_post(
    post_service: web::Data<PostSvc>,
    post_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    post_service.like_post(user_id, *post_id).await?;
    Ok(success::Success::created(None).message("Post liked"))
}

#[delete("/{post_id}/like")]
pub async fn unlike_post(
    post_service: web::Data<PostSvc>,
    post_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    post_service.unlike_post(user_id, *post_id).await?;
    Ok(success::Success::no_content())
}
