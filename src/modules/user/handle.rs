use actix_web::{get, patch, post, web, HttpRequest};
use uuid::Uuid;

use crate::{
    api::{error, success},
    middlewares::get_claims,
    modules::user::{model, repository_pg::UserRepositoryPg, service::UserService},
    utils::{auth_cookie, clear_auth_cookie, ValidatedJson},
};

pub type UserSvc = UserService<UserRepositoryPg>;

#[post("/signup")]
pub async fn sign_up(
    user_service: web::Data<UserSvc>,
    user_data: ValidatedJson<model::SignUpModel>,
) -> Result<success::Success<model::AuthResponse>, error::Error> {
    let (token, user) = user_service.sign_up(user_data.0).await?;
    let cookie = auth_cookie(token.clone());

    Ok(success::Success::created(Some(model::AuthResponse { token, user }))
        .message("Signup successful")
        .cookies(vec![cookie]))
}

#[post("/signin")]
pub async fn sign_in(
    user_service: web::Data<UserSvc>,
    user_data: ValidatedJson<model::SignInModel>,
) -> Result<success::Success<model::AuthResponse>, error::Error> {
    let (token, user) = user_service.sign_in(user_data.0).await?;
    let cookie = auth_cookie(token.clone());

    Ok(success::Success::ok(Some(model::AuthResponse { token, user }))
        .message("Signin successful")
        .cookies(vec![cookie]))
}

#[post("/signout")]
pub async fn sign_out() -> Result<success::Success<()>, error::Error> {
    Ok(success::Success::no_content().cookies(vec![clear_auth_cookie()]))
}

#[get("/profile")]
pub async fn get_profile(
    user_service: web::Data<UserSvc>,
    req: HttpRequest,
) -> Result<success::Success<model::UserResponse>, error::Error> {
    let id = get_claims(&req)?.sub;
    let user = user_service.get_by_id(id).await?;
    Ok(success::Success::ok(Some(user)).message("Profile retrieved successfully"))
}

#[get("/{id:[0-9a-fA-F-]{36}}")]
pub async fn get_user(
    user_service: web::Data<UserSvc>,
    user_id: web::Path<Uuid>,
) -> Result<success::Success<model::UserResponse>, error::Error> {
    let user = user_service.get_by_id(user_id.into_inner()).await?;
    Ok(success::Success::ok(Some(user)).message("User retrieved successfully"))
}

#[patch("/profile")]
pub async fn update_profile(
    user_service: web::Data<UserSvc>,
    patch: ValidatedJson<model::UpdateProfileModel>,
    req: HttpRequest,
) -> Result<success::Success<model::UserResponse>, error::Error> {
    let id = get_claims(&req)?.sub;
    let user = user_service.update_profile(id, patch.0).await?;
    Ok(success::Success::ok(Some(user)).message("Profile updated successfully"))
}

#[patch("/password")]
pub async fn update_password(
    user_service: web::Data<UserSvc>,
    body: ValidatedJson<model::UpdatePasswordModel>,
    req: HttpRequest,
) -> Result<success::Success<()>, error::Error> {
    let id = get_claims(&req)?.sub;
    user_service.update_password(id, body.0).await?;
    Ok(success::Success::no_content())
}
