use std::sync::Arc;
use uuid::Uuid;

use crate::api::error;
use crate::modules::user::model::{
    InsertUser, SignInModel, SignUpModel, UpdatePasswordModel, UpdateProfile, UpdateProfileModel,
    UserResponse,
};
use crate::modules::user::repository::UserRepository;
use crate::utils::{hash_password, verify_password, Claims};
use crate::ENV;

#[derive(Clone)]
pub struct UserService<U>
where
    U: UserRepository + Send + Sync,
{
    repo: Arc<U>,
}

impl<U> UserService<U>
where
    U: UserRepository + Send + Sync,
{
    pub fn with_dependencies(repo: Arc<U>) -> Self {
        UserService { repo }
    }

    pub async fn get_by_id(&self, id: Uuid) -> Result<UserResponse, error::SystemError> {
        let user = self
            .repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("User not found"))?;
        Ok(UserResponse::from(user))
    }

    pub async fn sign_up(
        &self,
        user: SignUpModel,
    ) -> Result<(String, UserResponse), error::SystemError> {
        if self.repo.find_by_username(&user.username).await?.is_some() {
            return Err(error::SystemError::conflict("Username already exists"));
        }
        if self.repo.find_by_email(&user.email).await?.is_some() {
            return Err(error::SystemError::conflict("Email already exists"));
        }

        let hash_password = hash_password(&user.password)?;

        let created = self
            .repo
            .create(&InsertUser { username: user.username, email: user.email, hash_password })
            .await?;

        let token = Claims::new(&created.id, &created.username, &created.email, ENV.token_expiration)
            .encode(ENV.jwt_secret.as_ref())?;

        Ok((token, UserResponse::from(created)))
    }

    pub async fn sign_in(
        &self,
        credentials: SignInModel,
    ) -> Result<(String, UserResponse), error::SystemError> {
        let user = self
            .repo
            .find_by_login(&credentials.login)
            .await?
            .ok_or_else(|| error::SystemError::unauthorized("Invalid username or password"))?;

        let valid = verify_password(&user.hash_password, &credentials.password)?;
        if !valid {
            return Err(error::SystemError::unauthorized("Invalid username or password"));
        }

        let token = Claims::new(&user.id, &user.username, &user.email, ENV.token_expiration)
            .encode(ENV.jwt_secret.as_ref())?;

        Ok((token, UserResponse::from(user)))
    }

    pub async fn update_profile(
        &self,
        id: Uuid,
        patch: UpdateProfileModel,
    ) -> Result<UserResponse, error::SystemError> {
        if patch.username.is_none()
            && patch.email.is_none()
            && patch.avatar_url.is_none()
            && patch.bio.is_none()
        {
            return Err(error::SystemError::bad_request("No fields to update"));
        }

        if let Some(username) = &patch.username {
            if let Some(existing) = self.repo.find_by_username(username).await? {
                if existing.id != id {
                    return Err(error::SystemError::conflict("Username already exists"));
                }
            }
        }

        if let Some(email) = &patch.email {
            if let Some(existing) = self.repo.find_by_email(email).await? {
                if existing.id != id {
                    return Err(error::SystemError::conflict("Email already exists"));
                }
            }
        }

        let updated = self
            .repo
            .update_profile(
                &id,
                &UpdateProfile {
                    username: patch.username,
                    email: patch.email,
                    avatar_url: patch.avatar_url,
                    bio: patch.bio,
                },
            )
            .await?;

        Ok(UserResponse::from(updated))
    }

    pub async fn update_password(
        &self,
        id: Uuid,
        model: UpdatePasswordModel,
    ) -> Result<(), error::SystemError> {
        let user = self
            .repo
            .find_by_id(&id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("User not found"))?;

        let valid = verify_password(&user.hash_password, &model.current_password)?;
        if !valid {
            return Err(error::SystemError::unauthorized("Current password is incorrect"));
        }

        let hash = hash_password(&model.new_password)?;
        let updated = self.repo.set_password(&id, &hash).await?;
        if !updated {
            return Err(error::SystemError::not_found("User not found"));
        }

        Ok(())
    }
}
