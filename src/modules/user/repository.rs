use uuid::Uuid;

use crate::api::error;
use crate::modules::user::model::{InsertUser, UpdateProfile};
use crate::modules::user::schema::UserEntity;

#[async_trait::async_trait]
pub trait UserRepository {
    async fn find_by_id(&self, id: &Uuid) -> Result<Option<UserEntity>, error::SystemError>;

    async fn find_by_username(
        &self,
        username: &str,
    ) -> Result<Option<UserEntity>, error::SystemError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<UserEntity>, error::SystemError>;

    /// Matches `login` against username and email, both case-insensitive.
    async fn find_by_login(&self, login: &str) -> Result<Option<UserEntity>, error::SystemError>;

    async fn create(&self, user: &InsertUser) -> Result<UserEntity, error::SystemError>;

    async fn update_profile(
        &self,
        id: &Uuid,
        patch: &UpdateProfile,
    ) -> Result<UserEntity, error::SystemError>;

    async fn set_password(&self, id: &Uuid, hash: &str) -> Result<bool, error::SystemError>;
}
