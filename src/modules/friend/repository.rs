use uuid::Uuid;

use crate::api::error;
use crate::modules::friend::model::PendingRequestRow;
use crate::modules::friend::schema::{FriendRequestEntity, FriendshipEntity, RequestStatus};
use crate::modules::user::schema::PublicProfile;

#[async_trait::async_trait]
pub trait FriendshipRepository {
    async fn find_friendship(
        &self,
        user_id_a: &Uuid,
        user_id_b: &Uuid,
    ) -> Result<Option<FriendshipEntity>, error::SystemError>;

    /// Counterpart profiles for every friendship involving the user,
    /// alphabetical by username.
    async fn find_friends(&self, user_id: &Uuid)
        -> Result<Vec<PublicProfile>, error::SystemError>;

    async fn delete_friendship(
        &self,
        user_id_a: &Uuid,
        user_id_b: &Uuid,
    ) -> Result<bool, error::SystemError>;
}

#[async_trait::async_trait]
pub trait FriendRequestRepository {
    /// A pending request between the pair, in either direction.
    async fn find_pending_between(
        &self,
        user_id_a: &Uuid,
        user_id_b: &Uuid,
    ) -> Result<Option<FriendRequestEntity>, error::SystemError>;

    /// The most recent rejected request between the pair, in either direction.
    async fn find_rejected_between(
        &self,
        user_id_a: &Uuid,
        user_id_b: &Uuid,
    ) -> Result<Option<FriendRequestEntity>, error::SystemError>;

    async fn find_request_by_id(
        &self,
        request_id: &Uuid,
    ) -> Result<Option<FriendRequestEntity>, error::SystemError>;

    /// Pending requests sent or received by the user, joined with the
    /// counterpart's profile, newest first.
    async fn find_pending_for_user(
        &self,
        user_id: &Uuid,
    ) -> Result<Vec<PendingRequestRow>, error::SystemError>;

    async fn create_request(
        &self,
        sender_id: &Uuid,
        receiver_id: &Uuid,
    ) -> Result<FriendRequestEntity, error::SystemError>;

    /// Flips an existing (rejected) request back to pending under the given
    /// direction, keeping its row id.
    async fn reopen_request(
        &self,
        request_id: &Uuid,
        sender_id: &Uuid,
        receiver_id: &Uuid,
    ) -> Result<FriendRequestEntity, error::SystemError>;

    async fn set_request_status(
        &self,
        request_id: &Uuid,
        status: RequestStatus,
    ) -> Result<FriendRequestEntity, error::SystemError>;
}

#[async_trait::async_trait]
pub trait FriendRepo: FriendshipRepository + FriendRequestRepository + Send + Sync {
    /// Marks the request accepted and inserts the friendship row as one
    /// transactional unit. Validates that the request is pending and that
    /// `user_id` is its receiver.
    async fn accept_request_atomic(
        &self,
        request_id: &Uuid,
        user_id: &Uuid,
    ) -> Result<FriendRequestEntity, error::SystemError>;
}
