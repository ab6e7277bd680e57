use std::sync::Arc;

use uuid::Uuid;

use crate::{
    api::error,
    modules::{
        friend::{
            model::{
                FriendshipState, FriendshipStatusResponse, PendingRequestView, RequestDirection,
            },
            repository::FriendRepo,
            schema::{FriendRequestEntity, RequestStatus},
        },
        user::{repository::UserRepository, schema::PublicProfile},
    },
};

#[derive(Clone)]
pub struct FriendService<R, U>
where
    R: FriendRepo + Send + Sync,
    U: UserRepository + Send + Sync,
{
    friend_repo: Arc<R>,
    user_repo: Arc<U>,
}

impl<R, U> FriendService<R, U>
where
    R: FriendRepo + Send + Sync,
    U: UserRepository + Send + Sync,
{
    pub fn with_dependencies(friend_repo: Arc<R>, user_repo: Arc<U>) -> Self {
        FriendService { friend_repo, user_repo }
    }

    pub async fn send_friend_request(
        &self,
        sender_id: Uuid,
        receiver_id: Uuid,
    ) -> Result<FriendRequestEntity, error::SystemError> {
        if receiver_id == sender_id {
            return Err(error::SystemError::bad_request("Cannot send friend request to yourself"));
        }

        if self.user_repo.find_by_id(&receiver_id).await?.is_none() {
            return Err(error::SystemError::not_found("User not found"));
        }

        if self.friend_repo.find_friendship(&sender_id, &receiver_id).await?.is_some() {
            return Err(error::SystemError::conflict("Users are already friends"));
        }

        if let Some(pending) =
            self.friend_repo.find_pending_between(&sender_id, &receiver_id).await?
        {
            if pending.sender_id == sender_id {
                return Err(error::SystemError::conflict("Friend request already sent"));
            }
            return Err(error::SystemError::conflict(
                "This user has already sent you a friend request",
            ));
        }

        // A rejected request between the pair is reused rather than duplicated,
        // keeping its id across the reject/re-send cycle.
        if let Some(rejected) =
            self.friend_repo.find_rejected_between(&sender_id, &receiver_id).await?
        {
            let reopened =
                self.friend_repo.reopen_request(&rejected.id, &sender_id, &receiver_id).await?;
            return Ok(reopened);
        }

        let request = self.friend_repo.create_request(&sender_id, &receiver_id).await?;

        Ok(request)
    }

    pub async fn accept_friend_request(
        &self,
        user_id: Uuid,
        request_id: Uuid,
    ) -> Result<FriendRequestEntity, error::SystemError> {
        self.friend_repo.accept_request_atomic(&request_id, &user_id).await
    }

    pub async fn decline_friend_request(
        &self,
        user_id: Uuid,
        request_id: Uuid,
    ) -> Result<FriendRequestEntity, error::SystemError> {
        let request = self
            .friend_repo
            .find_request_by_id(&request_id)
            .await?
            .ok_or_else(|| error::SystemError::not_found("Friend request not found"))?;

        if request.status != RequestStatus::Pending {
            return Err(error::SystemError::bad_request("Friend request is not pending"));
        }

        if request.receiver_id != user_id {
            return Err(error::SystemError::forbidden(
                "You are not allowed to decline this friend request",
            ));
        }

        self.friend_repo.set_request_status(&request_id, RequestStatus::Rejected).await
    }

    pub async fn remove_friend(
        &self,
        user_id: Uuid,
        friend_id: Uuid,
    ) -> Result<(), error::SystemError> {
        let deleted = self.friend_repo.delete_friendship(&user_id, &friend_id).await?;
        if !deleted {
            return Err(error::SystemError::not_found("Friendship not found"));
        }
        Ok(())
    }

    pub async fn get_friends(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<PublicProfile>, error::SystemError> {
        self.friend_repo.find_friends(&user_id).await
    }

    pub async fn get_friend_requests(
        &self,
        user_id: Uuid,
    ) -> Result<Vec<PendingRequestView>, error::SystemError> {
        let rows = self.friend_repo.find_pending_for_user(&user_id).await?;

        Ok(rows
            .into_iter()
            .map(|r| PendingRequestView {
                id: r.id,
                direction: if r.sender_id == user_id {
                    RequestDirection::Sent
                } else {
                    RequestDirection::Received
                },
                user: PublicProfile {
                    id: r.user_id,
                    username: r.username,
                    avatar_url: r.avatar_url,
                    bio: r.bio,
                },
                created_at: r.created_at,
            })
            .collect())
    }

    pub async fn check_friendship_status(
        &self,
        user_id: Uuid,
        other_id: Uuid,
    ) -> Result<FriendshipStatusResponse, error::SystemError> {
        if self.friend_repo.find_friendship(&user_id, &other_id).await?.is_some() {
            return Ok(FriendshipStatusResponse {
                status: FriendshipState::Friends,
                request_id: None,
            });
        }

        if let Some(pending) = self.friend_repo.find_pending_between(&user_id, &other_id).await? {
            let status = if pending.sender_id == user_id {
                FriendshipState::RequestSent
            } else {
                FriendshipState::RequestReceived
            };
            return Ok(FriendshipStatusResponse { status, request_id: Some(pending.id) });
        }

        Ok(FriendshipStatusResponse { status: FriendshipState::None, request_id: None })
    }
}
