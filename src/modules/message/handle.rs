use actix_web::{get, patch, post, web, HttpRequest};
use uuid::Uuid;

use crate::{
    api::{error, success},
    middlewares::get_claims,
    modules::{
        friend::repository_pg::FriendRepositoryPg,
        message::{
            model::{ConversationQuery, ConversationSummary, SendMessageBody},
            repository_pg::MessageRepositoryPg,
            schema::MessageEntity,
            service::MessageService,
        },
        user::repository_pg::UserRepositoryPg,
    },
    utils::{ValidatedJson, ValidatedQuery},
};

pub type MessageSvc = MessageService<MessageRepositoryPg, FriendRepositoryPg, UserRepositoryPg>;

#[post("/")]
pub async fn send_message(
    message_service: web::Data<MessageSvc>,
    body: ValidatedJson<SendMessageBody>,
    req: HttpRequest,
) -> Result<success::Success<MessageEntity>, error::Error> {
    let sender_id = get_claims(&req)?.sub;
    let message =
        message_service.send_message(sender_id, body.0.receiver_id, body.0.content).await?;

    Ok(success::Success::created(Some(message)).message("Message sent successfully"))
}

#[patch("/{message_id}/read")]
pub async fn mark_message_as_read(
    message_service: web::Data<MessageSvc>,
    message_id: web::Path<Uuid>,
    req: HttpRequest,
) -> Result<success::Success<MessageEntity>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let message = message_service.mark_message_as_read(user_id, *message_id).await?;

    Ok(success::Success::ok(Some(message)).message("Message marked as read"))
}

#[get("/conversations")]
pub async fn list_conversations(
    message_service: web::Data<MessageSvc>,
    req: HttpRequest,
) -> Result<success::Success<Vec<ConversationSummary>>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let conversations = message_service.get_conversation_list(user_id).await?;

    Ok(success::Success::ok(Some(conversations)).message("Conversations retrieved successfully"))
}

#[get("/conversations/{user_id}")]
pub async fn get_conversation(
    message_service: web::Data<MessageSvc>,
    other_id: web::Path<Uuid>,
    query: ValidatedQuery<ConversationQuery>,
    req: HttpRequest,
) -> Result<success::Success<Vec<MessageEntity>>, error::Error> {
    let user_id = get_claims(&req)?.sub;
    let messages =
        message_service.get_conversation(user_id, *other_id, query.0.limit, query.0.before).await?;

    Ok(success::Success::ok(Some(messages)).message("Conversation retrieved successfully"))
}
