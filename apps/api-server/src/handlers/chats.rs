//! Direct messages between two users.

use actix_web::{HttpResponse, web};
use validator::Validate;

use devhub_core::domain::{Message, NotificationKind, RoomId};
use devhub_core::policy;
use devhub_core::ports::{BaseRepository, MessageRepository};
use devhub_shared::Envelope;
use devhub_shared::dto::{
    ChatView, ChatsPayload, MessagePayload, MessagesPayload, SendMessageRequest,
};

use crate::handlers::present::{message_view, notify, resolve_user, summaries};
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// GET /api/users/{id}/chats - everyone the user has exchanged messages with.
pub async fn find_chats(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let user = resolve_user(&state, &path).await?;
    policy::authorize(&identity, user.id)?;

    let partners: Vec<_> = state
        .messages
        .find_rooms_for_user(user.id)
        .await?
        .iter()
        .filter_map(|room| room.other_participant(user.id))
        .collect();
    let users = summaries(&state, partners.iter().copied()).await?;

    let chats = partners
        .iter()
        .filter_map(|id| users.get(id).cloned())
        .map(|user| ChatView { user })
        .collect();

    Ok(HttpResponse::Ok().json(Envelope::success(
        "Successfully fetched chats",
        ChatsPayload { chats },
    )))
}

/// GET /api/users/{id}/chats/{other}
pub async fn find_messages(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<(String, String)>,
) -> AppResult<HttpResponse> {
    let (user_ref, other_ref) = path.into_inner();
    let user = resolve_user(&state, &user_ref).await?;
    policy::authorize(&identity, user.id)?;
    let other = resolve_user(&state, &other_ref).await?;

    let room_id = RoomId::between(user.id, other.id);
    let messages = state.messages.find_by_room(&room_id).await?;
    tracing::debug!(room = %room_id, count = messages.len(), "Fetched messages");

    Ok(HttpResponse::Ok().json(Envelope::success(
        "Successfully fetched messages",
        MessagesPayload {
            room_id: room_id.to_string(),
            messages: messages.into_iter().map(message_view).collect(),
        },
    )))
}

/// POST /api/users/{id}/chats/{other} - only `{id}` itself may send.
pub async fn send_message(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<(String, String)>,
    body: web::Json<SendMessageRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    let (user_ref, other_ref) = path.into_inner();
    let sender = resolve_user(&state, &user_ref).await?;
    policy::ensure_self(&identity, sender.id)?;
    let recipient = resolve_user(&state, &other_ref).await?;
    if sender.id == recipient.id {
        return Err(AppError::BadRequest(
            "Cannot send a message to yourself".to_string(),
        ));
    }

    let message = state
        .messages
        .insert(Message::new(sender.id, recipient.id, req.message))
        .await?;
    notify(&state, recipient.id, sender.id, NotificationKind::Message).await;

    tracing::info!(room = %message.room_id, sender = %sender.id, "Message sent");

    Ok(HttpResponse::Created().json(Envelope::success(
        "Successfully sent message!",
        MessagePayload {
            message: message_view(message),
        },
    )))
}
