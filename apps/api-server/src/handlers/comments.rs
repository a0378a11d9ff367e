//! Comment handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;
use validator::Validate;

use devhub_core::DomainError;
use devhub_core::domain::{Comment, NotificationKind};
use devhub_core::policy;
use devhub_core::ports::BaseRepository;
use devhub_shared::Envelope;
use devhub_shared::dto::{CommentPayload, CreateCommentRequest, UpdateCommentRequest};

use crate::handlers::present::{comment_view, notify};
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

async fn fetch(state: &AppState, id: Uuid) -> AppResult<Comment> {
    state
        .comments
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("comment", id).into())
}

/// POST /api/comments - the post's owner is notified.
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreateCommentRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    let post_id = req
        .post_id
        .ok_or_else(|| AppError::BadRequest("post_id is required".to_string()))?;
    let post = state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| AppError::from(DomainError::not_found("post", post_id)))?;

    let comment = state
        .comments
        .insert(Comment::new(post.id, identity.user_id, req.body))
        .await?;

    if post.user_id != identity.user_id {
        notify(&state, post.user_id, identity.user_id, NotificationKind::Comment).await;
    }

    tracing::info!(comment_id = %comment.id, post_id = %post.id, "Comment created");

    Ok(HttpResponse::Created().json(Envelope::success(
        "Successfully created comment!",
        CommentPayload {
            comment: comment_view(comment),
        },
    )))
}

/// GET /api/comments/{id}
pub async fn find_one(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let comment = fetch(&state, *path).await?;

    Ok(HttpResponse::Ok().json(Envelope::success(
        "Successfully fetched comment by ID",
        CommentPayload {
            comment: comment_view(comment),
        },
    )))
}

/// PUT /api/comments/{id}
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<UpdateCommentRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    let mut comment = fetch(&state, *path).await?;
    policy::authorize(&identity, comment.user_id)?;

    comment.edit(req.body);
    let comment = state.comments.update(comment).await?;

    tracing::info!(comment_id = %comment.id, actor = %identity.user_id, "Comment updated");

    Ok(HttpResponse::Ok().json(Envelope::success(
        "Successfully updated comment!",
        CommentPayload {
            comment: comment_view(comment),
        },
    )))
}

/// DELETE /api/comments/{id}
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let comment = fetch(&state, *path).await?;
    policy::authorize(&identity, comment.user_id)?;

    state.comments.delete(comment.id).await?;
    tracing::info!(comment_id = %comment.id, actor = %identity.user_id, "Comment deleted");

    Ok(HttpResponse::Ok().json(Envelope::done("Successfully deleted comment!")))
}
