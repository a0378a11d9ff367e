//! Post handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;
use validator::Validate;

use devhub_core::DomainError;
use devhub_core::domain::{Post, PostChanges};
use devhub_core::pagination::Page;
use devhub_core::policy;
use devhub_core::ports::{BaseRepository, CommentRepository, PostRepository};
use devhub_shared::Envelope;
use devhub_shared::dto::{
    CreatePostRequest, CreatedPostPayload, PageParams, PostDetailPayload, PostPayload,
    PostsPayload, UpdatePostRequest,
};

use crate::handlers::present::{comment_view, created_post, feed, post_view};
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

async fn fetch(state: &AppState, id: Uuid) -> AppResult<Post> {
    state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| DomainError::not_found("post", id).into())
}

/// GET /api/posts?start=&count= - the global feed, newest first.
pub async fn find_all(
    state: web::Data<AppState>,
    query: web::Query<PageParams>,
) -> AppResult<HttpResponse> {
    let page = Page::from_params(query.start.as_deref(), query.count.as_deref());
    let posts = state.posts.find_recent(page).await?;

    Ok(HttpResponse::Ok().json(Envelope::success(
        "Successfully fetched posts",
        PostsPayload {
            posts: feed(&state, posts).await?,
        },
    )))
}

/// POST /api/posts
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    let post = Post::new(identity.user_id, req.title, req.description, req.post_type);
    let post = state.posts.insert(post).await?;

    tracing::info!(post_id = %post.id, user_id = %identity.user_id, "Post created");

    Ok(HttpResponse::Created().json(Envelope::success(
        "Successfully created post!",
        CreatedPostPayload {
            post: created_post(post),
        },
    )))
}

/// GET /api/posts/{id}
pub async fn find_one(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = fetch(&state, *path).await?;
    let comments = state.comments.find_by_post_ids(&[post.id]).await?;

    Ok(HttpResponse::Ok().json(Envelope::success(
        "Successfully fetched post by ID",
        PostDetailPayload {
            post: post_view(post),
            comments: comments.into_iter().map(comment_view).collect(),
        },
    )))
}

/// PUT /api/posts/{id}
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    let mut post = fetch(&state, *path).await?;
    policy::authorize(&identity, post.user_id)?;

    post.apply(PostChanges {
        title: req.title,
        description: req.description,
        post_type: req.post_type,
    });
    let post = state.posts.update(post).await?;

    tracing::info!(post_id = %post.id, actor = %identity.user_id, "Post updated");

    Ok(HttpResponse::Ok().json(Envelope::success(
        "Successfully updated post!",
        PostPayload {
            post: post_view(post),
        },
    )))
}

/// DELETE /api/posts/{id} - comments go with the post.
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = fetch(&state, *path).await?;
    policy::authorize(&identity, post.user_id)?;

    // Post first: a failed delete must leave its comments intact.
    // On Postgres the FK cascade has already removed them.
    state.posts.delete(post.id).await?;
    let comments = state.comments.delete_by_post_id(post.id).await?;

    tracing::info!(post_id = %post.id, actor = %identity.user_id, comments, "Post deleted");

    Ok(HttpResponse::Ok().json(Envelope::done("Successfully deleted post!")))
}
