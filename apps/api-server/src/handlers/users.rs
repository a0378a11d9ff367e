//! User, profile and notification handlers.

use actix_web::{HttpResponse, web};
use validator::Validate;

use devhub_core::domain::{Profile, ProfileChanges, Role, User};
use devhub_core::pagination::Page;
use devhub_core::policy::{self, Actor};
use devhub_core::ports::{
    BaseRepository, NotificationRepository, PostRepository, ProfileRepository, UserRepository,
};
use devhub_shared::Envelope;
use devhub_shared::dto::{
    ClearedPayload, CreateUserRequest, NotificationView, NotificationsPayload, PageParams,
    PostsPayload, UpdatePasswordRequest, UpdateProfileRequest, UpdateUserRequest, UserPayload,
    UserProfilePayload,
};

use crate::handlers::auth::auth_payload;
use crate::handlers::present::{feed, profile_view, resolve_user, summaries, user_detail};
use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

async fn ensure_available(state: &AppState, username: &str, email: &str) -> AppResult<()> {
    if state.users.find_by_username(username).await?.is_some() {
        return Err(AppError::Conflict("Username is already taken".to_string()));
    }
    if state.users.find_by_email(email).await?.is_some() {
        return Err(AppError::Conflict("Email is already registered".to_string()));
    }
    Ok(())
}

/// The profile of `user`, created on the spot if it went missing.
async fn profile_of(state: &AppState, user: &User) -> AppResult<Profile> {
    match state.profiles.find_by_user_id(user.id).await? {
        Some(profile) => Ok(profile),
        None => {
            tracing::warn!(user_id = %user.id, "Profile missing, recreating");
            Ok(state.profiles.insert(Profile::empty_for(user.id)).await?)
        }
    }
}

/// POST /api/users
pub async fn create(
    state: web::Data<AppState>,
    body: web::Json<CreateUserRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;

    ensure_available(&state, &req.username, &req.email).await?;

    let password_hash = state.passwords.hash(&req.password)?;
    let user = state
        .users
        .insert(User::new(req.username, req.email, password_hash))
        .await?;
    state.profiles.insert(Profile::empty_for(user.id)).await?;

    tracing::info!(user_id = %user.id, "User created");

    Ok(HttpResponse::Created().json(Envelope::success(
        "Successfully created user!",
        auth_payload(&state, &user)?,
    )))
}

/// GET /api/users/exists/{field}/{value}
pub async fn exists(
    state: web::Data<AppState>,
    path: web::Path<(String, String)>,
) -> AppResult<HttpResponse> {
    let (field, value) = path.into_inner();

    let found = match field.as_str() {
        "username" => state.users.find_by_username(&value).await?,
        "email" => state.users.find_by_email(&value).await?,
        _ => return Err(AppError::BadRequest(format!("Cannot look users up by {field}"))),
    };

    match found {
        Some(_) => Err(AppError::Conflict("User exists".to_string())),
        None => Ok(HttpResponse::Ok().json(Envelope::done("User not found"))),
    }
}

/// GET /api/users/{id}
pub async fn find_one(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let user = resolve_user(&state, &path).await?;
    let profile = profile_of(&state, &user).await?;

    Ok(HttpResponse::Ok().json(Envelope::success(
        "Successfully fetched user",
        UserProfilePayload {
            user: user_detail(&user),
            profile: profile_view(profile),
        },
    )))
}

/// PUT /api/users/{id}
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
    body: web::Json<UpdateUserRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;
    let mut user = resolve_user(&state, &path).await?;
    policy::authorize(&identity, user.id)?;

    let role = match req.role {
        Some(_) if !identity.is_admin() => {
            return Err(AppError::Forbidden(
                "Only administrators can change roles".to_string(),
            ));
        }
        Some(raw) => Some(raw.parse::<Role>().map_err(AppError::BadRequest)?),
        None => None,
    };

    if let Some(username) = req.username.filter(|u| *u != user.username) {
        if state.users.find_by_username(&username).await?.is_some() {
            return Err(AppError::Conflict("Username is already taken".to_string()));
        }
        user.username = username;
    }
    if let Some(email) = req.email.filter(|e| *e != user.email) {
        if state.users.find_by_email(&email).await?.is_some() {
            return Err(AppError::Conflict("Email is already registered".to_string()));
        }
        user.email = email;
    }
    if let Some(role) = role {
        user.role = role;
    }

    user.touch();
    let user = state.users.update(user).await?;

    tracing::info!(user_id = %user.id, actor = %identity.user_id, "User updated");

    Ok(HttpResponse::Ok().json(Envelope::success(
        "Successfully updated user!",
        UserPayload {
            user: user_detail(&user),
        },
    )))
}

/// PUT /api/users/{id}/profile
pub async fn update_profile(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
    body: web::Json<UpdateProfileRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;
    let user = resolve_user(&state, &path).await?;
    policy::authorize(&identity, user.id)?;

    let mut profile = profile_of(&state, &user).await?;

    profile.apply(ProfileChanges {
        first_name: req.first_name,
        last_name: req.last_name,
        profession: req.profession,
        skill_level: req.skill_level,
        description: req.description,
        github_url: req.github_url,
        dribbble_url: req.dribbble_url,
        linkedin_url: req.linkedin_url,
        portfolio_url: req.portfolio_url,
    });
    let profile = state.profiles.update(profile).await?;

    tracing::info!(user_id = %user.id, "Profile updated");

    Ok(HttpResponse::Ok().json(Envelope::success(
        "Successfully updated profile!",
        UserProfilePayload {
            user: user_detail(&user),
            profile: profile_view(profile),
        },
    )))
}

/// PUT /api/users/{id}/password
pub async fn update_password(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
    body: web::Json<UpdatePasswordRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    req.validate()?;
    let mut user = resolve_user(&state, &path).await?;
    policy::authorize(&identity, user.id)?;

    if !state.passwords.verify(&req.old_password, &user.password_hash)? {
        tracing::warn!(user_id = %user.id, "Password change with wrong current password");
        return Err(AppError::BadRequest("Incorrect password".to_string()));
    }

    user.password_hash = state.passwords.hash(&req.new_password)?;
    user.touch();
    state.users.update(user).await?;

    Ok(HttpResponse::Ok().json(Envelope::done("Successfully updated password!")))
}

/// GET /api/users/{id}/posts?start=&count=
pub async fn find_posts(
    state: web::Data<AppState>,
    path: web::Path<String>,
    query: web::Query<PageParams>,
) -> AppResult<HttpResponse> {
    let page = Page::from_params(query.start.as_deref(), query.count.as_deref());
    let user = resolve_user(&state, &path).await?;

    let posts = state.posts.find_by_user_id(user.id, page).await?;
    tracing::debug!(user_id = %user.id, count = posts.len(), "Fetched user posts");

    Ok(HttpResponse::Ok().json(Envelope::success(
        "Successfully fetched user posts",
        PostsPayload {
            posts: feed(&state, posts).await?,
        },
    )))
}

/// GET /api/users/{id}/notifications
pub async fn find_notifications(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let user = resolve_user(&state, &path).await?;
    policy::authorize(&identity, user.id)?;

    let notifications = state.notifications.find_for_user(user.id).await?;
    let senders = summaries(&state, notifications.iter().map(|n| n.from_user)).await?;

    let notifications = notifications
        .into_iter()
        .filter_map(|n| {
            Some(NotificationView {
                from_user: senders.get(&n.from_user)?.clone(),
                id: n.id,
                kind: n.kind.to_string(),
                read: n.read,
                created_at: n.created_at,
            })
        })
        .collect();

    Ok(HttpResponse::Ok().json(Envelope::success(
        "Successfully fetched notifications",
        NotificationsPayload { notifications },
    )))
}

/// DELETE /api/users/{id}/notifications - marks every unread notification read.
pub async fn clear_notifications(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let user = resolve_user(&state, &path).await?;
    policy::authorize(&identity, user.id)?;

    let cleared = state.notifications.mark_all_read(user.id).await?;
    tracing::info!(user_id = %user.id, cleared, "Notifications cleared");

    Ok(HttpResponse::Ok().json(Envelope::success(
        "Successfully cleared notifications",
        ClearedPayload { cleared },
    )))
}
