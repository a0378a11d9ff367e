//! Shared lookups and domain-to-view mapping used by several controllers.

use std::collections::{HashMap, HashSet};

use uuid::Uuid;

use devhub_core::domain::{
    Comment, Message, Notification, NotificationKind, Post, Profile, User,
};
use devhub_core::ports::{BaseRepository, CommentRepository, UserRepository};
use devhub_shared::dto::{
    CommentView, CreatedPost, FeedComment, FeedPost, MessageView, PostView, ProfileView,
    UserDetail, UserSummary,
};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

pub fn user_summary(user: &User) -> UserSummary {
    UserSummary {
        id: user.id,
        username: user.username.clone(),
        email: user.email.clone(),
    }
}

pub fn user_detail(user: &User) -> UserDetail {
    UserDetail {
        id: user.id,
        username: user.username.clone(),
        email: user.email.clone(),
        role: user.role.to_string(),
        created_at: user.created_at,
    }
}

pub fn profile_view(profile: Profile) -> ProfileView {
    ProfileView {
        first_name: profile.first_name,
        last_name: profile.last_name,
        profession: profile.profession,
        skill_level: profile.skill_level,
        description: profile.description,
        github_url: profile.github_url,
        dribbble_url: profile.dribbble_url,
        linkedin_url: profile.linkedin_url,
        portfolio_url: profile.portfolio_url,
    }
}

pub fn created_post(post: Post) -> CreatedPost {
    CreatedPost {
        id: post.id,
        title: post.title,
        description: post.description,
        post_type: post.post_type,
        creator_id: post.user_id,
        created_at: post.created_at,
    }
}

pub fn post_view(post: Post) -> PostView {
    PostView {
        id: post.id,
        title: post.title,
        description: post.description,
        post_type: post.post_type,
        user_id: post.user_id,
        created_at: post.created_at,
    }
}

pub fn comment_view(comment: Comment) -> CommentView {
    CommentView {
        id: comment.id,
        post_id: comment.post_id,
        user_id: comment.user_id,
        body: comment.body,
        created_at: comment.created_at,
    }
}

pub fn message_view(message: Message) -> MessageView {
    MessageView {
        id: message.id,
        room_id: message.room_id.to_string(),
        user_id: message.user_id,
        message: message.message,
        created_at: message.created_at,
    }
}

/// Resolve a `/users/{ref}` segment: a UUID is looked up by id, anything else
/// by username.
pub async fn resolve_user(state: &AppState, user_ref: &str) -> AppResult<User> {
    let found = match Uuid::parse_str(user_ref) {
        Ok(id) => state.users.find_by_id(id).await?,
        Err(_) => state.users.find_by_username(user_ref).await?,
    };

    found.ok_or_else(|| AppError::NotFound("User not found".to_string()))
}

/// Sanitized summaries for a set of users, keyed by id.
pub async fn summaries(
    state: &AppState,
    ids: impl IntoIterator<Item = Uuid>,
) -> AppResult<HashMap<Uuid, UserSummary>> {
    let ids: Vec<Uuid> = ids.into_iter().collect::<HashSet<_>>().into_iter().collect();
    if ids.is_empty() {
        return Ok(HashMap::new());
    }

    let users = state.users.find_by_ids(&ids).await?;
    Ok(users.iter().map(|u| (u.id, user_summary(u))).collect())
}

/// Attach authors and comments (each with its author) to a page of posts.
pub async fn feed(state: &AppState, posts: Vec<Post>) -> AppResult<Vec<FeedPost>> {
    if posts.is_empty() {
        return Ok(Vec::new());
    }

    let post_ids: Vec<Uuid> = posts.iter().map(|p| p.id).collect();
    let comments = state.comments.find_by_post_ids(&post_ids).await?;

    let authors = posts
        .iter()
        .map(|p| p.user_id)
        .chain(comments.iter().map(|c| c.user_id));
    let users = summaries(state, authors).await?;

    let mut by_post: HashMap<Uuid, Vec<FeedComment>> = HashMap::new();
    for comment in comments {
        let Some(user) = users.get(&comment.user_id) else {
            continue;
        };
        by_post.entry(comment.post_id).or_default().push(FeedComment {
            id: comment.id,
            user: user.clone(),
            body: comment.body,
            created_at: comment.created_at,
        });
    }

    let entries = posts
        .into_iter()
        .filter_map(|post| {
            let user = users.get(&post.user_id)?.clone();
            Some(FeedPost {
                id: post.id,
                comments: by_post.remove(&post.id).unwrap_or_default(),
                user,
                title: post.title,
                description: post.description,
                post_type: post.post_type,
                created_at: post.created_at,
            })
        })
        .collect();

    Ok(entries)
}

/// Record a notification. A failure here never fails the triggering request.
pub async fn notify(state: &AppState, to_user: Uuid, from_user: Uuid, kind: NotificationKind) {
    let notification = Notification::new(to_user, from_user, kind);

    match state.notifications.insert(notification).await {
        Ok(n) => tracing::debug!(to_user = %to_user, kind = %n.kind, "Notification recorded"),
        Err(e) => tracing::warn!(to_user = %to_user, "Failed to record notification: {}", e),
    }
}
