//! Data Transfer Objects - request/response types for the API.
//!
//! Required string fields default to empty when absent so that a missing field
//! is reported by validation under its own name instead of as a parse error.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::{Validate, ValidationError};

/// Usernames are path segments too: ASCII letters, digits, `_` and `-` only.
fn validate_username(username: &str) -> Result<(), ValidationError> {
    let allowed = username
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');

    if allowed {
        Ok(())
    } else {
        Err(ValidationError::new("username"))
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// POST /api/users
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateUserRequest {
    #[serde(default)]
    #[validate(length(min = 3, max = 32), custom(function = "validate_username"))]
    pub username: String,
    #[serde(default)]
    #[validate(email)]
    pub email: String,
    #[serde(default)]
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

/// PUT /api/users/{id}
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateUserRequest {
    #[validate(length(min = 3, max = 32), custom(function = "validate_username"))]
    pub username: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    /// Only honored for admins.
    pub role: Option<String>,
}

/// PUT /api/users/{id}/profile
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(max = 64))]
    pub first_name: Option<String>,
    #[validate(length(max = 64))]
    pub last_name: Option<String>,
    #[validate(length(max = 64))]
    pub profession: Option<String>,
    #[validate(length(max = 32))]
    pub skill_level: Option<String>,
    #[validate(length(max = 2000))]
    pub description: Option<String>,
    #[validate(url)]
    pub github_url: Option<String>,
    #[validate(url)]
    pub dribbble_url: Option<String>,
    #[validate(url)]
    pub linkedin_url: Option<String>,
    #[validate(url)]
    pub portfolio_url: Option<String>,
}

/// PUT /api/users/{id}/password
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePasswordRequest {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub old_password: String,
    #[serde(default)]
    #[validate(length(min = 8, max = 128))]
    pub new_password: String,
}

/// POST /api/auth/login - `username` may also be an email address.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub username: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub password: String,
}

/// POST /api/posts
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 140))]
    pub title: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 5000))]
    pub description: String,
    #[serde(default, rename = "type")]
    #[validate(length(min = 1, max = 32))]
    pub post_type: String,
}

/// PUT /api/posts/{id}
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdatePostRequest {
    #[validate(length(min = 1, max = 140))]
    pub title: Option<String>,
    #[validate(length(min = 1, max = 5000))]
    pub description: Option<String>,
    #[serde(rename = "type")]
    #[validate(length(min = 1, max = 32))]
    pub post_type: Option<String>,
}

/// POST /api/comments
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(required)]
    pub post_id: Option<Uuid>,
    #[serde(default)]
    #[validate(length(min = 1, max = 2000))]
    pub body: String,
}

/// PUT /api/comments/{id}
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateCommentRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 2000))]
    pub body: String,
}

/// POST /api/users/{id}/chats/{other}
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct SendMessageRequest {
    #[serde(default)]
    #[validate(length(min = 1, max = 2000))]
    pub message: String,
}

/// `?start=&count=` - kept raw, the domain `Page` applies the floor rules.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PageParams {
    pub start: Option<String>,
    pub count: Option<String>,
}

// ---------------------------------------------------------------------------
// Views
// ---------------------------------------------------------------------------

/// A user as shown next to content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: Uuid,
    pub username: String,
    pub email: String,
}

/// A user as shown on their own page.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDetail {
    pub id: Uuid,
    pub username: String,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileView {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub profession: Option<String>,
    pub skill_level: Option<String>,
    pub description: Option<String>,
    pub github_url: Option<String>,
    pub dribbble_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub portfolio_url: Option<String>,
}

/// A post as returned right after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedPost {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub post_type: String,
    pub creator_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostView {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub post_type: String,
    pub user_id: Uuid,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentView {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// A comment inside a feed entry, with its author resolved.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedComment {
    pub id: Uuid,
    pub user: UserSummary,
    pub body: String,
    pub created_at: DateTime<Utc>,
}

/// A feed entry: post, author and comments.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeedPost {
    pub id: Uuid,
    pub user: UserSummary,
    pub title: String,
    pub description: String,
    #[serde(rename = "type")]
    pub post_type: String,
    pub created_at: DateTime<Utc>,
    pub comments: Vec<FeedComment>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatView {
    pub user: UserSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageView {
    pub id: Uuid,
    pub room_id: String,
    pub user_id: Uuid,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationView {
    pub id: Uuid,
    pub from_user: UserSummary,
    #[serde(rename = "type")]
    pub kind: String,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Envelope payloads
// ---------------------------------------------------------------------------

/// Returned by user creation and login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthPayload {
    pub user: UserSummary,
    pub token: String,
    pub token_type: String,
    pub expires_in: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserPayload {
    pub user: UserDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfilePayload {
    pub user: UserDetail,
    pub profile: ProfileView,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostsPayload {
    pub posts: Vec<FeedPost>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatedPostPayload {
    pub post: CreatedPost,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostPayload {
    pub post: PostView,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostDetailPayload {
    pub post: PostView,
    pub comments: Vec<CommentView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentPayload {
    pub comment: CommentView,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatsPayload {
    pub chats: Vec<ChatView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagesPayload {
    pub room_id: String,
    pub messages: Vec<MessageView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessagePayload {
    pub message: MessageView,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationsPayload {
    pub notifications: Vec<NotificationView>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClearedPayload {
    pub cleared: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_are_reported_by_name() {
        let req: CreatePostRequest = serde_json::from_str("{}").unwrap();
        let errors = req.validate().unwrap_err();
        let fields = errors.field_errors();

        assert!(fields.contains_key("title"));
        assert!(fields.contains_key("description"));
        assert_eq!(fields.len(), 3);
    }

    #[test]
    fn post_type_is_read_from_the_type_key() {
        let req: CreatePostRequest =
            serde_json::from_str(r#"{"title":"A","description":"B","type":"idea"}"#).unwrap();
        assert_eq!(req.post_type, "idea");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn usernames_reject_path_unsafe_characters() {
        let req = CreateUserRequest {
            username: "bad/name".into(),
            email: "ok@example.com".into(),
            password: "long-enough".into(),
        };
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("username"));
    }

    #[test]
    fn partial_updates_validate_only_present_fields() {
        let req = UpdateProfileRequest {
            first_name: Some("Ada".into()),
            ..Default::default()
        };
        assert!(req.validate().is_ok());

        let bad = UpdateProfileRequest {
            github_url: Some("not a url".into()),
            ..Default::default()
        };
        assert!(bad.validate().is_err());
    }

    #[test]
    fn password_change_uses_camel_case_keys() {
        let req: UpdatePasswordRequest =
            serde_json::from_str(r#"{"oldPassword":"a","newPassword":"bbbbbbbb"}"#).unwrap();
        assert_eq!(req.old_password, "a");
        assert!(req.validate().is_ok());
    }

    #[test]
    fn comment_requires_a_post() {
        let req: CreateCommentRequest = serde_json::from_str(r#"{"body":"hi"}"#).unwrap();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("post_id"));
    }
}
