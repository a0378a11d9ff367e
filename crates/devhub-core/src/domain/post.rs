use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Post entity - something a user shares on the feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub user_id: Uuid,
    pub title: String,
    pub description: String,
    /// Free-form discriminator chosen by the client, e.g. `idea` or `project`.
    #[serde(rename = "type")]
    pub post_type: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Partial post update.
#[derive(Debug, Clone, Default)]
pub struct PostChanges {
    pub title: Option<String>,
    pub description: Option<String>,
    pub post_type: Option<String>,
}

impl Post {
    /// Create a new post.
    pub fn new(user_id: Uuid, title: String, description: String, post_type: String) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            user_id,
            title,
            description,
            post_type,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn apply(&mut self, changes: PostChanges) {
        if let Some(title) = changes.title {
            self.title = title;
        }
        if let Some(description) = changes.description {
            self.description = description;
        }
        if let Some(post_type) = changes.post_type {
            self.post_type = post_type;
        }
        self.updated_at = Utc::now();
    }
}
