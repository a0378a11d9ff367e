use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{Comment, Message, Notification, Post, Profile, RoomId, User};
use crate::error::RepoError;
use crate::pagination::Page;

/// Generic repository trait defining standard CRUD operations.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Persist a new entity.
    async fn insert(&self, entity: T) -> Result<T, RepoError>;

    /// Overwrite an existing entity. Fails with `NotFound` if it is gone.
    async fn update(&self, entity: T) -> Result<T, RepoError>;

    /// Delete an entity by its ID.
    async fn delete(&self, id: ID) -> Result<(), RepoError>;
}

/// User repository with domain-specific lookups.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError>;

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Batch lookup; missing ids are skipped.
    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError>;
}

#[async_trait]
pub trait ProfileRepository: BaseRepository<Profile, Uuid> {
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Profile>, RepoError>;
}

/// Post repository. Listings are newest first.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    async fn find_by_user_id(&self, user_id: Uuid, page: Page) -> Result<Vec<Post>, RepoError>;

    async fn find_recent(&self, page: Page) -> Result<Vec<Post>, RepoError>;
}

/// Comment repository. Listings are oldest first.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, Uuid> {
    async fn find_by_post_ids(&self, post_ids: &[Uuid]) -> Result<Vec<Comment>, RepoError>;

    /// Remove every comment on a post in one statement. Returns how many went.
    async fn delete_by_post_id(&self, post_id: Uuid) -> Result<u64, RepoError>;
}

#[async_trait]
pub trait MessageRepository: BaseRepository<Message, Uuid> {
    /// Distinct rooms the user takes part in.
    async fn find_rooms_for_user(&self, user_id: Uuid) -> Result<Vec<RoomId>, RepoError>;

    /// Messages of a room, oldest first.
    async fn find_by_room(&self, room_id: &RoomId) -> Result<Vec<Message>, RepoError>;
}

#[async_trait]
pub trait NotificationRepository: BaseRepository<Notification, Uuid> {
    /// Notifications addressed to a user, newest first.
    async fn find_for_user(&self, user_id: Uuid) -> Result<Vec<Notification>, RepoError>;

    /// Flag every unread notification of a user as read; returns how many changed.
    async fn mark_all_read(&self, user_id: Uuid) -> Result<u64, RepoError>;
}
