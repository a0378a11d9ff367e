use std::collections::HashSet;

use async_trait::async_trait;
use uuid::Uuid;

use devhub_core::domain::{Comment, Message, Notification, Post, Profile, RoomId, User};
use devhub_core::error::RepoError;
use devhub_core::pagination::Page;
use devhub_core::ports::{
    CommentRepository, MessageRepository, NotificationRepository, PostRepository,
    ProfileRepository, UserRepository,
};

use super::store::{InMemoryRepository, Record};

pub type InMemoryUserRepository = InMemoryRepository<User>;
pub type InMemoryProfileRepository = InMemoryRepository<Profile>;
pub type InMemoryPostRepository = InMemoryRepository<Post>;
pub type InMemoryCommentRepository = InMemoryRepository<Comment>;
pub type InMemoryMessageRepository = InMemoryRepository<Message>;
pub type InMemoryNotificationRepository = InMemoryRepository<Notification>;

impl Record for User {
    const ENTITY: &'static str = "user";

    fn id(&self) -> Uuid {
        self.id
    }

    fn conflicts_with(&self, other: &Self) -> bool {
        self.username == other.username || self.email == other.email
    }
}

impl Record for Profile {
    const ENTITY: &'static str = "profile";

    fn id(&self) -> Uuid {
        self.id
    }

    fn conflicts_with(&self, other: &Self) -> bool {
        self.user_id == other.user_id
    }
}

impl Record for Post {
    const ENTITY: &'static str = "post";

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Record for Comment {
    const ENTITY: &'static str = "comment";

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Record for Message {
    const ENTITY: &'static str = "message";

    fn id(&self) -> Uuid {
        self.id
    }
}

impl Record for Notification {
    const ENTITY: &'static str = "notification";

    fn id(&self) -> Uuid {
        self.id
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, RepoError> {
        Ok(self.select(|u| u.username == username).await.into_iter().next())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        Ok(self.select(|u| u.email == email).await.into_iter().next())
    }

    async fn find_by_ids(&self, ids: &[Uuid]) -> Result<Vec<User>, RepoError> {
        let wanted: HashSet<&Uuid> = ids.iter().collect();
        Ok(self.select(|u| wanted.contains(&u.id)).await)
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn find_by_user_id(&self, user_id: Uuid) -> Result<Option<Profile>, RepoError> {
        Ok(self.select(|p| p.user_id == user_id).await.into_iter().next())
    }
}

fn newest_first(mut posts: Vec<Post>) -> Vec<Post> {
    posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    posts
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_by_user_id(&self, user_id: Uuid, page: Page) -> Result<Vec<Post>, RepoError> {
        let posts = self.select(|p| p.user_id == user_id).await;
        Ok(page.slice(newest_first(posts)))
    }

    async fn find_recent(&self, page: Page) -> Result<Vec<Post>, RepoError> {
        let posts = self.select(|_| true).await;
        Ok(page.slice(newest_first(posts)))
    }
}

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn find_by_post_ids(&self, post_ids: &[Uuid]) -> Result<Vec<Comment>, RepoError> {
        let wanted: HashSet<&Uuid> = post_ids.iter().collect();
        let mut comments = self.select(|c| wanted.contains(&c.post_id)).await;
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(comments)
    }

    async fn delete_by_post_id(&self, post_id: Uuid) -> Result<u64, RepoError> {
        let mut rows = self.rows.write().await;
        let before = rows.len();
        rows.retain(|_, comment| comment.post_id != post_id);
        Ok((before - rows.len()) as u64)
    }
}

#[async_trait]
impl MessageRepository for InMemoryMessageRepository {
    async fn find_rooms_for_user(&self, user_id: Uuid) -> Result<Vec<RoomId>, RepoError> {
        let mut messages = self.select(|m| m.room_id.includes(user_id)).await;
        messages.sort_by(|a, b| b.created_at.cmp(&a.created_at));

        // Most recently active room first, each room once.
        let mut seen = HashSet::new();
        let rooms = messages
            .into_iter()
            .map(|m| m.room_id)
            .filter(|room| seen.insert(room.clone()))
            .collect();
        Ok(rooms)
    }

    async fn find_by_room(&self, room_id: &RoomId) -> Result<Vec<Message>, RepoError> {
        let mut messages = self.select(|m| &m.room_id == room_id).await;
        messages.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(messages)
    }
}

#[async_trait]
impl NotificationRepository for InMemoryNotificationRepository {
    async fn find_for_user(&self, user_id: Uuid) -> Result<Vec<Notification>, RepoError> {
        let mut notifications = self.select(|n| n.to_user == user_id).await;
        notifications.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(notifications)
    }

    async fn mark_all_read(&self, user_id: Uuid) -> Result<u64, RepoError> {
        let mut rows = self.rows.write().await;
        let mut cleared = 0;

        for notification in rows.values_mut() {
            if notification.to_user == user_id && !notification.read {
                notification.read = true;
                cleared += 1;
            }
        }
        Ok(cleared)
    }
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, Utc};
    use devhub_core::domain::NotificationKind;
    use devhub_core::ports::BaseRepository;

    use super::*;

    fn user(name: &str) -> User {
        User::new(name.into(), format!("{name}@example.com"), "hash".into())
    }

    #[tokio::test]
    async fn test_user_uniqueness() {
        let repo = InMemoryUserRepository::new();
        repo.insert(user("ada")).await.unwrap();

        let same_name = User::new("ada".into(), "other@example.com".into(), "h".into());
        assert!(matches!(
            repo.insert(same_name).await,
            Err(RepoError::Constraint(_))
        ));

        let same_email = User::new("grace".into(), "ada@example.com".into(), "h".into());
        assert!(matches!(
            repo.insert(same_email).await,
            Err(RepoError::Constraint(_))
        ));
    }

    #[tokio::test]
    async fn test_update_keeps_own_unique_values() {
        let repo = InMemoryUserRepository::new();
        let mut ada = repo.insert(user("ada")).await.unwrap();
        let grace = repo.insert(user("grace")).await.unwrap();

        ada.role = devhub_core::domain::Role::Admin;
        assert!(repo.update(ada.clone()).await.is_ok());

        ada.username = grace.username.clone();
        assert!(matches!(
            repo.update(ada).await,
            Err(RepoError::Constraint(_))
        ));
    }

    #[tokio::test]
    async fn test_update_and_delete_missing() {
        let repo = InMemoryPostRepository::new();
        let post = Post::new(Uuid::new_v4(), "t".into(), "d".into(), "idea".into());

        assert!(matches!(repo.update(post).await, Err(RepoError::NotFound)));
        assert!(matches!(
            repo.delete(Uuid::new_v4()).await,
            Err(RepoError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_recent_posts_are_paged_newest_first() {
        let repo = InMemoryPostRepository::new();
        let author = Uuid::new_v4();
        let base = Utc::now();

        for i in 0..15 {
            let mut post = Post::new(author, format!("post {i}"), "d".into(), "idea".into());
            post.created_at = base + Duration::seconds(i);
            repo.insert(post).await.unwrap();
        }

        let first = repo.find_recent(Page::default()).await.unwrap();
        assert_eq!(first.len(), 10);
        assert_eq!(first[0].title, "post 14");
        assert!(first.windows(2).all(|w| w[0].created_at >= w[1].created_at));

        let rest = repo.find_recent(Page::new(10, 10)).await.unwrap();
        assert_eq!(rest.len(), 5);
        assert_eq!(rest[4].title, "post 0");

        let other = repo
            .find_by_user_id(Uuid::new_v4(), Page::default())
            .await
            .unwrap();
        assert!(other.is_empty());
    }

    #[tokio::test]
    async fn test_rooms_are_listed_once() {
        let repo = InMemoryMessageRepository::new();
        let (a, b, c) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

        repo.insert(Message::new(a, b, "hi".into())).await.unwrap();
        repo.insert(Message::new(b, a, "hey".into())).await.unwrap();
        repo.insert(Message::new(c, a, "yo".into())).await.unwrap();
        repo.insert(Message::new(b, c, "elsewhere".into())).await.unwrap();

        let rooms = repo.find_rooms_for_user(a).await.unwrap();
        assert_eq!(rooms.len(), 2);
        assert!(rooms.contains(&RoomId::between(a, b)));
        assert!(rooms.contains(&RoomId::between(a, c)));

        let thread = repo.find_by_room(&RoomId::between(b, a)).await.unwrap();
        assert_eq!(thread.len(), 2);
    }

    #[tokio::test]
    async fn test_mark_all_read_only_touches_the_recipient() {
        let repo = InMemoryNotificationRepository::new();
        let (me, other, sender) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

        repo.insert(Notification::new(me, sender, NotificationKind::Comment))
            .await
            .unwrap();
        repo.insert(Notification::new(me, sender, NotificationKind::Message))
            .await
            .unwrap();
        repo.insert(Notification::new(other, sender, NotificationKind::Message))
            .await
            .unwrap();

        assert_eq!(repo.mark_all_read(me).await.unwrap(), 2);
        assert_eq!(repo.mark_all_read(me).await.unwrap(), 0);

        let untouched = repo.find_for_user(other).await.unwrap();
        assert!(!untouched[0].read);
    }

    #[tokio::test]
    async fn test_delete_by_post_id_leaves_other_posts_alone() {
        let repo = InMemoryCommentRepository::new();
        let (author, doomed, kept) = (Uuid::new_v4(), Uuid::new_v4(), Uuid::new_v4());

        for post_id in [doomed, doomed, kept] {
            repo.insert(Comment::new(post_id, author, "hi".into()))
                .await
                .unwrap();
        }

        assert_eq!(repo.delete_by_post_id(doomed).await.unwrap(), 2);
        assert_eq!(repo.delete_by_post_id(doomed).await.unwrap(), 0);
        assert!(repo.find_by_post_ids(&[doomed]).await.unwrap().is_empty());
        assert_eq!(repo.find_by_post_ids(&[kept]).await.unwrap().len(), 1);
    }
}
