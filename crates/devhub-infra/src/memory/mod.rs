//! In-memory repositories - used when no database is configured, and in tests.
//!
//! Data is lost on process restart.

mod repos;
mod store;

pub use repos::{
    InMemoryCommentRepository, InMemoryMessageRepository, InMemoryNotificationRepository,
    InMemoryPostRepository, InMemoryProfileRepository, InMemoryUserRepository,
};
pub use store::{InMemoryRepository, Record};
