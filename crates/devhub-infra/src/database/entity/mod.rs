//! SeaORM entities, one module per table.

pub mod comment;
pub mod message;
pub mod notification;
pub mod post;
pub mod profile;
pub mod user;
