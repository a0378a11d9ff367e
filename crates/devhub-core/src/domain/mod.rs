//! Domain entities - the core business objects.

mod comment;
mod message;
mod notification;
mod post;
mod profile;
mod user;

pub use comment::Comment;
pub use message::{Message, RoomId};
pub use notification::{Notification, NotificationKind};
pub use post::{Post, PostChanges};
pub use profile::{Profile, ProfileChanges};
pub use user::{Role, User};
