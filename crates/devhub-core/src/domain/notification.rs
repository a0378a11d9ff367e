use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// What triggered a notification.
///
/// Unknown values read from storage are preserved in `Other`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum NotificationKind {
    Comment,
    Message,
    Other(String),
}

impl NotificationKind {
    pub fn as_str(&self) -> &str {
        match self {
            NotificationKind::Comment => "comment",
            NotificationKind::Message => "message",
            NotificationKind::Other(kind) => kind,
        }
    }
}

impl From<String> for NotificationKind {
    fn from(raw: String) -> Self {
        match raw.as_str() {
            "comment" => NotificationKind::Comment,
            "message" => NotificationKind::Message,
            _ => NotificationKind::Other(raw),
        }
    }
}

impl From<NotificationKind> for String {
    fn from(kind: NotificationKind) -> Self {
        kind.as_str().to_string()
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Notification entity - tells `to_user` that `from_user` did something.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    pub id: Uuid,
    pub to_user: Uuid,
    pub from_user: Uuid,
    #[serde(rename = "type")]
    pub kind: NotificationKind,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(to_user: Uuid, from_user: Uuid, kind: NotificationKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            to_user,
            from_user,
            kind,
            read: false,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_keeps_unknown_values() {
        assert_eq!(NotificationKind::from("comment".to_string()), NotificationKind::Comment);
        let other = NotificationKind::from("follow".to_string());
        assert_eq!(other.as_str(), "follow");
    }

    #[test]
    fn kind_serializes_as_plain_string() {
        let json = serde_json::to_value(NotificationKind::Message).unwrap();
        assert_eq!(json, serde_json::json!("message"));
    }
}
