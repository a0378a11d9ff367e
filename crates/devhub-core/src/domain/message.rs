use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Key of a two-person conversation.
///
/// Encodes both participant ids as `<low>:<high>` so either side derives the
/// same key. Values read back from storage are kept verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RoomId(String);

impl RoomId {
    pub const SEPARATOR: char = ':';

    pub fn between(a: Uuid, b: Uuid) -> Self {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        Self(format!("{low}{}{high}", Self::SEPARATOR))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Both participants, or `None` when the stored key is malformed.
    pub fn participants(&self) -> Option<(Uuid, Uuid)> {
        let (a, b) = self.0.split_once(Self::SEPARATOR)?;
        Some((Uuid::parse_str(a).ok()?, Uuid::parse_str(b).ok()?))
    }

    pub fn includes(&self, user_id: Uuid) -> bool {
        self.participants()
            .is_some_and(|(a, b)| a == user_id || b == user_id)
    }

    /// The participant that is not `user_id`.
    pub fn other_participant(&self, user_id: Uuid) -> Option<Uuid> {
        match self.participants()? {
            (a, b) if a == user_id => Some(b),
            (a, b) if b == user_id => Some(a),
            _ => None,
        }
    }
}

impl From<String> for RoomId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Message entity - one line of a chat between two users.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub room_id: RoomId,
    /// Sender.
    pub user_id: Uuid,
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl Message {
    pub fn new(from: Uuid, to: Uuid, message: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            room_id: RoomId::between(from, to),
            user_id: from,
            message,
            created_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn room_id_is_symmetric() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        assert_eq!(RoomId::between(a, b), RoomId::between(b, a));
    }

    #[test]
    fn room_id_resolves_the_other_participant() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let room = RoomId::between(a, b);

        assert!(room.includes(a));
        assert!(room.includes(b));
        assert_eq!(room.other_participant(a), Some(b));
        assert_eq!(room.other_participant(b), Some(a));
        assert_eq!(room.other_participant(Uuid::new_v4()), None);
    }

    #[test]
    fn malformed_room_ids_have_no_participants() {
        let room = RoomId::from("not-a-room".to_string());
        assert!(room.participants().is_none());
        assert!(!room.includes(Uuid::new_v4()));
    }

    #[test]
    fn new_message_lives_in_the_shared_room() {
        let from = Uuid::new_v4();
        let to = Uuid::new_v4();
        let message = Message::new(from, to, "hi".into());
        assert_eq!(message.room_id, RoomId::between(to, from));
        assert_eq!(message.user_id, from);
    }
}
