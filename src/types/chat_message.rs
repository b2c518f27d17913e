use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::types::Sender;

/// Text of the reply appended to the transcript when an exchange fails.
pub const ERROR_REPLY_TEXT: &str = "Sorry, there was an error processing your message.";

/// One entry in a transcript.
///
/// Messages are created when the user submits a draft and when a reply
/// arrives (or fails to), and are never modified afterwards.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    /// Unique id; later messages carry larger ids.
    pub id: String,

    /// The message body.
    pub text: String,

    /// Who wrote it.
    pub sender: Sender,

    /// When it was created.
    #[serde(with = "crate::utils::time")]
    pub timestamp: OffsetDateTime,
}

impl ChatMessage {
    /// Creates a message stamped with the current time and a fresh id.
    pub fn new(text: impl Into<String>, sender: Sender) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            text: text.into(),
            sender,
            timestamp: crate::utils::time::now(),
        }
    }

    /// Creates a user-authored message.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(text, Sender::User)
    }

    /// Creates an assistant-authored message.
    pub fn ai(text: impl Into<String>) -> Self {
        Self::new(text, Sender::Ai)
    }

    /// The reply recorded in place of a failed exchange.
    pub fn error_reply() -> Self {
        Self::ai(ERROR_REPLY_TEXT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn error_reply_is_from_ai() {
        let message = ChatMessage::error_reply();
        assert_eq!(message.sender, Sender::Ai);
        assert_eq!(message.text, ERROR_REPLY_TEXT);
    }

    #[test]
    fn timestamp_serializes_as_rfc3339() {
        let mut message = ChatMessage::user("Hello");
        message.timestamp = time::macros::datetime!(2024-05-01 12:30:00 UTC);
        let json = serde_json::to_value(&message).unwrap();
        assert_eq!(json["sender"], Value::from("user"));
        assert_eq!(json["timestamp"], Value::from("2024-05-01T12:30:00Z"));

        let back: ChatMessage = serde_json::from_value(json).unwrap();
        assert_eq!(back, message);
    }

    #[test]
    fn ids_increase_with_creation_order() {
        let first = ChatMessage::user("a");
        let second = ChatMessage::ai("b");
        assert_ne!(first.id, second.id);
        assert!(first.id < second.id);
        let parsed = Uuid::parse_str(&first.id).unwrap();
        assert_eq!(parsed.get_version_num(), 7);
    }
}
