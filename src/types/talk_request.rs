use serde::{Deserialize, Serialize};

use crate::types::{ChatMessage, Sender};

/// Role tag the backend expects on each history entry.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Written by the user.
    User,

    /// Written by the assistant.
    Assistant,
}

impl From<Sender> for Role {
    fn from(sender: Sender) -> Self {
        match sender {
            Sender::User => Role::User,
            Sender::Ai => Role::Assistant,
        }
    }
}

/// A prior transcript entry as handed to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    /// Message text.
    pub text: String,

    /// Who wrote it.
    pub sender: Sender,
}

impl From<&ChatMessage> for HistoryEntry {
    fn from(message: &ChatMessage) -> Self {
        Self {
            text: message.text.clone(),
            sender: message.sender,
        }
    }
}

/// A history entry on the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ChatTurn {
    /// The author role.
    pub role: Role,

    /// The message text.
    pub content: String,
}

impl From<&HistoryEntry> for ChatTurn {
    fn from(entry: &HistoryEntry) -> Self {
        Self {
            role: entry.sender.into(),
            content: entry.text.clone(),
        }
    }
}

/// Body of `POST /buddy/talk`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TalkRequest {
    /// The new message.
    pub query: String,

    /// Everything said before it, oldest first.
    pub chat_history: Vec<ChatTurn>,
}

impl TalkRequest {
    /// Builds a request from a message and its preceding history.
    pub fn new(query: impl Into<String>, history: &[HistoryEntry]) -> Self {
        Self {
            query: query.into(),
            chat_history: history.iter().map(ChatTurn::from).collect(),
        }
    }
}
