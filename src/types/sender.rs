use serde::{Deserialize, Serialize};
use std::fmt;

/// Who authored a chat message.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The person at the keyboard.
    User,

    /// The assistant backend, or a reply synthesized on its behalf.
    Ai,
}

impl Sender {
    /// The label shown next to a message in the transcript.
    pub fn display_name(&self) -> &'static str {
        match self {
            Sender::User => "You",
            Sender::Ai => "AI Assistant",
        }
    }
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::User => write!(f, "user"),
            Sender::Ai => write!(f, "ai"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialization() {
        assert_eq!(serde_json::to_string(&Sender::User).unwrap(), r#""user""#);
        assert_eq!(serde_json::to_string(&Sender::Ai).unwrap(), r#""ai""#);
    }

    #[test]
    fn display_names() {
        assert_eq!(Sender::User.display_name(), "You");
        assert_eq!(Sender::Ai.display_name(), "AI Assistant");
    }
}
