use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Whether a conversation is plain chat or grounded in a selected document.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatMode {
    /// Talk to the assistant directly.
    #[default]
    Direct,

    /// Talk about the currently selected document.
    Document,
}

impl fmt::Display for ChatMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatMode::Direct => write!(f, "direct"),
            ChatMode::Document => write!(f, "document"),
        }
    }
}

/// Error returned when parsing an unknown chat mode.
#[derive(Debug)]
pub struct ChatModeParseError {
    /// The string that could not be parsed.
    pub invalid_value: String,
}

impl fmt::Display for ChatModeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Unknown chat mode: {} (expected 'direct' or 'document')",
            self.invalid_value
        )
    }
}

impl std::error::Error for ChatModeParseError {}

impl FromStr for ChatMode {
    type Err = ChatModeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "direct" => Ok(ChatMode::Direct),
            "document" | "doc" => Ok(ChatMode::Document),
            _ => Err(ChatModeParseError {
                invalid_value: s.to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display() {
        assert_eq!(ChatMode::Direct.to_string(), "direct");
        assert_eq!(ChatMode::Document.to_string(), "document");
    }

    #[test]
    fn parse() {
        assert_eq!("direct".parse::<ChatMode>().unwrap(), ChatMode::Direct);
        assert_eq!("Document".parse::<ChatMode>().unwrap(), ChatMode::Document);
        assert_eq!("doc".parse::<ChatMode>().unwrap(), ChatMode::Document);
        assert!("grounded".parse::<ChatMode>().is_err());
    }
}
