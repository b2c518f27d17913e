use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::types::ChatMode;

/// Title given to every freshly created session.
pub const DEFAULT_SESSION_TITLE: &str = "New Chat";

/// A named, mode-tagged conversation listed in the sidebar.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    /// Unique session id.
    pub id: String,

    /// Title shown in the sidebar.
    pub title: String,

    /// The chat mode that was active when the session was created.
    pub mode: ChatMode,
}

impl Session {
    /// Creates a session with a fresh id and the default title.
    pub fn new(mode: ChatMode) -> Self {
        Self {
            id: Uuid::now_v7().to_string(),
            title: DEFAULT_SESSION_TITLE.to_string(),
            mode,
        }
    }
}

impl fmt::Display for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.title, self.mode)
    }
}
