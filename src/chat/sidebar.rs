//! The session sidebar.

use crate::error::{Error, Result};
use crate::types::{ChatMode, Session};

/// One row of the sidebar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SidebarEntry {
    /// The session id.
    pub id: String,
    /// `"{title} ({mode})"`.
    pub label: String,
    /// Whether this is the active session.
    pub active: bool,
}

/// The ordered session list and which one is active.
#[derive(Debug, Default)]
pub struct SessionSidebar {
    sessions: Vec<Session>,
    active: Option<String>,
}

impl SessionSidebar {
    /// Creates an empty sidebar with no active session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a new session in `mode` and makes it active.
    pub fn new_session(&mut self, mode: ChatMode) -> &Session {
        let session = Session::new(mode);
        self.active = Some(session.id.clone());
        self.sessions.push(session);
        &self.sessions[self.sessions.len() - 1]
    }

    /// Makes `id` the active session.
    pub fn select_session(&mut self, id: &str) -> Result<()> {
        if !self.sessions.iter().any(|session| session.id == id) {
            return Err(Error::not_found(
                "no chat with this id",
                Some("session".to_string()),
                Some(id.to_string()),
            ));
        }
        self.active = Some(id.to_string());
        Ok(())
    }

    /// All sessions, oldest first.
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    /// The active session id.
    pub fn active_id(&self) -> Option<&str> {
        self.active.as_deref()
    }

    /// The active session.
    pub fn active(&self) -> Option<&Session> {
        let id = self.active.as_deref()?;
        self.sessions.iter().find(|session| session.id == id)
    }

    /// Rows to display.
    pub fn entries(&self) -> Vec<SidebarEntry> {
        self.sessions
            .iter()
            .map(|session| SidebarEntry {
                id: session.id.clone(),
                label: session.to_string(),
                active: self.active.as_deref() == Some(session.id.as_str()),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_becomes_active() {
        let mut sidebar = SessionSidebar::new();
        assert!(sidebar.active_id().is_none());

        let first = sidebar.new_session(ChatMode::Direct).id.clone();
        assert_eq!(sidebar.active_id(), Some(first.as_str()));

        let second = sidebar.new_session(ChatMode::Document).id.clone();
        assert_eq!(sidebar.active_id(), Some(second.as_str()));
        assert_eq!(sidebar.sessions().len(), 2);
    }

    #[test]
    fn entries_render_title_and_mode() {
        let mut sidebar = SessionSidebar::new();
        sidebar.new_session(ChatMode::Direct);
        sidebar.new_session(ChatMode::Document);
        let entries = sidebar.entries();
        assert_eq!(entries[0].label, "New Chat (direct)");
        assert!(!entries[0].active);
        assert_eq!(entries[1].label, "New Chat (document)");
        assert!(entries[1].active);
    }

    #[test]
    fn reselecting_active_is_a_no_op() {
        let mut sidebar = SessionSidebar::new();
        let id = sidebar.new_session(ChatMode::Direct).id.clone();
        let before = sidebar.entries();
        sidebar.select_session(&id).unwrap();
        assert_eq!(sidebar.entries(), before);
    }

    #[test]
    fn selecting_unknown_session_fails() {
        let mut sidebar = SessionSidebar::new();
        let id = sidebar.new_session(ChatMode::Direct).id.clone();
        let err = sidebar.select_session("nope").unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(sidebar.active_id(), Some(id.as_str()));
    }
}
