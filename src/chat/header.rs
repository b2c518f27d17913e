//! The mode and status header.

use crate::error::{Error, Result};
use crate::types::{ChatMode, Document};

/// Notice shown when document mode is requested while the backend is down.
pub const DOCUMENT_MODE_OFFLINE_NOTICE: &str = "document mode requires the backend to be online";

/// Applies a mode toggle.
///
/// Direct mode is always available; document mode only while online.
pub fn request_mode(target: ChatMode, online: bool) -> Result<ChatMode> {
    if target == ChatMode::Document && !online {
        return Err(Error::validation(
            DOCUMENT_MODE_OFFLINE_NOTICE,
            Some("mode".to_string()),
        ));
    }
    Ok(target)
}

/// What the header shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderView {
    online: bool,
    mode: ChatMode,
    analyzing: Option<String>,
}

impl HeaderView {
    /// Builds the header from liveness, mode, and the selected document.
    pub fn new(online: bool, mode: ChatMode, selected: Option<&Document>) -> Self {
        let analyzing = match (mode, selected) {
            (ChatMode::Document, Some(doc)) => Some(doc.name.clone()),
            _ => None,
        };
        Self {
            online,
            mode,
            analyzing,
        }
    }

    /// `"Online"` or `"Offline"`.
    pub fn status_label(&self) -> &'static str {
        if self.online { "Online" } else { "Offline" }
    }

    /// True when the backend answered the status probe.
    pub fn is_online(&self) -> bool {
        self.online
    }

    /// The current mode.
    pub fn mode(&self) -> ChatMode {
        self.mode
    }

    /// Whether the document-mode toggle is clickable.
    pub fn document_mode_enabled(&self) -> bool {
        self.online
    }

    /// Name of the document being discussed, shown only in document mode.
    pub fn analyzing(&self) -> Option<&str> {
        self.analyzing.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report() -> Document {
        Document::new("1", "Annual Report 2023.pdf", "2.4 MB")
    }

    #[test]
    fn document_mode_needs_backend() {
        assert_eq!(request_mode(ChatMode::Direct, false).unwrap(), ChatMode::Direct);
        assert_eq!(
            request_mode(ChatMode::Document, true).unwrap(),
            ChatMode::Document
        );
        let err = request_mode(ChatMode::Document, false).unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn status_label() {
        assert_eq!(HeaderView::new(true, ChatMode::Direct, None).status_label(), "Online");
        let offline = HeaderView::new(false, ChatMode::Direct, None);
        assert_eq!(offline.status_label(), "Offline");
        assert!(!offline.document_mode_enabled());
    }

    #[test]
    fn analyzing_only_in_document_mode() {
        let doc = report();
        assert_eq!(
            HeaderView::new(true, ChatMode::Direct, Some(&doc)).analyzing(),
            None
        );
        assert_eq!(
            HeaderView::new(true, ChatMode::Document, None).analyzing(),
            None
        );
        assert_eq!(
            HeaderView::new(true, ChatMode::Document, Some(&doc)).analyzing(),
            Some("Annual Report 2023.pdf")
        );
    }
}
