//! The message composer: a draft line plus an optional attach action.

use crate::types::{ChatMode, Document};

/// Placeholder shown while the composer accepts input.
pub const READY_PLACEHOLDER: &str = "Type your message here...";
/// Placeholder shown while the composer is disabled.
pub const OFFLINE_PLACEHOLDER: &str = "API is offline";

/// Something the composer asks its owner to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComposerAction {
    /// Show the document picker.
    OpenDocumentPicker,
}

/// Holds the draft message.
///
/// The composer never talks to the backend; [`Composer::submit`] hands the
/// trimmed draft back so the owner can pass it to the session controller.
#[derive(Debug, Default)]
pub struct Composer {
    draft: String,
    disabled: bool,
}

impl Composer {
    /// Creates an enabled composer with an empty draft.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the draft.
    pub fn set_draft(&mut self, draft: impl Into<String>) {
        self.draft = draft.into();
    }

    /// The current draft.
    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Discards the draft.
    pub fn clear(&mut self) {
        self.draft.clear();
    }

    /// Enables or disables submit and attach.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.disabled = disabled;
    }

    /// True while submit and attach are inert.
    pub fn is_disabled(&self) -> bool {
        self.disabled
    }

    /// Takes the trimmed draft for sending.
    ///
    /// Returns `None`, keeping the draft, when disabled or when the draft is
    /// blank.
    pub fn submit(&mut self) -> Option<String> {
        if self.disabled {
            return None;
        }
        let text = self.draft.trim();
        if text.is_empty() {
            return None;
        }
        let text = text.to_string();
        self.draft.clear();
        Some(text)
    }

    /// Requests the document picker; only offered in document mode.
    pub fn attach(&self, mode: ChatMode) -> Option<ComposerAction> {
        if self.disabled || mode != ChatMode::Document {
            return None;
        }
        Some(ComposerAction::OpenDocumentPicker)
    }

    /// Label for the attach action.
    pub fn attachment_label(&self, selected: Option<&Document>) -> &'static str {
        if selected.is_some() {
            "Change Document"
        } else {
            "Add Document"
        }
    }

    /// Placeholder text for the input line.
    pub fn placeholder(&self) -> &'static str {
        if self.disabled {
            OFFLINE_PLACEHOLDER
        } else {
            READY_PLACEHOLDER
        }
    }
}
