//! The session controller.
//!
//! [`SessionController`] owns every piece of client state: the session
//! list, one transcript per session, the chat mode, the cached liveness
//! flag, the exchange state, and the document registry.  Views and the
//! composer read from it; every mutation goes through `&mut self`, so there
//! is never more than one writer.

use std::collections::HashMap;

use crate::chat::config::ChatConfig;
use crate::chat::header::{self, HeaderView};
use crate::chat::sidebar::{SessionSidebar, SidebarEntry};
use crate::client::Transport;
use crate::documents::DocumentRegistry;
use crate::error::{Error, Result};
use crate::observability::{SESSION_ERROR_REPLIES, SESSION_REJECTED_SUBMITS, SESSION_SUBMITS};
use crate::types::{ChatMessage, ChatMode, Document, HistoryEntry, Session};

/// Notice shown when a message is submitted while the backend is offline.
pub const OFFLINE_NOTICE: &str = "API is not available. Please check if the backend is running.";

/// Whether an exchange is in flight.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ExchangeState {
    /// Ready to send.
    #[default]
    Idle,
    /// Waiting for the backend to answer.
    Sending,
}

/// What happened to a submitted message.
#[derive(Debug, Clone)]
pub enum SendOutcome {
    /// The backend answered; the reply was appended.
    Replied(ChatMessage),
    /// The exchange failed; a fixed error reply was appended instead.
    Failed {
        /// The synthesized reply.
        reply: ChatMessage,
        /// Why the exchange failed.
        error: Error,
    },
    /// Nothing was sent and the transcript is unchanged.
    Rejected(&'static str),
}

impl SendOutcome {
    /// The message appended after the user's, if any.
    pub fn reply(&self) -> Option<&ChatMessage> {
        match self {
            SendOutcome::Replied(reply) | SendOutcome::Failed { reply, .. } => Some(reply),
            SendOutcome::Rejected(_) => None,
        }
    }
}

// Restores `Idle` however the exchange ends, including when the `send`
// future is dropped mid-flight.
struct PendingExchange<'a> {
    state: &'a mut ExchangeState,
    transcript: &'a mut Vec<ChatMessage>,
    settled: bool,
}

impl PendingExchange<'_> {
    fn settle(mut self, reply: ChatMessage) {
        self.transcript.push(reply);
        self.settled = true;
    }
}

impl Drop for PendingExchange<'_> {
    fn drop(&mut self) {
        if !self.settled {
            SESSION_ERROR_REPLIES.click();
            tracing::warn!("send dropped before the backend answered; recording error reply");
            self.transcript.push(ChatMessage::error_reply());
        }
        *self.state = ExchangeState::Idle;
    }
}

/// Orchestrates sessions, transcripts, and backend calls.
pub struct SessionController<T: Transport> {
    transport: T,
    sidebar: SessionSidebar,
    // Keyed by active session id; `None` holds messages sent before any
    // session was created.
    transcripts: HashMap<Option<String>, Vec<ChatMessage>>,
    mode: ChatMode,
    online: bool,
    state: ExchangeState,
    documents: DocumentRegistry,
}

impl<T: Transport> SessionController<T> {
    /// Creates a controller.  The backend counts as offline until
    /// [`start`](Self::start) has probed it.
    pub fn new(transport: T, config: &ChatConfig) -> Self {
        let mut documents = DocumentRegistry::new(config.upload_timing);
        if config.seed_documents {
            documents = documents.with_seed_documents();
        }
        Self {
            transport,
            sidebar: SessionSidebar::new(),
            transcripts: HashMap::new(),
            mode: config.mode,
            online: false,
            state: ExchangeState::Idle,
            documents,
        }
    }

    /// Probes the backend once and caches the answer.
    ///
    /// Falls back to direct mode if document mode was requested but the
    /// backend is offline.
    pub async fn start(&mut self) -> bool {
        self.online = self.transport.check_liveness().await;
        tracing::info!(online = self.online, "backend status checked");
        if !self.online && self.mode == ChatMode::Document {
            tracing::debug!("backend offline; falling back to direct mode");
            self.mode = ChatMode::Direct;
        }
        self.online
    }

    /// Sends a message and records the reply.
    ///
    /// The user's message is appended before the backend is called, and
    /// the backend sees only what preceded it.  Success appends the
    /// backend's answer; failure appends [`ChatMessage::error_reply`].
    /// Either way the controller is idle again when this returns.
    ///
    /// Dropping the returned future before the backend answers counts as a
    /// failed exchange: the error reply is appended and the state goes back
    /// to idle.
    pub async fn send(&mut self, text: &str) -> SendOutcome {
        if !self.online {
            SESSION_REJECTED_SUBMITS.click();
            return SendOutcome::Rejected(OFFLINE_NOTICE);
        }
        SESSION_SUBMITS.click();

        if let Some(document) = self.attachment() {
            tracing::debug!(document = %document.name, "attachment stays local");
        }
        let key = self.active_key();
        let transcript = self.transcripts.entry(key).or_default();
        let history: Vec<HistoryEntry> = transcript.iter().map(HistoryEntry::from).collect();
        transcript.push(ChatMessage::user(text));
        self.state = ExchangeState::Sending;
        let pending = PendingExchange {
            state: &mut self.state,
            transcript,
            settled: false,
        };

        match self.transport.exchange(text, &history).await {
            Ok(response) => {
                let [_, answer] = response.into_messages();
                pending.settle(answer.clone());
                SendOutcome::Replied(answer)
            }
            Err(error) => {
                SESSION_ERROR_REPLIES.click();
                tracing::warn!(error = %error, "Error in send; recording error reply");
                let reply = ChatMessage::error_reply();
                pending.settle(reply.clone());
                SendOutcome::Failed { reply, error }
            }
        }
    }

    /// Creates a session in the current mode, makes it active, and starts
    /// it with an empty transcript.
    pub fn new_session(&mut self) -> &Session {
        let session = self.sidebar.new_session(self.mode);
        tracing::debug!(session = %session.id, mode = %session.mode, "new session");
        self.transcripts.insert(Some(session.id.clone()), Vec::new());
        session
    }

    /// Switches the active session.
    pub fn select_session(&mut self, id: &str) -> Result<()> {
        self.sidebar.select_session(id)
    }

    /// Switches chat mode.  Document mode needs the backend online.
    pub fn set_mode(&mut self, mode: ChatMode) -> Result<ChatMode> {
        self.mode = header::request_mode(mode, self.online)?;
        Ok(self.mode)
    }

    /// The transcript of the active session.
    pub fn transcript(&self) -> &[ChatMessage] {
        self.transcripts
            .get(&self.active_key())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// All sessions, oldest first.
    pub fn sessions(&self) -> &[Session] {
        self.sidebar.sessions()
    }

    /// The active session, if one has been created.
    pub fn active_session(&self) -> Option<&Session> {
        self.sidebar.active()
    }

    /// Sidebar rows.
    pub fn sidebar_entries(&self) -> Vec<SidebarEntry> {
        self.sidebar.entries()
    }

    /// The current mode.
    pub fn mode(&self) -> ChatMode {
        self.mode
    }

    /// The cached liveness flag.
    pub fn is_online(&self) -> bool {
        self.online
    }

    /// Whether an exchange is in flight.
    ///
    /// `send` holds `&mut self` for the whole exchange, so callers only
    /// ever observe [`ExchangeState::Idle`] here.
    pub fn state(&self) -> ExchangeState {
        self.state
    }

    /// True while a reply is pending.
    pub fn is_sending(&self) -> bool {
        self.state == ExchangeState::Sending
    }

    /// True while the composer should ignore input.
    pub fn composer_disabled(&self) -> bool {
        !self.online || self.is_sending()
    }

    /// The header view.
    pub fn header(&self) -> HeaderView {
        HeaderView::new(self.online, self.mode, self.documents.selected())
    }

    /// The document that accompanies messages in document mode.
    pub fn attachment(&self) -> Option<&Document> {
        match self.mode {
            ChatMode::Document => self.documents.selected(),
            ChatMode::Direct => None,
        }
    }

    /// The document registry.
    pub fn documents(&self) -> &DocumentRegistry {
        &self.documents
    }

    /// The document registry, for uploads and selection.
    pub fn documents_mut(&mut self) -> &mut DocumentRegistry {
        &mut self.documents
    }

    /// The underlying transport.
    pub fn transport(&self) -> &T {
        &self.transport
    }

    fn active_key(&self) -> Option<String> {
        self.sidebar.active_id().map(String::from)
    }
}
