// Public modules
pub mod chat_message;
pub mod chat_mode;
pub mod document;
pub mod sender;
pub mod session;
pub mod talk_request;
pub mod talk_response;

// Re-exports
pub use chat_message::{ChatMessage, ERROR_REPLY_TEXT};
pub use chat_mode::{ChatMode, ChatModeParseError};
pub use document::{Document, UploadFile, format_file_size};
pub use sender::Sender;
pub use session::{DEFAULT_SESSION_TITLE, Session};
pub use talk_request::{ChatTurn, HistoryEntry, Role, TalkRequest};
pub use talk_response::TalkResponse;
