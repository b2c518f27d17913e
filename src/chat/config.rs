//! Configuration types for the chat application.
//!
//! This module provides CLI argument parsing via `arrrg` and the resolved
//! configuration the binary hands to the session controller.

use std::time::Duration;

use arrrg_derive::CommandLine;

use crate::client::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT};
use crate::documents::UploadTiming;
use crate::types::ChatMode;

/// Command-line arguments for the buddy-chat tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct ChatArgs {
    /// Base URL of the Buddy backend.
    #[arrrg(optional, "Backend base URL (default: http://127.0.0.1:8000/)", "URL")]
    pub base_url: Option<String>,

    /// Request timeout in seconds.
    #[arrrg(optional, "Request timeout in seconds (default: 60)", "SECONDS")]
    pub timeout_secs: Option<u64>,

    /// Initial chat mode.
    #[arrrg(optional, "Initial chat mode: direct or document (default: direct)", "MODE")]
    pub mode: Option<String>,

    /// Start with an empty document list.
    #[arrrg(flag, "Do not seed the demo documents")]
    pub no_seed_documents: bool,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,
}

/// Errors produced while resolving [`ChatArgs`] into a [`ChatConfig`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatArgsError {
    /// `--mode` was neither `direct` nor `document`.
    InvalidMode(String),
}

impl std::fmt::Display for ChatArgsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChatArgsError::InvalidMode(mode) => {
                write!(f, "invalid --mode '{mode}' (expected direct or document)")
            }
        }
    }
}

impl std::error::Error for ChatArgsError {}

/// Configuration for a chat session.
///
/// This struct holds the resolved configuration values after processing
/// command-line arguments with appropriate defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatConfig {
    /// Base URL of the backend.
    pub base_url: String,

    /// Per-request timeout.
    pub timeout: Duration,

    /// Mode new sessions start in.
    pub mode: ChatMode,

    /// Whether the document registry starts with the demo documents.
    pub seed_documents: bool,

    /// Pacing of simulated uploads.
    pub upload_timing: UploadTiming,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,
}

impl ChatConfig {
    /// Creates a new ChatConfig with default values.
    ///
    /// Defaults:
    /// - Base URL: http://127.0.0.1:8000/
    /// - Timeout: 60 seconds
    /// - Mode: direct
    /// - Demo documents: seeded
    /// - Color: enabled
    pub fn new() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
            mode: ChatMode::Direct,
            seed_documents: true,
            upload_timing: UploadTiming::default(),
            use_color: true,
        }
    }

    /// Sets the backend base URL.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Sets the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the initial chat mode.
    pub fn with_mode(mut self, mode: ChatMode) -> Self {
        self.mode = mode;
        self
    }

    /// Sets whether the demo documents are seeded.
    pub fn with_seed_documents(mut self, seed: bool) -> Self {
        self.seed_documents = seed;
        self
    }

    /// Sets the upload pacing.
    pub fn with_upload_timing(mut self, timing: UploadTiming) -> Self {
        self.upload_timing = timing;
        self
    }

    /// Disables ANSI color output.
    pub fn without_color(mut self) -> Self {
        self.use_color = false;
        self
    }
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<ChatArgs> for ChatConfig {
    type Error = ChatArgsError;

    fn try_from(args: ChatArgs) -> Result<Self, Self::Error> {
        let mode = match args.mode {
            Some(mode) => mode
                .parse::<ChatMode>()
                .map_err(|_| ChatArgsError::InvalidMode(mode))?,
            None => ChatMode::Direct,
        };
        let defaults = ChatConfig::new();
        Ok(ChatConfig {
            base_url: args.base_url.unwrap_or(defaults.base_url),
            timeout: args
                .timeout_secs
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            mode,
            seed_documents: !args.no_seed_documents,
            use_color: !args.no_color,
            ..defaults
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = ChatConfig::new();
        assert_eq!(config.base_url, "http://127.0.0.1:8000/");
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.mode, ChatMode::Direct);
        assert!(config.seed_documents);
        assert!(config.use_color);
        assert_eq!(config.upload_timing, UploadTiming::default());
    }

    #[test]
    fn config_from_args_defaults() {
        let config = ChatConfig::try_from(ChatArgs::default()).unwrap();
        assert_eq!(config, ChatConfig::new());
    }

    #[test]
    fn config_from_args_custom() {
        let args = ChatArgs {
            base_url: Some("http://buddy.internal:9000".to_string()),
            timeout_secs: Some(5),
            mode: Some("document".to_string()),
            no_seed_documents: true,
            no_color: true,
        };
        let config = ChatConfig::try_from(args).unwrap();
        assert_eq!(config.base_url, "http://buddy.internal:9000");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.mode, ChatMode::Document);
        assert!(!config.seed_documents);
        assert!(!config.use_color);
    }

    #[test]
    fn config_from_args_bad_mode() {
        let args = ChatArgs {
            mode: Some("grounded".to_string()),
            ..ChatArgs::default()
        };
        assert_eq!(
            ChatConfig::try_from(args),
            Err(ChatArgsError::InvalidMode("grounded".to_string()))
        );
    }

    #[test]
    fn config_builder_pattern() {
        let timing = UploadTiming {
            tick: Duration::from_millis(10),
            step: 25,
            arrival_delay: Duration::from_millis(30),
        };
        let config = ChatConfig::new()
            .with_base_url("http://localhost:8001")
            .with_timeout(Duration::from_secs(2))
            .with_mode(ChatMode::Document)
            .with_seed_documents(false)
            .with_upload_timing(timing)
            .without_color();

        assert_eq!(config.base_url, "http://localhost:8001");
        assert_eq!(config.timeout, Duration::from_secs(2));
        assert_eq!(config.mode, ChatMode::Document);
        assert!(!config.seed_documents);
        assert_eq!(config.upload_timing, timing);
        assert!(!config.use_color);
    }
}
