//! Slash command parsing for the chat application.
//!
//! This module handles parsing of special commands that start with `/`,
//! which drive the sidebar, header, and document picker instead of being
//! sent to the backend.

use crate::types::ChatMode;

/// A parsed chat command.
///
/// These commands control the client and are not sent to the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum ChatCommand {
    /// Start a new chat session.
    NewSession,

    /// List chat sessions.
    ListSessions,

    /// Switch the active session.
    SwitchSession(String),

    /// Switch between direct and document chat.
    Mode(ChatMode),

    /// Show backend status, mode, and active document.
    Status,

    /// Show the document picker.
    Documents,

    /// Open the document picker from the composer (document mode only).
    Attach,

    /// Upload files by path.
    Upload(Vec<String>),

    /// Select a document by id.
    Select(String),

    /// Delete a document by id.
    Delete(String),

    /// Display help information.
    Help,

    /// Exit the chat application.
    Quit,

    /// Report a parsing error back to the caller.
    Invalid(String),
}

/// Parses user input for slash commands.
///
/// Returns `Some(ChatCommand)` if the input is a valid command,
/// or `None` if it should be treated as a regular message.
///
/// # Examples
///
/// ```
/// # use buddy_chat::chat::parse_command;
/// assert!(parse_command("/quit").is_some());
/// assert!(parse_command("/mode document").is_some());
/// assert!(parse_command("Hello, Buddy!").is_none());
/// ```
pub fn parse_command(input: &str) -> Option<ChatCommand> {
    let input = input.trim();

    if !input.starts_with('/') {
        return None;
    }

    let mut parts = input[1..].splitn(2, ' ');
    let command = parts.next()?.to_lowercase();
    let argument = parts.next().map(|s| s.trim()).filter(|s| !s.is_empty());

    let result = match command.as_str() {
        "new" => ChatCommand::NewSession,
        "sessions" | "chats" => ChatCommand::ListSessions,
        "switch" => match argument {
            Some(id) => ChatCommand::SwitchSession(id.to_string()),
            None => ChatCommand::Invalid("/switch requires a session id".to_string()),
        },
        "mode" => match argument {
            Some(arg) => match arg.parse::<ChatMode>() {
                Ok(mode) => ChatCommand::Mode(mode),
                Err(_) => ChatCommand::Invalid("/mode expects 'direct' or 'document'".to_string()),
            },
            None => ChatCommand::Invalid("/mode requires 'direct' or 'document'".to_string()),
        },
        "status" => ChatCommand::Status,
        "docs" | "documents" => ChatCommand::Documents,
        "attach" => ChatCommand::Attach,
        "upload" => match argument {
            Some(arg) => ChatCommand::Upload(arg.split_whitespace().map(String::from).collect()),
            None => ChatCommand::Invalid("/upload requires at least one file path".to_string()),
        },
        "select" => match argument {
            Some(id) => ChatCommand::Select(id.to_string()),
            None => ChatCommand::Invalid("/select requires a document id".to_string()),
        },
        "delete" | "rm" => match argument {
            Some(id) => ChatCommand::Delete(id.to_string()),
            None => ChatCommand::Invalid("/delete requires a document id".to_string()),
        },
        "help" | "?" => ChatCommand::Help,
        "quit" | "exit" | "q" => ChatCommand::Quit,
        _ => ChatCommand::Invalid(format!("Unknown command: /{}", command)),
    };

    Some(result)
}

/// Returns help text describing available commands.
pub fn help_text() -> &'static str {
    r#"Available commands:
  /new                   Start a new chat
  /sessions              List chats
  /switch <id>           Switch to another chat
  /mode direct|document  Switch chat mode
  /status                Show backend status and active document
  /docs                  Manage documents
  /attach                Pick a document (document mode)
  /upload <path>...      Upload documents (PDF, DOC, DOCX, TXT, PPT, PPTX; max 5)
  /select <id>           Select a document
  /delete <id>           Delete a document
  /help                  Show this help message
  /quit                  Exit the chat"#
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_quit_commands() {
        assert_eq!(parse_command("/quit"), Some(ChatCommand::Quit));
        assert_eq!(parse_command("/exit"), Some(ChatCommand::Quit));
        assert_eq!(parse_command("/q"), Some(ChatCommand::Quit));
        assert_eq!(parse_command("  /quit  "), Some(ChatCommand::Quit));
    }

    #[test]
    fn parse_session_commands() {
        assert_eq!(parse_command("/new"), Some(ChatCommand::NewSession));
        assert_eq!(parse_command("/NEW"), Some(ChatCommand::NewSession));
        assert_eq!(parse_command("/sessions"), Some(ChatCommand::ListSessions));
        assert_eq!(
            parse_command("/switch 1700000000000"),
            Some(ChatCommand::SwitchSession("1700000000000".to_string()))
        );
        assert!(matches!(
            parse_command("/switch"),
            Some(ChatCommand::Invalid(msg)) if msg.contains("requires")
        ));
    }

    #[test]
    fn parse_mode() {
        assert_eq!(
            parse_command("/mode document"),
            Some(ChatCommand::Mode(ChatMode::Document))
        );
        assert_eq!(
            parse_command("/mode  direct "),
            Some(ChatCommand::Mode(ChatMode::Direct))
        );
        assert!(matches!(
            parse_command("/mode sideways"),
            Some(ChatCommand::Invalid(msg)) if msg.contains("expects")
        ));
    }

    #[test]
    fn parse_document_commands() {
        assert_eq!(parse_command("/docs"), Some(ChatCommand::Documents));
        assert_eq!(parse_command("/attach"), Some(ChatCommand::Attach));
        assert_eq!(
            parse_command("/upload report.pdf  notes.txt"),
            Some(ChatCommand::Upload(vec![
                "report.pdf".to_string(),
                "notes.txt".to_string()
            ]))
        );
        assert_eq!(
            parse_command("/select 2"),
            Some(ChatCommand::Select("2".to_string()))
        );
        assert_eq!(
            parse_command("/delete 3"),
            Some(ChatCommand::Delete("3".to_string()))
        );
        assert!(matches!(
            parse_command("/upload"),
            Some(ChatCommand::Invalid(_))
        ));
    }

    #[test]
    fn unknown_command() {
        assert_eq!(
            parse_command("/frobnicate"),
            Some(ChatCommand::Invalid("Unknown command: /frobnicate".to_string()))
        );
    }

    #[test]
    fn non_commands() {
        assert_eq!(parse_command("Hello, Buddy!"), None);
        assert_eq!(parse_command(""), None);
        assert_eq!(parse_command("  "), None);
    }

    #[test]
    fn help_text_not_empty() {
        let help = help_text();
        assert!(help.contains("/quit"));
        assert!(help.contains("/upload"));
        assert!(help.contains("/mode"));
        assert!(help.contains("PDF, DOC, DOCX, TXT, PPT, PPTX"));
    }
}
