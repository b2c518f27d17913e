//! Output rendering for the chat application.
//!
//! This module provides a trait-based rendering abstraction over the views
//! the session controller exposes.  The default implementation writes to
//! stdout with optional ANSI styling.

use std::io::{self, Stdout, Write};

use crate::chat::header::HeaderView;
use crate::chat::sidebar::SidebarEntry;
use crate::documents::SUPPORTED_FORMATS_HINT;
use crate::types::{ChatMessage, Document, Sender};
use crate::utils::time::clock_label;

/// ANSI escape code for dim text (used for the thinking indicator).
const ANSI_DIM: &str = "\x1b[2m";

/// ANSI escape code for italic text (used for the thinking indicator).
const ANSI_ITALIC: &str = "\x1b[3m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// ANSI escape code for cyan text (used for the user's messages).
const ANSI_CYAN: &str = "\x1b[36m";

/// ANSI escape code for yellow text (used for notices).
const ANSI_YELLOW: &str = "\x1b[33m";

/// ANSI escape code for green text (used for assistant messages).
const ANSI_GREEN: &str = "\x1b[32m";

/// ANSI escape code for red text (used for errors and the offline badge).
const ANSI_RED: &str = "\x1b[31m";

/// ANSI escape code for magenta text (used for upload progress).
const ANSI_MAGENTA: &str = "\x1b[35m";

/// Trait for rendering chat output.
pub trait Renderer: Send {
    /// Print one transcript message.
    fn print_message(&mut self, message: &ChatMessage);

    /// Print the indicator shown while a reply is pending.
    fn print_thinking(&mut self);

    /// Print an error message.
    fn print_error(&mut self, error: &str);

    /// Print an informational message.
    fn print_info(&mut self, info: &str);

    /// Print a notice the user should act on.
    fn print_notice(&mut self, notice: &str);

    /// Print upload progress.
    fn print_progress(&mut self, percent: u32);

    /// Print the mode and status header.
    fn print_header(&mut self, header: &HeaderView);

    /// Print the session list.
    fn print_sidebar(&mut self, entries: &[SidebarEntry]);

    /// Print the document picker.
    fn print_documents(&mut self, documents: &[Document], selected: Option<&str>);
}

/// Plain text renderer with optional ANSI styling.
pub struct PlainTextRenderer<W: Write + Send = Stdout> {
    out: W,
    use_color: bool,
}

impl PlainTextRenderer {
    /// Creates a new PlainTextRenderer with ANSI colors enabled.
    pub fn new() -> Self {
        Self::with_color(true)
    }

    /// Creates a new PlainTextRenderer with specified color setting.
    pub fn with_color(use_color: bool) -> Self {
        Self {
            out: io::stdout(),
            use_color,
        }
    }
}

impl Default for PlainTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl<W: Write + Send> PlainTextRenderer<W> {
    /// Creates a renderer over an arbitrary writer.
    pub fn with_writer(out: W, use_color: bool) -> Self {
        Self { out, use_color }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.out
    }

    fn styled(&self, style: &str, text: &str) -> String {
        if self.use_color {
            format!("{style}{text}{ANSI_RESET}")
        } else {
            text.to_string()
        }
    }

    // Terminal write failures are not actionable here.
    fn line(&mut self, text: &str) {
        let _ = writeln!(self.out, "{text}");
        let _ = self.out.flush();
    }
}

impl<W: Write + Send> Renderer for PlainTextRenderer<W> {
    fn print_message(&mut self, message: &ChatMessage) {
        let style = match message.sender {
            Sender::User => ANSI_CYAN,
            Sender::Ai => ANSI_GREEN,
        };
        let name = self.styled(style, message.sender.display_name());
        let stamp = self.styled(ANSI_DIM, &clock_label(&message.timestamp));
        self.line(&format!("{name} {stamp}: {}", message.text));
    }

    fn print_thinking(&mut self) {
        let text = if self.use_color {
            format!("{ANSI_DIM}{ANSI_ITALIC}AI Assistant: Thinking...{ANSI_RESET}")
        } else {
            "AI Assistant: Thinking...".to_string()
        };
        self.line(&text);
    }

    fn print_error(&mut self, error: &str) {
        let text = self.styled(ANSI_RED, &format!("Error: {error}"));
        let _ = writeln!(io::stderr(), "{text}");
    }

    fn print_info(&mut self, info: &str) {
        self.line(info);
    }

    fn print_notice(&mut self, notice: &str) {
        let text = self.styled(ANSI_YELLOW, notice);
        self.line(&text);
    }

    fn print_progress(&mut self, percent: u32) {
        let text = self.styled(ANSI_MAGENTA, &format!("    Uploading... {percent}%"));
        self.line(&text);
    }

    fn print_header(&mut self, header: &HeaderView) {
        let badge = if header.is_online() {
            self.styled(ANSI_GREEN, header.status_label())
        } else {
            self.styled(ANSI_RED, header.status_label())
        };
        let mut text = format!("Buddy Chat [{badge}] mode: {}", header.mode());
        if !header.document_mode_enabled() {
            text.push_str(" (document mode unavailable)");
        }
        if let Some(name) = header.analyzing() {
            text.push_str(&format!("\n    Analyzing: {name}"));
        }
        self.line(&text);
    }

    fn print_sidebar(&mut self, entries: &[SidebarEntry]) {
        if entries.is_empty() {
            self.line("    No chats yet. Use /new to start one.");
            return;
        }
        for entry in entries {
            let marker = if entry.active { "*" } else { " " };
            let row = format!("  {marker} {}  {}", entry.id, entry.label);
            let row = if entry.active {
                self.styled(ANSI_CYAN, &row)
            } else {
                row
            };
            self.line(&row);
        }
    }

    fn print_documents(&mut self, documents: &[Document], selected: Option<&str>) {
        if documents.is_empty() {
            self.line("    No documents. Use /upload <path> to add one.");
        }
        for doc in documents {
            let active = selected == Some(doc.id.as_str());
            let marker = if active { "*" } else { " " };
            let row = format!("  {marker} [{}] {} ({})", doc.id, doc.name, doc.size);
            let row = if active {
                self.styled(ANSI_CYAN, &row)
            } else {
                row
            };
            self.line(&row);
        }
        let hint = self.styled(ANSI_DIM, &format!("    {SUPPORTED_FORMATS_HINT}"));
        self.line(&hint);
    }
}
