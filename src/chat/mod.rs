//! Chat application module for conversations with the Buddy backend.
//!
//! This module provides the client-side state and views behind the
//! `buddy-chat` REPL. It supports:
//!
//! - Multiple chat sessions, each with its own transcript
//! - Direct and document chat modes
//! - Slash commands for sessions, modes, and documents
//! - ANSI-styled output
//!
//! # Architecture
//!
//! The module is organized into several components:
//!
//! - [`config`]: CLI argument parsing and configuration
//! - [`controller`]: Session state and backend exchanges
//! - [`composer`]: The message input box
//! - [`sidebar`]: The session list
//! - [`header`]: Mode toggle and backend status
//! - [`commands`]: Slash command parsing
//! - [`render`]: Terminal output

mod commands;
mod composer;
mod config;
mod controller;
mod header;
mod render;
mod sidebar;

pub use commands::{ChatCommand, help_text, parse_command};
pub use composer::{Composer, ComposerAction, OFFLINE_PLACEHOLDER, READY_PLACEHOLDER};
pub use config::{ChatArgs, ChatArgsError, ChatConfig};
pub use controller::{ExchangeState, OFFLINE_NOTICE, SendOutcome, SessionController};
pub use header::{DOCUMENT_MODE_OFFLINE_NOTICE, HeaderView, request_mode};
pub use render::{PlainTextRenderer, Renderer};
pub use sidebar::{SessionSidebar, SidebarEntry};
