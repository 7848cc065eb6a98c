//! Chat application module for interactive conversations with Gemini.
//!
//! This module provides the per-session conversational core behind both
//! the REPL binary and any embedding application. It supports:
//!
//! - Streaming responses with incremental display
//! - Per-session message logs with an explicit reset lifecycle
//! - Slash commands for session control
//! - Session storage keyed by caller-supplied identifiers
//!
//! # Architecture
//!
//! The module is organized into several components:
//!
//! - [`config`]: CLI argument parsing and session configuration
//! - [`session`]: Core chat session management and API interaction
//! - [`registry`]: Explicit per-identifier session storage
//! - [`commands`]: Slash command parsing and handling

mod commands;
mod config;
mod registry;
mod session;

pub use crate::render::{PlainTextRenderer, Renderer};
pub use commands::{ChatCommand, help_text, parse_command};
pub use config::{ChatArgs, ChatConfig, DEFAULT_SECRETS_PATH};
pub use registry::{SessionId, SessionRegistry};
pub use session::{ChatSession, Message, SessionStats};
