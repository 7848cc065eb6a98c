// Public modules
pub mod chat;
pub mod client;
pub mod config;
pub mod error;
pub mod fragment;
pub mod observability;
pub mod render;
pub mod sse;
pub mod types;

// Re-exports
pub use client::{Gemini, SharedClient};
pub use config::Config;
pub use error::{Error, Result};
pub use fragment::{TextFragment, TurnOutcome, drive_turn, fragments};
pub use observability::register_biometrics;
pub use render::{PlainTextRenderer, Renderer};
pub use types::*;
