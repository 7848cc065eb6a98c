//! Output rendering for chat streaming and history replay.
//!
//! The core never draws widgets itself; it drives a [`Renderer`], which owns
//! the display surface. The same trait serves both live streaming (text
//! grows fragment by fragment) and full-history replay on redraw.

use std::io::{self, Stdout, Write};

use crate::types::Role;

/// ANSI escape code for bold text (used for role labels).
const ANSI_BOLD: &str = "\x1b[1m";

/// ANSI escape code for cyan text (used for the user label).
const ANSI_CYAN: &str = "\x1b[36m";

/// ANSI escape code for green text (used for the model label).
const ANSI_GREEN: &str = "\x1b[32m";

/// ANSI escape code to reset all styling.
const ANSI_RESET: &str = "\x1b[0m";

/// Trait for rendering chat output.
///
/// This abstraction allows for different rendering strategies:
/// - Plain text with ANSI styling
/// - Plain text without styling (for piping/redirecting)
/// - Capturing renderers for tests
pub trait Renderer: Send {
    /// Called when a message begins, before any of its text.
    fn begin_message(&mut self, role: Role);

    /// Print a chunk of message text.
    ///
    /// During streaming this is called once per fragment, in order; during
    /// replay it is called once with the whole message body.
    fn print_text(&mut self, text: &str);

    /// Called when a message is complete.
    fn finish_message(&mut self);

    /// Print an informational message outside the transcript.
    fn print_info(&mut self, info: &str);

    /// Print an error message outside the transcript.
    fn print_error(&mut self, error: &str);
}

/// Plain text renderer with optional ANSI styling.
///
/// Outputs directly to stdout, flushing after every fragment so streamed
/// text appears immediately.
pub struct PlainTextRenderer {
    stdout: Stdout,
    use_color: bool,
}

impl PlainTextRenderer {
    /// Creates a new PlainTextRenderer with ANSI colors enabled.
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            use_color: true,
        }
    }

    /// Creates a new PlainTextRenderer with specified color setting.
    pub fn with_color(use_color: bool) -> Self {
        Self {
            stdout: io::stdout(),
            use_color,
        }
    }

    /// Flushes stdout to ensure immediate display of streamed content.
    fn flush(&mut self) {
        let _ = self.stdout.flush();
    }
}

impl Default for PlainTextRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl Renderer for PlainTextRenderer {
    fn begin_message(&mut self, role: Role) {
        let label = match role {
            Role::User => "You",
            Role::Model => "Gemini",
        };
        if self.use_color {
            let color = match role {
                Role::User => ANSI_CYAN,
                Role::Model => ANSI_GREEN,
            };
            print!("{ANSI_BOLD}{color}{label}:{ANSI_RESET} ");
        } else {
            print!("{label}: ");
        }
        self.flush();
    }

    fn print_text(&mut self, text: &str) {
        print!("{text}");
        self.flush();
    }

    fn finish_message(&mut self) {
        println!();
        self.flush();
    }

    fn print_info(&mut self, info: &str) {
        println!("{info}");
        self.flush();
    }

    fn print_error(&mut self, error: &str) {
        eprintln!("Error: {error}");
    }
}

/// Renderer that captures everything in memory.
#[cfg(test)]
#[derive(Default)]
pub(crate) struct TestRenderer {
    pub(crate) text: String,
    pub(crate) messages: Vec<(Role, String)>,
    pub(crate) infos: Vec<String>,
    pub(crate) errors: Vec<String>,
    current: Option<(Role, String)>,
}

#[cfg(test)]
impl Renderer for TestRenderer {
    fn begin_message(&mut self, role: Role) {
        self.current = Some((role, String::new()));
    }

    fn print_text(&mut self, text: &str) {
        self.text.push_str(text);
        if let Some((_, body)) = self.current.as_mut() {
            body.push_str(text);
        }
    }

    fn finish_message(&mut self) {
        if let Some(message) = self.current.take() {
            self.messages.push(message);
        }
    }

    fn print_info(&mut self, info: &str) {
        self.infos.push(info.to_string());
    }

    fn print_error(&mut self, error: &str) {
        self.errors.push(error.to_string());
    }
}
