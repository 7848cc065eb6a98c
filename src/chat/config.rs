//! Configuration types for the chat application.
//!
//! This module provides CLI argument parsing via `arrrg` and the resolved
//! per-session configuration. A session's model and temperature are fixed
//! for its lifetime; changing either means starting a fresh session.

use arrrg_derive::CommandLine;

use crate::config::Config;
use crate::types::{KnownModel, Model};

/// Default path of the secrets file, relative to the working directory.
pub const DEFAULT_SECRETS_PATH: &str = "secrets.toml";

/// Command-line arguments for the geminius-chat tool.
#[derive(CommandLine, Debug, Default, PartialEq, Eq)]
pub struct ChatArgs {
    /// Path to the TOML secrets file.
    #[arrrg(optional, "Path to the secrets file (default: secrets.toml)", "PATH")]
    pub secrets: Option<String>,

    /// Model override for this run.
    #[arrrg(optional, "Model to use instead of the configured one", "MODEL")]
    pub model: Option<String>,

    /// Temperature override for this run.
    #[arrrg(optional, "Temperature to use instead of the configured one", "TEMP")]
    pub temperature: Option<String>,

    /// Disable ANSI colors and styles.
    #[arrrg(flag, "Disable ANSI colors/styles")]
    pub no_color: bool,
}

impl ChatArgs {
    /// The secrets path to load, defaulting to `secrets.toml`.
    pub fn secrets_path(&self) -> &str {
        self.secrets.as_deref().unwrap_or(DEFAULT_SECRETS_PATH)
    }
}

/// Configuration for one chat session.
///
/// Model and temperature are bound at session creation and never mutated;
/// a reset carries them over unchanged.
#[derive(Debug, Clone, PartialEq)]
pub struct ChatConfig {
    /// The model to use for generating responses.
    pub model: Model,

    /// Sampling temperature sent with every request.
    pub temperature: f32,

    /// Whether to use ANSI colors and styles in output.
    pub use_color: bool,
}

impl ChatConfig {
    /// Creates a ChatConfig with the given model and temperature.
    pub fn new(model: Model, temperature: f32) -> Self {
        Self {
            model,
            temperature,
            use_color: true,
        }
    }

    /// Derives a session configuration from the loaded secrets.
    pub fn from_config(config: &Config) -> Self {
        Self::new(config.model.clone(), config.temperature)
    }

    /// Sets the model to use.
    pub fn with_model(mut self, model: Model) -> Self {
        self.model = model;
        self
    }

    /// Sets the sampling temperature.
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
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
        Self::new(Model::Known(KnownModel::Gemini20Flash), 0.7)
    }
}
