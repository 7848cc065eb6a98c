//! Secrets/configuration store for the chat dashboard.
//!
//! Configuration lives in a TOML file with a `[gemini]` table carrying the
//! API key, model identifier, and sampling temperature. It is read once at
//! startup and immutable thereafter. A missing or placeholder key is
//! terminal: the caller should stop and surface the instruction rather than
//! retry.

use std::env;
use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::types::Model;

/// The sentinel value shipped in the example secrets file.
pub const PLACEHOLDER_API_KEY: &str = "your-api-key-here";

/// Environment variable that overrides the api_key field.
pub const API_KEY_ENV: &str = "GEMINIUS_API_KEY";

/// Resolved configuration: API key, model, and temperature.
#[derive(Debug, Clone)]
pub struct Config {
    /// The API key (secret).
    pub api_key: String,

    /// The model identifier requests are issued against.
    pub model: Model,

    /// The sampling temperature sent with every request.
    pub temperature: f32,
}

#[derive(Deserialize)]
struct SecretsFile {
    gemini: Option<GeminiTable>,
}

#[derive(Deserialize)]
struct GeminiTable {
    api_key: Option<String>,
    model: Option<String>,
    temperature: Option<f32>,
}

impl Config {
    /// Loads configuration from a TOML secrets file.
    ///
    /// `GEMINIUS_API_KEY` in the environment takes precedence over the
    /// file's api_key field.
    ///
    /// # Errors
    ///
    /// Returns `Error::ConfigMissing` if the file is unreadable or
    /// malformed, the `[gemini]` table is absent, or a required field is
    /// absent. Returns `Error::ConfigPlaceholder` if the resolved key still
    /// equals `"your-api-key-here"`.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|_| {
            Error::config_missing(
                format!(
                    "could not read {}; create it with a [gemini] table holding api_key, model, and temperature",
                    path.display()
                ),
                None,
            )
        })?;
        let origin = path.display().to_string();
        let secrets = Self::parse_secrets(&raw, &origin)?;
        let override_key = env::var(API_KEY_ENV).ok().filter(|key| !key.is_empty());
        Self::from_secrets(secrets, &origin, override_key)
    }

    /// Parses configuration from the contents of a secrets file.
    ///
    /// `origin` names the source in error messages. Unlike [`Config::load`],
    /// this does not consult the environment.
    pub fn from_toml_str(raw: &str, origin: &str) -> Result<Self> {
        let secrets = Self::parse_secrets(raw, origin)?;
        Self::from_secrets(secrets, origin, None)
    }

    // A corrupt store is as unusable as an absent one, so parse failures
    // surface as ConfigMissing with the instruction, not as a bare
    // serialization error.
    fn parse_secrets(raw: &str, origin: &str) -> Result<SecretsFile> {
        toml::from_str(raw).map_err(|e| {
            Error::config_missing(
                format!(
                    "{origin} is not valid TOML ({message}); fix it or recreate it with a [gemini] table holding api_key, model, and temperature",
                    message = e.message()
                ),
                None,
            )
        })
    }

    fn from_secrets(
        secrets: SecretsFile,
        origin: &str,
        override_key: Option<String>,
    ) -> Result<Self> {
        let table = secrets.gemini.ok_or_else(|| {
            Error::config_missing(
                format!("{origin} has no [gemini] table"),
                Some("gemini".to_string()),
            )
        })?;

        let api_key = match override_key {
            Some(key) => key,
            None => table.api_key.ok_or_else(|| {
                Error::config_missing(
                    format!("set api_key in the [gemini] table of {origin} or export {API_KEY_ENV}"),
                    Some("api_key".to_string()),
                )
            })?,
        };

        if api_key == PLACEHOLDER_API_KEY {
            return Err(Error::config_placeholder(format!(
                "api_key in {origin} is still the placeholder; paste your real key"
            )));
        }

        let model = table
            .model
            .ok_or_else(|| {
                Error::config_missing(
                    format!("set model in the [gemini] table of {origin}"),
                    Some("model".to_string()),
                )
            })?
            .into();

        let temperature = table.temperature.ok_or_else(|| {
            Error::config_missing(
                format!("set temperature in the [gemini] table of {origin}"),
                Some("temperature".to_string()),
            )
        })?;

        Ok(Config {
            api_key,
            model,
            temperature,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::KnownModel;

    const VALID: &str = r#"
        [gemini]
        api_key = "test-key"
        model = "gemini-2.0-flash"
        temperature = 0.7
    "#;

    #[test]
    fn loads_valid_secrets() {
        let config = Config::from_toml_str(VALID, "secrets.toml").unwrap();
        assert_eq!(config.api_key, "test-key");
        assert_eq!(config.model, Model::Known(KnownModel::Gemini20Flash));
        assert_eq!(config.temperature, 0.7);
    }

    #[test]
    fn missing_table_is_config_missing() {
        let err = Config::from_toml_str("", "secrets.toml").unwrap_err();
        assert!(err.is_config_missing());
    }

    #[test]
    fn missing_field_names_the_key() {
        let raw = r#"
            [gemini]
            api_key = "test-key"
            temperature = 0.7
        "#;
        let err = Config::from_toml_str(raw, "secrets.toml").unwrap_err();
        assert!(err.is_config_missing());
        assert!(err.to_string().contains("model"));
    }

    #[test]
    fn placeholder_key_is_rejected() {
        let raw = r#"
            [gemini]
            api_key = "your-api-key-here"
            model = "gemini-2.0-flash"
            temperature = 0.7
        "#;
        let err = Config::from_toml_str(raw, "secrets.toml").unwrap_err();
        assert!(err.is_config_placeholder());
    }

    #[test]
    fn malformed_store_is_config_missing() {
        let raw = "[gemini\napi_key = \"k\"";
        let err = Config::from_toml_str(raw, "secrets.toml").unwrap_err();
        assert!(err.is_config_missing());
        assert!(err.to_string().contains("secrets.toml"));
    }

    #[test]
    fn unreadable_file_is_config_missing() {
        let err = Config::load("/nonexistent/secrets.toml").unwrap_err();
        assert!(err.is_config_missing());
    }

    #[test]
    fn load_from_tempfile() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("secrets.toml");
        std::fs::write(&path, VALID).unwrap();
        let config = Config::load(&path).unwrap();
        assert_eq!(config.model, Model::Known(KnownModel::Gemini20Flash));
    }
}
