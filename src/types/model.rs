use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Represents a Gemini model identifier.
///
/// This can be a predefined model version or a custom string value
/// for models that may be added in the future.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Model {
    /// Known model versions
    Known(KnownModel),

    /// Custom model identifier (for future models or private models)
    Custom(String),
}

/// Known Gemini model versions
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum KnownModel {
    /// Gemini 2.5 Pro
    #[serde(rename = "gemini-2.5-pro")]
    Gemini25Pro,

    /// Gemini 2.5 Flash
    #[serde(rename = "gemini-2.5-flash")]
    Gemini25Flash,

    /// Gemini 2.5 Flash-Lite
    #[serde(rename = "gemini-2.5-flash-lite")]
    Gemini25FlashLite,

    /// Gemini 2.0 Flash
    #[serde(rename = "gemini-2.0-flash")]
    Gemini20Flash,

    /// Gemini 2.0 Flash-Lite
    #[serde(rename = "gemini-2.0-flash-lite")]
    Gemini20FlashLite,

    /// Gemini 1.5 Pro
    #[serde(rename = "gemini-1.5-pro")]
    Gemini15Pro,

    /// Gemini 1.5 Flash
    #[serde(rename = "gemini-1.5-flash")]
    Gemini15Flash,
}

impl fmt::Display for Model {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Model::Known(known_model) => write!(f, "{}", known_model),
            Model::Custom(custom) => write!(f, "{}", custom),
        }
    }
}

impl fmt::Display for KnownModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KnownModel::Gemini25Pro => write!(f, "gemini-2.5-pro"),
            KnownModel::Gemini25Flash => write!(f, "gemini-2.5-flash"),
            KnownModel::Gemini25FlashLite => write!(f, "gemini-2.5-flash-lite"),
            KnownModel::Gemini20Flash => write!(f, "gemini-2.0-flash"),
            KnownModel::Gemini20FlashLite => write!(f, "gemini-2.0-flash-lite"),
            KnownModel::Gemini15Pro => write!(f, "gemini-1.5-pro"),
            KnownModel::Gemini15Flash => write!(f, "gemini-1.5-flash"),
        }
    }
}

impl FromStr for Model {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let known = match s {
            "gemini-2.5-pro" => Some(KnownModel::Gemini25Pro),
            "gemini-2.5-flash" => Some(KnownModel::Gemini25Flash),
            "gemini-2.5-flash-lite" => Some(KnownModel::Gemini25FlashLite),
            "gemini-2.0-flash" => Some(KnownModel::Gemini20Flash),
            "gemini-2.0-flash-lite" => Some(KnownModel::Gemini20FlashLite),
            "gemini-1.5-pro" => Some(KnownModel::Gemini15Pro),
            "gemini-1.5-flash" => Some(KnownModel::Gemini15Flash),
            _ => None,
        };
        Ok(match known {
            Some(known) => Model::Known(known),
            None => Model::Custom(s.to_string()),
        })
    }
}

impl From<KnownModel> for Model {
    fn from(model: KnownModel) -> Self {
        Model::Known(model)
    }
}

impl From<String> for Model {
    fn from(model: String) -> Self {
        model.parse().unwrap_or(Model::Custom(model))
    }
}

impl From<&str> for Model {
    fn from(model: &str) -> Self {
        model.parse().unwrap_or_else(|_| Model::Custom(model.to_string()))
    }
}
