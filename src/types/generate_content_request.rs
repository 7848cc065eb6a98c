use serde::{Deserialize, Serialize};

use crate::types::{Content, GenerationConfig};

/// Request body for generateContent and streamGenerateContent.
///
/// The conversation so far travels in `contents`, oldest turn first; the
/// prompt being answered is the final user entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentRequest {
    /// The conversation turns, in order.
    pub contents: Vec<Content>,

    /// Sampling configuration for this request.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GenerateContentRequest {
    /// Creates a request from conversation turns.
    pub fn new(contents: Vec<Content>) -> Self {
        Self {
            contents,
            generation_config: None,
        }
    }

    /// Sets the generation config.
    pub fn with_generation_config(mut self, config: GenerationConfig) -> Self {
        self.generation_config = Some(config);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Role;
    use serde_json::{json, to_value};

    #[test]
    fn request_serialization() {
        let request = GenerateContentRequest::new(vec![
            Content::new(Role::User, "2+2?"),
            Content::new(Role::Model, "4"),
            Content::new(Role::User, "and doubled?"),
        ])
        .with_generation_config(GenerationConfig::with_temperature(0.25));

        let json = to_value(&request).unwrap();
        assert_eq!(
            json,
            json!({
                "contents": [
                    {"role": "user", "parts": [{"text": "2+2?"}]},
                    {"role": "model", "parts": [{"text": "4"}]},
                    {"role": "user", "parts": [{"text": "and doubled?"}]}
                ],
                "generationConfig": {"temperature": 0.25}
            })
        );
    }
}
