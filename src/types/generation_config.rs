use serde::{Deserialize, Serialize};

/// Sampling configuration applied to every request in a session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    /// Sampling temperature. The valid range is provider-defined; an
    /// out-of-range value comes back as INVALID_ARGUMENT at call time.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,

    /// Nucleus sampling cutoff.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_p: Option<f32>,

    /// Top-k sampling limit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,

    /// Maximum tokens in the response.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
}

impl GenerationConfig {
    /// Creates a config with only the temperature set.
    pub fn with_temperature(temperature: f32) -> Self {
        Self {
            temperature: Some(temperature),
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, to_value};

    #[test]
    fn camel_case_fields() {
        let config = GenerationConfig {
            temperature: Some(0.25),
            max_output_tokens: Some(1024),
            ..GenerationConfig::default()
        };
        let json = to_value(&config).unwrap();
        // 0.25 is exactly representable, so the f32 -> f64 widening in
        // serde_json does not perturb the value.
        assert_eq!(
            json,
            json!({
                "temperature": 0.25,
                "maxOutputTokens": 1024
            })
        );
    }

    #[test]
    fn unset_fields_are_omitted() {
        let json = to_value(GenerationConfig::default()).unwrap();
        assert_eq!(json, json!({}));
    }
}
