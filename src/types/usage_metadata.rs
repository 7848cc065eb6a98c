use serde::{Deserialize, Serialize};

/// Token accounting attached to a response (or its final chunk).
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    /// Tokens in the prompt (all conversation turns sent).
    #[serde(default)]
    pub prompt_token_count: u64,

    /// Tokens across all generated candidates.
    #[serde(default)]
    pub candidates_token_count: u64,

    /// Prompt plus candidates.
    #[serde(default)]
    pub total_token_count: u64,
}

impl std::ops::Add for UsageMetadata {
    type Output = UsageMetadata;

    fn add(self, rhs: UsageMetadata) -> UsageMetadata {
        UsageMetadata {
            prompt_token_count: self.prompt_token_count + rhs.prompt_token_count,
            candidates_token_count: self.candidates_token_count + rhs.candidates_token_count,
            total_token_count: self.total_token_count + rhs.total_token_count,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_metadata_defaults_to_zero() {
        let usage: UsageMetadata =
            serde_json::from_str(r#"{"promptTokenCount": 12}"#).unwrap();
        assert_eq!(usage.prompt_token_count, 12);
        assert_eq!(usage.candidates_token_count, 0);
    }

    #[test]
    fn usage_addition() {
        let a = UsageMetadata {
            prompt_token_count: 10,
            candidates_token_count: 5,
            total_token_count: 15,
        };
        let b = UsageMetadata {
            prompt_token_count: 2,
            candidates_token_count: 3,
            total_token_count: 5,
        };
        assert_eq!((a + b).total_token_count, 20);
    }
}
