use serde::{Deserialize, Serialize};

use crate::types::Content;

/// Reason the model stopped producing tokens for a candidate.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FinishReason {
    /// Default, unspecified value.
    FinishReasonUnspecified,
    /// Natural end of generation.
    Stop,
    /// Hit the max output token limit.
    MaxTokens,
    /// Stopped for safety reasons.
    Safety,
    /// Stopped for potential recitation.
    Recitation,
    /// Some other reason.
    Other,
}

/// One candidate reply within a response or response chunk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    /// The content produced so far for this candidate.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<Content>,

    /// Why generation stopped, present on the final chunk.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<FinishReason>,

    /// Candidate index, when multiple candidates are requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub index: Option<u32>,
}
