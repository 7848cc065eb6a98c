use serde::{Deserialize, Serialize};

use crate::types::{Candidate, FinishReason, UsageMetadata};

/// A generateContent response, or one chunk of a streamGenerateContent
/// response. Streaming chunks have the same shape as a full response; each
/// carries the text generated since the previous chunk.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    /// Candidate replies. This library requests a single candidate.
    #[serde(default)]
    pub candidates: Vec<Candidate>,

    /// Token accounting, usually present on the final chunk.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub usage_metadata: Option<UsageMetadata>,
}

impl GenerateContentResponse {
    /// Concatenated text of the first candidate's parts.
    ///
    /// Empty when the chunk carried no text (e.g. a final chunk holding only
    /// a finish reason and usage metadata).
    pub fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| content.text())
            .unwrap_or_default()
    }

    /// Finish reason of the first candidate, if present.
    pub fn finish_reason(&self) -> Option<FinishReason> {
        self.candidates.first().and_then(|c| c.finish_reason)
    }
}
