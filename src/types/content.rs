use serde::{Deserialize, Serialize};

/// The author of a conversation turn.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The end user.
    User,

    /// The model's reply.
    Model,
}

/// One piece of content within a turn.
///
/// The generateContent API also defines inline-data and function-call parts;
/// this library only speaks text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    /// The text of this part.
    pub text: String,
}

/// A single turn of conversation content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Content {
    /// The role that authored this content, if tagged.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,

    /// The parts making up this content, in order.
    pub parts: Vec<Part>,
}

impl Content {
    /// Create content with the given role and a single text part.
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role: Some(role),
            parts: vec![Part { text: text.into() }],
        }
    }

    /// Create a user turn with a single text part.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    /// Create a model turn with a single text part.
    pub fn model(text: impl Into<String>) -> Self {
        Self::new(Role::Model, text)
    }

    /// Concatenation of all text parts, in order.
    pub fn text(&self) -> String {
        self.parts.iter().map(|p| p.text.as_str()).collect()
    }
}

impl From<&str> for Content {
    fn from(text: &str) -> Self {
        Content::user(text)
    }
}

impl From<String> for Content {
    fn from(text: String) -> Self {
        Content::user(text)
    }
}
