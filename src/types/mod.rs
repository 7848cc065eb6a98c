// Public modules
pub mod candidate;
pub mod content;
pub mod generate_content_request;
pub mod generate_content_response;
pub mod generation_config;
pub mod model;
pub mod usage_metadata;

// Re-exports
pub use candidate::{Candidate, FinishReason};
pub use content::{Content, Part, Role};
pub use generate_content_request::GenerateContentRequest;
pub use generate_content_response::GenerateContentResponse;
pub use generation_config::GenerationConfig;
pub use model::{KnownModel, Model};
pub use usage_metadata::UsageMetadata;
